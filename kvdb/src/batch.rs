//! Ordered batches of put/delete operations.

use backend::BatchOp;
use bytes::Bytes;

/// An ordered list of put/delete operations applied atomically by
/// [`Db::batch`](crate::Db::batch).
///
/// Operations apply in insertion order; if a batch touches the same
/// key more than once, the last operation on that key determines its
/// final state. The batch is consumed on submission and cannot be
/// altered afterwards.
///
/// # Example
///
/// ```ignore
/// let batch = Batch::new()
///     .put(Bytes::from("a"), Bytes::from("1"))
///     .delete(Bytes::from("a"))
///     .put(Bytes::from("a"), Bytes::from("2")); // "a" ends up as "2"
/// db.batch(batch).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Batch {
    ops: Vec<BatchOp>,
}

impl Batch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a put operation.
    pub fn put(mut self, key: Bytes, value: Bytes) -> Self {
        self.ops.push(BatchOp::Put { key, value });
        self
    }

    /// Appends a delete operation.
    pub fn delete(mut self, key: Bytes) -> Self {
        self.ops.push(BatchOp::Delete { key });
        self
    }

    /// Returns the number of operations in the batch.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns true if the batch contains no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Consumes the batch, yielding the substrate op list.
    pub(crate) fn into_ops(self) -> Vec<BatchOp> {
        self.ops
    }
}
