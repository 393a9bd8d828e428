//! Substrate traits for the key-value store.
//!
//! This crate defines the boundary between the store facade and the
//! physical storage engine underneath it: an ordered byte-string
//! key-value substrate addressed by an opaque location. A [`Backend`]
//! opens locations and hands out [`BackendDb`] handles; the store never
//! touches anything below those traits.
//!
//! An in-memory reference implementation is provided in [`memory`] for
//! tests and embedders that do not need durability.

pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

/// A single operation within an atomic write batch.
///
/// Operations apply in list order: the last operation on a key
/// determines that key's final state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BatchOp {
    Put { key: Bytes, value: Bytes },
    Delete { key: Bytes },
}

/// Open-time flags controlling existence semantics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OpenMode {
    /// Create the database if the location does not exist yet.
    pub create_if_missing: bool,
    /// Fail the open if the location already exists.
    pub error_if_exists: bool,
}

/// Error type for substrate operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The location does not exist and creation was not requested.
    DoesNotExist,
    /// The location already exists and exclusive creation was requested.
    AlreadyExists,
    /// Storage-level failures from the underlying engine.
    Storage(String),
    /// Internal errors indicating bugs or invariant violations.
    Internal(String),
}

impl std::error::Error for BackendError {}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::DoesNotExist => write!(f, "database does not exist"),
            BackendError::AlreadyExists => write!(f, "database already exists"),
            BackendError::Storage(msg) => write!(f, "Storage error: {}", msg),
            BackendError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

/// Result type alias for substrate operations.
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Factory for databases identified by an opaque location.
///
/// Implementations own the mapping from location to physical storage.
/// Two handles opened on different locations are fully independent.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Opens the database at `location`, applying the existence
    /// semantics of [`OpenMode`].
    async fn open(&self, location: &str, mode: OpenMode) -> BackendResult<Arc<dyn BackendDb>>;
}

/// An opened database: the ordered byte-string substrate itself.
#[async_trait]
pub trait BackendDb: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &Bytes) -> BackendResult<Option<Bytes>>;

    /// Stores `value` under `key`, overwriting any existing value.
    async fn put(&self, key: Bytes, value: Bytes) -> BackendResult<()>;

    /// Removes `key`. Absent keys are a no-op.
    async fn delete(&self, key: &Bytes) -> BackendResult<()>;

    /// Applies `ops` as one atomic unit, in list order.
    ///
    /// Either every operation becomes visible to subsequent reads or
    /// none does, including under concurrent access.
    async fn write_batch(&self, ops: Vec<BatchOp>) -> BackendResult<()>;

    /// Closes the database, releasing any resources.
    async fn close(&self) -> BackendResult<()>;
}
