//! In-memory implementation of the substrate traits.
//!
//! [`MemoryBackend`] keeps a registry of locations, so a location's
//! data survives close/reopen within the process and the open-time
//! existence checks are observable. Useful for testing or scenarios
//! where durability is not required.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use bytes::Bytes;

use crate::{Backend, BackendDb, BackendError, BackendResult, BatchOp, OpenMode};

/// In-memory backend holding one database per location.
///
/// Every `MemoryBackend` value is an independent universe of
/// locations; no process-wide state is shared between instances.
pub struct MemoryBackend {
    databases: RwLock<BTreeMap<String, Arc<MemoryDbState>>>,
}

impl MemoryBackend {
    /// Creates a backend with no locations.
    pub fn new() -> Self {
        Self {
            databases: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    #[tracing::instrument(level = "trace", skip_all)]
    async fn open(&self, location: &str, mode: OpenMode) -> BackendResult<Arc<dyn BackendDb>> {
        let mut databases = self
            .databases
            .write()
            .map_err(|e| BackendError::Internal(format!("Failed to acquire write lock: {}", e)))?;

        let state = match databases.entry(location.to_string()) {
            Entry::Occupied(entry) => {
                if mode.error_if_exists {
                    return Err(BackendError::AlreadyExists);
                }
                Arc::clone(entry.get())
            }
            Entry::Vacant(entry) => {
                if !mode.create_if_missing {
                    return Err(BackendError::DoesNotExist);
                }
                let state = Arc::new(MemoryDbState::default());
                entry.insert(Arc::clone(&state));
                state
            }
        };

        Ok(Arc::new(MemoryDb { state }))
    }
}

/// Data shared between every handle opened on the same location.
#[derive(Default)]
struct MemoryDbState {
    entries: RwLock<BTreeMap<Bytes, Bytes>>,
}

/// A handle onto one in-memory database.
struct MemoryDb {
    state: Arc<MemoryDbState>,
}

#[async_trait]
impl BackendDb for MemoryDb {
    #[tracing::instrument(level = "trace", skip_all)]
    async fn get(&self, key: &Bytes) -> BackendResult<Option<Bytes>> {
        let entries = self
            .state
            .entries
            .read()
            .map_err(|e| BackendError::Internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entries.get(key).cloned())
    }

    #[tracing::instrument(level = "trace", skip_all)]
    async fn put(&self, key: Bytes, value: Bytes) -> BackendResult<()> {
        let mut entries = self
            .state
            .entries
            .write()
            .map_err(|e| BackendError::Internal(format!("Failed to acquire write lock: {}", e)))?;

        entries.insert(key, value);
        Ok(())
    }

    #[tracing::instrument(level = "trace", skip_all)]
    async fn delete(&self, key: &Bytes) -> BackendResult<()> {
        let mut entries = self
            .state
            .entries
            .write()
            .map_err(|e| BackendError::Internal(format!("Failed to acquire write lock: {}", e)))?;

        entries.remove(key);
        Ok(())
    }

    /// Applies the whole batch under a single write-lock acquisition,
    /// so all operations become visible together and list order
    /// resolves repeated keys.
    #[tracing::instrument(level = "trace", skip_all)]
    async fn write_batch(&self, ops: Vec<BatchOp>) -> BackendResult<()> {
        let mut entries = self
            .state
            .entries
            .write()
            .map_err(|e| BackendError::Internal(format!("Failed to acquire write lock: {}", e)))?;

        for op in ops {
            match op {
                BatchOp::Put { key, value } => {
                    entries.insert(key, value);
                }
                BatchOp::Delete { key } => {
                    entries.remove(&key);
                }
            }
        }

        Ok(())
    }

    async fn close(&self) -> BackendResult<()> {
        // No-op for in-memory storage; the location's data stays in
        // the backend registry for later reopens.
        Ok(())
    }
}

/// Injected failure that fires either once or on every call.
#[cfg(feature = "test-utils")]
#[derive(Clone)]
enum Failure {
    /// Error is returned once, then automatically cleared.
    Once(BackendError),
    /// Error is returned on every subsequent call until explicitly cleared.
    Persistent(BackendError),
}

#[cfg(feature = "test-utils")]
type FailSlot = arc_swap::ArcSwap<Option<Failure>>;

/// Checks a [`FailSlot`] and returns an error if one is set.
///
/// For [`Failure::Once`], the slot is atomically swapped to `None` so
/// the error fires exactly once. For [`Failure::Persistent`], the slot
/// is left unchanged.
#[cfg(feature = "test-utils")]
fn check_failure(slot: &FailSlot) -> BackendResult<()> {
    let guard = slot.load();
    match guard.as_ref() {
        None => Ok(()),
        Some(Failure::Persistent(err)) => Err(err.clone()),
        Some(Failure::Once(_)) => {
            // Swap to None; if another thread raced us, one of them gets the
            // error and the others pass through — reasonable for tests.
            let prev = slot.swap(Arc::new(None));
            match prev.as_ref() {
                Some(Failure::Once(err)) => Err(err.clone()),
                _ => Ok(()),
            }
        }
    }
}

/// A database wrapper that delegates to an inner [`BackendDb`] but can
/// inject failures into `get`, `put`, `delete`, and `write_batch` on
/// demand.
///
/// Each failure slot is controlled by a lock-free
/// [`ArcSwap`](arc_swap::ArcSwap), so the wrapper adds no artificial
/// synchronisation that could mask concurrency bugs in the code under
/// test.
///
/// Failures can be *persistent* (returned on every call until cleared)
/// or *once* (returned on the next call, then automatically cleared).
///
/// Gated behind the `test-utils` feature.
#[cfg(feature = "test-utils")]
pub struct FailingDb {
    inner: Arc<dyn BackendDb>,
    fail_get: FailSlot,
    fail_put: FailSlot,
    fail_delete: FailSlot,
    fail_write_batch: FailSlot,
}

#[cfg(feature = "test-utils")]
impl FailingDb {
    /// Wraps an existing database, with all failure injections initially `None`.
    pub fn wrap(inner: Arc<dyn BackendDb>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            fail_get: arc_swap::ArcSwap::from_pointee(None),
            fail_put: arc_swap::ArcSwap::from_pointee(None),
            fail_delete: arc_swap::ArcSwap::from_pointee(None),
            fail_write_batch: arc_swap::ArcSwap::from_pointee(None),
        })
    }

    /// Makes `get` return the given error on every subsequent call.
    pub fn fail_get(&self, err: BackendError) {
        self.fail_get.store(Arc::new(Some(Failure::Persistent(err))));
    }

    /// Makes `get` return the given error on the next call only.
    pub fn fail_get_once(&self, err: BackendError) {
        self.fail_get.store(Arc::new(Some(Failure::Once(err))));
    }

    /// Makes `put` return the given error on every subsequent call.
    pub fn fail_put(&self, err: BackendError) {
        self.fail_put.store(Arc::new(Some(Failure::Persistent(err))));
    }

    /// Makes `put` return the given error on the next call only.
    pub fn fail_put_once(&self, err: BackendError) {
        self.fail_put.store(Arc::new(Some(Failure::Once(err))));
    }

    /// Makes `delete` return the given error on every subsequent call.
    pub fn fail_delete(&self, err: BackendError) {
        self.fail_delete
            .store(Arc::new(Some(Failure::Persistent(err))));
    }

    /// Makes `delete` return the given error on the next call only.
    pub fn fail_delete_once(&self, err: BackendError) {
        self.fail_delete.store(Arc::new(Some(Failure::Once(err))));
    }

    /// Makes `write_batch` return the given error on every subsequent call.
    pub fn fail_write_batch(&self, err: BackendError) {
        self.fail_write_batch
            .store(Arc::new(Some(Failure::Persistent(err))));
    }

    /// Makes `write_batch` return the given error on the next call only.
    pub fn fail_write_batch_once(&self, err: BackendError) {
        self.fail_write_batch
            .store(Arc::new(Some(Failure::Once(err))));
    }
}

#[cfg(feature = "test-utils")]
#[async_trait]
impl BackendDb for FailingDb {
    async fn get(&self, key: &Bytes) -> BackendResult<Option<Bytes>> {
        check_failure(&self.fail_get)?;
        self.inner.get(key).await
    }

    async fn put(&self, key: Bytes, value: Bytes) -> BackendResult<()> {
        check_failure(&self.fail_put)?;
        self.inner.put(key, value).await
    }

    async fn delete(&self, key: &Bytes) -> BackendResult<()> {
        check_failure(&self.fail_delete)?;
        self.inner.delete(key).await
    }

    async fn write_batch(&self, ops: Vec<BatchOp>) -> BackendResult<()> {
        check_failure(&self.fail_write_batch)?;
        self.inner.write_batch(ops).await
    }

    async fn close(&self) -> BackendResult<()> {
        self.inner.close().await
    }
}
