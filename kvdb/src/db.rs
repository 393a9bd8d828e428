//! Core [`Db`] implementation: the public store facade.

use std::sync::Arc;

use backend::{Backend, OpenMode};
use bytes::Bytes;
use tracing::debug;

use crate::batch::Batch;
use crate::config::OpenOptions;
use crate::error::{Error, Result};
use crate::state::Lifecycle;

/// A handle onto one opened store.
///
/// `Db` composes the lifecycle state machine, the batch engine, and
/// the error taxonomy over an injected [`Backend`]. All methods take
/// `&self`; share the handle via `Arc` to issue operations from
/// multiple tasks. Operations on one handle are linearizable: once
/// [`close`](Db::close) completes, every later operation observes the
/// Closed state and fails with a "not open" error.
///
/// Two handles opened on different locations are fully independent.
/// Opening the same location twice concurrently is not supported.
pub struct Db {
    location: String,
    options: OpenOptions,
    lifecycle: Lifecycle,
}

impl Db {
    /// Opens the store at `location` on the given backend.
    ///
    /// # Errors
    ///
    /// - [`Error::Init`] if `location` is empty — checked before any
    ///   backend interaction.
    /// - [`Error::Open`] if the location does not exist and
    ///   `create_if_missing` is false, if it exists and
    ///   `error_if_exists` is true, or if the backend fails to open.
    pub async fn open(
        backend: Arc<dyn Backend>,
        location: impl Into<String>,
        options: OpenOptions,
    ) -> Result<Self> {
        let location = location.into();
        if location.is_empty() {
            return Err(Error::Init(
                "must provide a location for the database".to_string(),
            ));
        }

        let mode = OpenMode {
            create_if_missing: options.create_if_missing,
            error_if_exists: options.error_if_exists,
        };
        let db = backend
            .open(&location, mode)
            .await
            .map_err(|e| Error::Open(e.to_string()))?;

        debug!(location = %location, "database opened");
        Ok(Self {
            location,
            options,
            lifecycle: Lifecycle::open(db),
        })
    }

    /// The location this handle was opened on.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The options snapshot taken at open time.
    pub fn options(&self) -> &OpenOptions {
        &self.options
    }

    /// Returns true while the handle is in the Open state.
    pub async fn is_open(&self) -> bool {
        self.lifecycle.is_open().await
    }

    /// Closes the store, releasing the backend handle.
    ///
    /// Waits for in-flight operations to drain before transitioning;
    /// operations issued after `close` completes fail with a
    /// "not open" error. Close is a one-shot transition: closing an
    /// already-closed handle fails with [`Error::Write`].
    pub async fn close(&self) -> Result<()> {
        match self.lifecycle.transition_closed().await {
            Some(db) => {
                db.close().await.map_err(|e| Error::Write(e.to_string()))?;
                debug!(location = %self.location, "database closed");
                Ok(())
            }
            None => Err(Error::Write(Error::NOT_OPEN.to_string())),
        }
    }

    /// Gets the value stored under `key`.
    ///
    /// The returned value is byte-exact with what was put.
    ///
    /// # Errors
    ///
    /// - [`Error::Read`] if the store is not open or the backend read
    ///   fails.
    /// - [`Error::NotFound`] if the key is absent; the error carries
    ///   the key.
    pub async fn get(&self, key: Bytes) -> Result<Bytes> {
        let state = self.lifecycle.acquire().await;
        let db = state
            .db()
            .ok_or_else(|| Error::Read(Error::NOT_OPEN.to_string()))?;

        let value = db
            .get(&key)
            .await
            .map_err(|e| Error::Read(e.to_string()))?;
        value.ok_or(Error::NotFound(key))
    }

    /// Stores `value` under `key`, overwriting any existing value.
    ///
    /// On success the value is immediately visible to subsequent
    /// `get` calls on this handle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] if the store is not open or the
    /// backend write fails.
    pub async fn put(&self, key: Bytes, value: Bytes) -> Result<()> {
        let state = self.lifecycle.acquire().await;
        let db = state
            .db()
            .ok_or_else(|| Error::Write(Error::NOT_OPEN.to_string()))?;

        db.put(key, value)
            .await
            .map_err(|e| Error::Write(e.to_string()))
    }

    /// Deletes `key`. Deleting an absent key succeeds silently.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] if the store is not open or the
    /// backend delete fails.
    pub async fn delete(&self, key: Bytes) -> Result<()> {
        let state = self.lifecycle.acquire().await;
        let db = state
            .db()
            .ok_or_else(|| Error::Write(Error::NOT_OPEN.to_string()))?;

        db.delete(&key)
            .await
            .map_err(|e| Error::Write(e.to_string()))
    }

    /// Applies `batch` as one atomic unit.
    ///
    /// Either every operation in the batch becomes visible to
    /// subsequent reads or none does; atomicity is delegated to the
    /// backend's atomic write primitive. An empty batch is a no-op,
    /// but still requires the store to be open.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] if the store is not open or the
    /// backend batch write fails.
    pub async fn batch(&self, batch: Batch) -> Result<()> {
        let state = self.lifecycle.acquire().await;
        let db = state
            .db()
            .ok_or_else(|| Error::Write(Error::NOT_OPEN.to_string()))?;

        if batch.is_empty() {
            return Ok(());
        }

        db.write_batch(batch.into_ops())
            .await
            .map_err(|e| Error::Write(e.to_string()))
    }

    /// Creates a Db from an existing backend handle.
    #[cfg(test)]
    pub(crate) fn with_db(db: Arc<dyn backend::BackendDb>) -> Self {
        Self {
            location: "test".to_string(),
            options: OpenOptions::default(),
            lifecycle: Lifecycle::open(db),
        }
    }
}
