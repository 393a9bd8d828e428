//! An embedded, asynchronous key-value store.
//!
//! `kvdb` provides durable, ordered key-value storage as a library
//! embedded directly in the application process: no separate database
//! server, no wire protocol. It layers a lifecycle state machine, an
//! atomic batch engine, and a precise error taxonomy over an abstract
//! byte-string substrate (the [`backend`] crate's traits), which
//! supplies the physical storage.
//!
//! # Key Concepts
//!
//! - **[`Db`]**: a handle onto one opened store; all operations are
//!   async and safe to issue concurrently from multiple tasks.
//! - **[`Batch`]**: an ordered list of put/delete operations applied
//!   atomically — all become visible together, or none do.
//! - **[`Error`]**: every failure is one of five typed kinds, so
//!   callers can match narrowly (e.g. [`Error::NotFound`]) or handle
//!   broadly via `std::error::Error`.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use backend::memory::MemoryBackend;
//! use bytes::Bytes;
//! use kvdb::{Batch, Db, OpenOptions};
//!
//! let backend = Arc::new(MemoryBackend::new());
//! let options = OpenOptions {
//!     create_if_missing: true,
//!     ..OpenOptions::default()
//! };
//! let db = Db::open(backend, "users", options).await?;
//!
//! // Single-key operations
//! db.put(Bytes::from("user:123"), Bytes::from("alice")).await?;
//! let value = db.get(Bytes::from("user:123")).await?;
//! assert_eq!(value, Bytes::from("alice"));
//!
//! // Atomic multi-operation batch
//! let batch = Batch::new()
//!     .put(Bytes::from("user:456"), Bytes::from("bob"))
//!     .delete(Bytes::from("user:123"));
//! db.batch(batch).await?;
//!
//! db.close().await?;
//! ```

mod batch;
mod config;
mod db;
mod error;
mod state;

pub use batch::Batch;
pub use config::OpenOptions;
pub use db::Db;
pub use error::{Error, Result};
