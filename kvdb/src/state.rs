//! Lifecycle state machine for a store handle.
//!
//! Every data operation read-locks the state, checks that it is
//! `Open`, and keeps the guard for the duration of the backend call.
//! `close` takes the write lock, which waits for all in-flight
//! operations to drain, then swaps the state to `Closed` — so no
//! operation ever runs against a half-closed backend, and an
//! operation issued after `close` completes deterministically
//! observes `Closed`.

use std::sync::Arc;

use backend::BackendDb;
use tokio::sync::{RwLock, RwLockReadGuard};

/// Lifecycle state of a store handle.
///
/// The transient Opening and Closing phases are realized as lock
/// ownership windows rather than variants: Opening happens inside
/// [`Db::open`](crate::Db::open) before the handle exists, Closing
/// while `close` holds the write lock.
pub(crate) enum State {
    Open(Arc<dyn BackendDb>),
    Closed,
}

impl State {
    /// Returns the backend handle if the store is open.
    pub(crate) fn db(&self) -> Option<&Arc<dyn BackendDb>> {
        match self {
            State::Open(db) => Some(db),
            State::Closed => None,
        }
    }
}

pub(crate) struct Lifecycle {
    state: RwLock<State>,
}

impl Lifecycle {
    /// Creates a lifecycle already in the Open state, owning `db`.
    pub(crate) fn open(db: Arc<dyn BackendDb>) -> Self {
        Self {
            state: RwLock::new(State::Open(db)),
        }
    }

    /// Acquires the state for the duration of one operation.
    ///
    /// Hold the returned guard across the backend call: `close` cannot
    /// transition the state while any guard is alive.
    pub(crate) async fn acquire(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().await
    }

    /// Pure state query; never fails.
    pub(crate) async fn is_open(&self) -> bool {
        matches!(*self.state.read().await, State::Open(_))
    }

    /// Transitions Open → Closed, draining in-flight operations first.
    ///
    /// Returns the backend handle so the caller can close it after the
    /// lock is released, or `None` if the store was already closed.
    pub(crate) async fn transition_closed(&self) -> Option<Arc<dyn BackendDb>> {
        let mut state = self.state.write().await;
        match std::mem::replace(&mut *state, State::Closed) {
            State::Open(db) => Some(db),
            State::Closed => None,
        }
    }
}
