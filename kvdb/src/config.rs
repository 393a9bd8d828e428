//! Configuration options for opening a store.

/// Options recognized when opening a [`Db`](crate::Db).
///
/// The options are snapshotted on the handle at open time and never
/// change afterwards; [`Db::options`](crate::Db::options) exposes the
/// snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenOptions {
    /// Create the backing storage if the location does not exist yet.
    /// Default: false.
    pub create_if_missing: bool,
    /// Fail the open if the backing storage already exists.
    /// Default: false.
    pub error_if_exists: bool,
}
