//! Error taxonomy for store operations.

use bytes::Bytes;

/// Error type for store operations.
///
/// Every failure surfaced by the store is exactly one of these kinds,
/// created at the point of failure and owned by the caller. Backend
/// faults are wrapped verbatim into the kind matching the failed
/// operation; the store never retries on the caller's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed call detected before any backend interaction.
    Init(String),

    /// Open-time precondition violated, or the backend failed to open.
    Open(String),

    /// Failure during a read, distinct from [`Error::NotFound`].
    Read(String),

    /// Failure during a put, delete, batch, or close.
    Write(String),

    /// The key is absent from the store. Carries the offending key.
    NotFound(Bytes),
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Init(msg) => write!(f, "Initialization error: {}", msg),
            Error::Open(msg) => write!(f, "Open error: {}", msg),
            Error::Read(msg) => write!(f, "Read error: {}", msg),
            Error::Write(msg) => write!(f, "Write error: {}", msg),
            Error::NotFound(key) => write!(
                f,
                "Key not found in database [{}]",
                String::from_utf8_lossy(key)
            ),
        }
    }
}

impl Error {
    /// Message used by every operation rejected because the store is
    /// not in the Open state.
    pub(crate) const NOT_OPEN: &'static str = "database is not open";
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, Error>;
