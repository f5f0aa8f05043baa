//! Error types for splaymemo

use thiserror::Error;

/// Result type alias for splaymemo operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring a memo backend or addressing its data
///
/// Lookups never fail: a missing key is `None`, not an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// A bounded cache needs room for at least one entry
    #[error("Cache capacity must be greater than 0")]
    ZeroCapacity,

    /// Capacity string was neither a positive integer nor "unbounded"
    #[error("Invalid capacity: {0:?} (expected a positive integer or \"unbounded\")")]
    InvalidCapacity(String),

    /// Array index past the end of the data
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// Offending index
        index: usize,
        /// Length of the data
        len: usize,
    },

    /// Backend name not recognised
    #[error("Unknown memo backend: {0:?} (expected \"splay\" or \"lru\")")]
    UnknownBackend(String),
}
