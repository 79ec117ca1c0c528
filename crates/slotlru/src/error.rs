//! Error types for slotlru

use std::fmt;

/// Result type alias for slotlru operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Capacity of zero leaves no entry slot besides the sentinel
    ZeroCapacity,

    /// Capacity does not fit the slot id range (max `u32::MAX - 1`)
    CapacityTooLarge(u64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ZeroCapacity => write!(f, "Cache capacity must be greater than 0"),
            Error::CapacityTooLarge(capacity) => write!(
                f,
                "Cache capacity too large: {} (max {})",
                capacity,
                crate::config::MAX_CAPACITY
            ),
        }
    }
}

impl std::error::Error for Error {}
