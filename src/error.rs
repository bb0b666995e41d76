//! Error types for the hash engine.
//!
//! Valid inputs never fail. Errors only arise where a caller hands the engine
//! a value it cannot represent: a seed or raw state that is too wide for the
//! chosen variant, or a carry buffer that already holds a full block.

use thiserror::Error;

/// Main error type for hashing operations
#[derive(Error, Debug)]
pub enum Error {
    /// A seed, state or name outside what the selected variant accepts
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A carry buffer that violates the incremental-state contract
    #[error("Invalid state: carry holds {len} bytes, but at most {max} are allowed for a {block_size}-byte block", max = .block_size - 1)]
    InvalidState { len: usize, block_size: usize },

    /// Failure reading a stream in `hash_reader`
    #[error("I/O error while hashing: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for hashing operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::debug!(%message, "rejected argument");
        Self::InvalidArgument(message)
    }

    pub(crate) fn invalid_state(len: usize, block_size: usize) -> Self {
        tracing::debug!(len, block_size, "rejected over-long carry");
        Self::InvalidState { len, block_size }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_state(4, 4);
        assert_eq!(
            err.to_string(),
            "Invalid state: carry holds 4 bytes, but at most 3 are allowed for a 4-byte block"
        );

        let err = Error::invalid_argument("seed 4294967296 does not fit in 32 bits");
        assert_eq!(
            err.to_string(),
            "Invalid argument: seed 4294967296 does not fit in 32 bits"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short read");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
