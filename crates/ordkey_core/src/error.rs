//! Error types for ordkey core.

use ordkey_codec::{AllocError, CodecError};
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while decoding keys or computing successors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The arena could not provide decode scratch memory.
    #[error("out of memory: {0}")]
    OutOfMemory(#[from] AllocError),

    /// A key column failed to decode.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Every byte of the key is already `0xff`.
    ///
    /// Callers should treat the original key as an unbounded upper edge.
    #[error("no lexicographically greater key exists")]
    NoSuccessor,

    /// A schema definition was rejected.
    #[error("invalid schema: {message}")]
    InvalidSchema {
        /// Description of the problem.
        message: String,
    },
}

impl CoreError {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Self::InvalidSchema {
            message: message.into(),
        }
    }

    /// Returns true if memory ran out, either for the decode scratch row or
    /// for a decoded variable-length value.
    pub fn is_out_of_memory(&self) -> bool {
        matches!(
            self,
            Self::OutOfMemory(_) | Self::Codec(CodecError::Alloc(_))
        )
    }

    /// Returns true for [`CoreError::NoSuccessor`].
    pub fn is_no_successor(&self) -> bool {
        matches!(self, Self::NoSuccessor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_oom_paths_are_detected() {
        assert!(CoreError::from(AllocError::new(8)).is_out_of_memory());
        assert!(CoreError::from(CodecError::Alloc(AllocError::new(8))).is_out_of_memory());
        assert!(!CoreError::from(CodecError::InvalidUtf8).is_out_of_memory());
    }

    #[test]
    fn no_successor_display() {
        let err = CoreError::NoSuccessor;
        assert!(err.is_no_successor());
        assert_eq!(err.to_string(), "no lexicographically greater key exists");
    }
}
