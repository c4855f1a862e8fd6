//! Error types for the codec crate.

use crate::cell::DataType;
use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// The arena could not satisfy an allocation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("arena allocation of {requested} bytes failed")]
pub struct AllocError {
    /// Number of bytes that were requested.
    pub requested: usize,
}

impl AllocError {
    /// Create an allocation error for a request of `requested` bytes.
    pub const fn new(requested: usize) -> Self {
        Self { requested }
    }
}

/// Errors that can occur while decoding key columns or parsing literals.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Input ended in the middle of a column.
    #[error("unexpected end of input while decoding {data_type} key column")]
    UnexpectedEof {
        /// Type of the column being decoded.
        data_type: DataType,
    },

    /// A `0x00` byte was followed by something other than `0x00` or `0x01`.
    #[error("invalid escape sequence at byte {offset} of a key column")]
    InvalidEscape {
        /// Offset of the offending `0x00`, relative to the column start.
        offset: usize,
    },

    /// A boolean column held a byte other than `0x00` or `0x01`.
    #[error("invalid bool key byte {byte:#04x}")]
    InvalidBool {
        /// The byte that was read.
        byte: u8,
    },

    /// A string column did not hold valid UTF-8.
    #[error("invalid UTF-8 string")]
    InvalidUtf8,

    /// Bytes were left over after the last key column was decoded.
    #[error("{remaining} trailing bytes after the last key column")]
    TrailingBytes {
        /// Number of unconsumed bytes.
        remaining: usize,
    },

    /// A type name did not match any known [`DataType`].
    #[error("unknown data type: {name}")]
    UnknownType {
        /// The name that failed to parse.
        name: String,
    },

    /// A textual literal could not be parsed as the requested type.
    #[error("invalid {data_type} literal: {text:?}")]
    InvalidLiteral {
        /// Target type of the literal.
        data_type: DataType,
        /// The literal text.
        text: String,
    },

    /// The decode arena ran out of memory.
    #[error(transparent)]
    Alloc(#[from] AllocError),
}

impl CodecError {
    /// Create an unexpected end of input error.
    pub fn unexpected_eof(data_type: DataType) -> Self {
        Self::UnexpectedEof { data_type }
    }

    /// Create an invalid escape error.
    pub fn invalid_escape(offset: usize) -> Self {
        Self::InvalidEscape { offset }
    }

    /// Create an unknown type error.
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType { name: name.into() }
    }

    /// Create an invalid literal error.
    pub fn invalid_literal(data_type: DataType, text: impl Into<String>) -> Self {
        Self::InvalidLiteral {
            data_type,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_error_converts() {
        let err: CodecError = AllocError::new(64).into();
        assert_eq!(err, CodecError::Alloc(AllocError { requested: 64 }));
        assert_eq!(err.to_string(), "arena allocation of 64 bytes failed");
    }

    #[test]
    fn eof_names_the_type() {
        let err = CodecError::unexpected_eof(DataType::Int64);
        assert_eq!(
            err.to_string(),
            "unexpected end of input while decoding int64 key column"
        );
    }
}
