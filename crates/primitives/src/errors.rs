//! Errors during parsing/handling/conversion of primitives.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid base32 encoding: {0}")]
    InvalidBase32(String),

    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("address checksum mismatch for {0}")]
    ChecksumMismatch(String),

    #[error("not an integer: {0}")]
    InvalidInteger(String),
}
