//! Error types for parsing identifiers and dates in stratus-types.

use thiserror::Error;

/// Errors that can occur when parsing stratus vocabulary types.
///
/// This error type is storage-agnostic; database and routing errors
/// belong in stratus-store.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The string is not a well-formed resource identifier.
    #[error("Invalid resource identifier: {0}")]
    InvalidUri(String),

    /// The string is not a `YYYY-MM-DD` calendar day.
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Result type alias using stratus-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
