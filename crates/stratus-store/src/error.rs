//! Error types for stratus-store.

use std::path::PathBuf;

use stratus_types::ParseError;

/// Result type for stratus-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in stratus-store.
///
/// Routing and translation failures (`UnknownResource`, `BadRequest`)
/// are raised before any database I/O. Store-level failures propagate
/// as `ConstraintViolation` or `Database`; nothing is retried or
/// swallowed at this layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The identifier matched none of the known route shapes.
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// A route-specific argument is malformed.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A write would violate a uniqueness or referential invariant.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Database error from SQLite.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Failed to create database directory.
    #[error("Failed to create database directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        // Malformed identifier components are caller mistakes, not
        // store failures.
        Error::BadRequest(e.to_string())
    }
}

/// Whether an SQLite error reports a violated uniqueness or
/// referential constraint.
pub(crate) fn is_constraint_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(f, _)
            if f.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_maps_to_bad_request() {
        let err: Error = ParseError::InvalidDate("junk".to_string()).into();
        assert!(matches!(err, Error::BadRequest(_)));
        assert!(err.to_string().contains("junk"));
    }

    #[test]
    fn test_unknown_resource_names_the_uri() {
        let err = Error::UnknownResource("content://x/y".to_string());
        assert!(err.to_string().contains("content://x/y"));
    }
}
