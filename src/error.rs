//! Engine error type.
//!
//! Every fallible operation in this crate returns [`EngineError`], so callers
//! do not need to depend on Polars error types.

use polars::error::PolarsError;
use thiserror::Error;

/// Unified error type for sparkless-quinn operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// User-facing error (invalid input, schema violation, unsupported operation).
    #[error("user error: {0}")]
    User(String),
    /// Internal / compute error.
    #[error("internal error: {0}")]
    Internal(String),
    /// I/O error (config file not found, permission, etc.).
    #[error("io error: {0}")]
    Io(String),
    /// Resource not found (usually a column).
    #[error("not found: {0}")]
    NotFound(String),
    /// Other / unclassified.
    #[error("{0}")]
    Other(String),
}

impl From<PolarsError> for EngineError {
    fn from(e: PolarsError) -> Self {
        let msg = e.to_string();
        match &e {
            PolarsError::ColumnNotFound(_) => EngineError::NotFound(msg),
            PolarsError::InvalidOperation(_) | PolarsError::SchemaMismatch(_) => {
                EngineError::User(msg)
            }
            PolarsError::ComputeError(_) => EngineError::Internal(msg),
            PolarsError::IO { .. } => EngineError::Io(msg),
            _ => EngineError::Other(msg),
        }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::Internal(e.to_string())
    }
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_not_found_maps_to_not_found() {
        let err: EngineError = PolarsError::ColumnNotFound("age".into()).into();
        assert!(matches!(err, EngineError::NotFound(_)));
        assert!(err.to_string().starts_with("not found:"));
    }

    #[test]
    fn invalid_operation_maps_to_user() {
        let err: EngineError = PolarsError::InvalidOperation("bad cast".into()).into();
        assert!(matches!(err, EngineError::User(_)));
    }

    #[test]
    fn io_error_maps_to_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
        let err: EngineError = io.into();
        assert!(matches!(err, EngineError::Io(ref s) if s.contains("missing.json")));
    }

    #[test]
    fn other_display_is_bare_message() {
        assert_eq!(EngineError::Other("boom".into()).to_string(), "boom");
    }
}
