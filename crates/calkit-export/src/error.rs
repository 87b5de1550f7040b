//! Export error types.

use thiserror::Error;

/// Result type for export and import operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors from reading or writing event exports.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Malformed JSON, or an array element that is not an event.
    #[error("invalid event JSON: {0}")]
    Json(#[from] serde_json::Error),
}
