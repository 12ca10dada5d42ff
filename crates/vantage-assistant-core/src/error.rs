//! Assistant errors

use thiserror::Error;

/// Assistant errors
#[derive(Error, Debug)]
pub enum AssistantError {
    /// The query payload carried a kind no cast exists for.
    /// This signals a programming error (the query hierarchies drifted),
    /// not a recoverable runtime condition.
    #[error("unsupported query kind: {0}")]
    UnsupportedQueryKind(String),

    /// The query payload did not deserialize as the shape its kind claims
    #[error("invalid query payload: {0}")]
    InvalidQuery(#[from] serde_json::Error),
}
