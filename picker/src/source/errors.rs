use thiserror::Error;

/// Errors emitted while fetching and decoding selector data.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("item selector source IO failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("item selector payload is not valid: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unexpected {table} columns: {found:?}")]
    UnexpectedColumns {
        table: &'static str,
        found: Vec<String>,
    },
    #[error("{message}")]
    Unavailable { message: String },
}
