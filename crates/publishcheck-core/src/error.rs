use thiserror::Error;

/// Core error type shared across publishcheck crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The content type violates internal invariants.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
    /// The JSON Schema for content types could not be compiled.
    #[error("schema error: {0}")]
    Schema(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results returned by publishcheck crates.
pub type Result<T> = std::result::Result<T, Error>;
