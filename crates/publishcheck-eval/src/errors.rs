use publishcheck_core::Error as CoreError;
use publishcheck_rules::{PredicateError, ValidationReport};
use thiserror::Error;

/// Errors that abort an evaluation pass.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("validation declarations could not be compiled: {0}")]
    Compile(ValidationReport),
    #[error("entry has no field '{0}'")]
    MissingField(String),
    #[error("field '{field}', rule #{index}: {source}")]
    Predicate {
        field: String,
        index: usize,
        #[source]
        source: PredicateError,
    },
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

/// Result type for evaluation passes.
pub type Result<T> = std::result::Result<T, EvalError>;
