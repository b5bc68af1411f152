use thiserror::Error;

pub use publishcheck_core::{IssueSeverity, ValidationIssue, ValidationReport};

/// Failure while applying a compiled predicate to a field value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredicateError {
    #[error("{rule} expects a {expected} value, found {found}")]
    TypeMismatch {
        rule: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("{rule} could not finish matching: {reason}")]
    Match { rule: &'static str, reason: String },
}
