use std::fmt;

use serde_json::Value;

use crate::errors::PredicateError;
use crate::model::{Bounds, CompileOptions, Rule};
use crate::pattern::{JsPattern, PatternError};

/// A compiled check applied to one field value.
///
/// Predicates are stateless; testing the same value twice gives the same answer.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Always passes.
    Unique,
    /// String length, counted in UTF-16 code units, within bounds.
    Size(Bounds),
    /// String must not match the pattern anywhere.
    ProhibitRegexp(JsPattern),
    /// Number within bounds. With `null_as_zero`, null is compared as `0`.
    Range { bounds: Bounds, null_as_zero: bool },
    /// Value is not null.
    Required,
}

impl Predicate {
    /// Compile a parsed rule.
    pub fn compile(rule: &Rule, options: &CompileOptions) -> Result<Self, PatternError> {
        let bounds = |bounds: &Bounds| {
            if options.zero_bound_is_absent {
                bounds.without_zero()
            } else {
                *bounds
            }
        };

        let predicate = match rule {
            Rule::Unique => Predicate::Unique,
            Rule::Size(declared) => Predicate::Size(bounds(declared)),
            Rule::ProhibitRegexp(config) => Predicate::ProhibitRegexp(JsPattern::compile(config)?),
            Rule::Range(declared) => Predicate::Range {
                bounds: bounds(declared),
                null_as_zero: options.null_range_value_is_zero,
            },
            Rule::Required => Predicate::Required,
        };
        Ok(predicate)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Predicate::Unique => "unique",
            Predicate::Size(_) => "size",
            Predicate::ProhibitRegexp(_) => "prohibitRegexp",
            Predicate::Range { .. } => "range",
            Predicate::Required => "required",
        }
    }

    /// Apply the predicate to a field value.
    ///
    /// Null passes `size` and `prohibitRegexp`. Under `range` it passes or is
    /// compared as `0`, depending on how the predicate was compiled.
    pub fn test(&self, value: &Value) -> Result<bool, PredicateError> {
        match self {
            Predicate::Unique => Ok(true),
            Predicate::Required => Ok(!value.is_null()),
            Predicate::Size(bounds) => match value {
                Value::Null => Ok(true),
                Value::String(text) => Ok(bounds.contains(text.encode_utf16().count() as f64)),
                Value::Array(items) => Ok(bounds.contains(items.len() as f64)),
                other => Err(self.mismatch("string", other)),
            },
            Predicate::ProhibitRegexp(pattern) => match value {
                Value::Null => Ok(true),
                Value::String(text) => pattern
                    .is_match(text)
                    .map(|found| !found)
                    .map_err(|err| PredicateError::Match {
                        rule: self.name(),
                        reason: err.to_string(),
                    }),
                other => Err(self.mismatch("string", other)),
            },
            Predicate::Range {
                bounds,
                null_as_zero,
            } => match value {
                Value::Null if *null_as_zero => Ok(bounds.contains(0.0)),
                Value::Null => Ok(true),
                Value::Number(number) => match number.as_f64() {
                    Some(number) => Ok(bounds.contains(number)),
                    None => Err(self.mismatch("number", value)),
                },
                other => Err(self.mismatch("number", other)),
            },
        }
    }

    fn mismatch(&self, expected: &'static str, found: &Value) -> PredicateError {
        PredicateError::TypeMismatch {
            rule: self.name(),
            expected,
            found: value_kind(found),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Unique => f.write_str("unique (always passes)"),
            Predicate::Size(bounds) => write!(f, "length {bounds}"),
            Predicate::ProhibitRegexp(pattern) => write!(f, "must not match {pattern}"),
            Predicate::Range { bounds, .. } => write!(f, "value {bounds}"),
            Predicate::Required => f.write_str("not null"),
        }
    }
}

/// JSON type name of a value, for diagnostics.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
