use std::time::{Duration, Instant};

use publishcheck_core::{SchemaProvider, ValueProvider, field_definitions};
use publishcheck_rules::{CompileOptions, Predicate, ValidationSet, compile_validations};
use serde_json::Value;

use crate::errors::{EvalError, Result};
use crate::model::{FieldVerdict, Verdict};

/// Runs full evaluation passes against a host.
#[derive(Debug, Clone, Default)]
pub struct EvaluationEngine {
    options: CompileOptions,
}

impl EvaluationEngine {
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// One pass: read the schema, compile a fresh validation set and evaluate it.
    pub fn run<H>(&self, host: &H) -> Result<Verdict>
    where
        H: SchemaProvider + ValueProvider + ?Sized,
    {
        let started = Instant::now();
        let fields = field_definitions(host);
        tracing::debug!(event = "pass_started", fields = fields.len());

        let compiled = compile_validations(&fields, &self.options).map_err(EvalError::Compile)?;
        for warning in &compiled.warnings {
            tracing::debug!(
                event = "validation_warning",
                code = %warning.code,
                path = %warning.path
            );
        }

        let verdict = evaluate(&compiled.set, host)?;
        tracing::info!(
            event = "pass_finished",
            valid = verdict.valid,
            fields = compiled.set.len(),
            predicates = compiled.set.predicate_count(),
            duration_us = elapsed_micros(started.elapsed())
        );
        Ok(verdict)
    }
}

/// Run one evaluation pass with `options`.
pub fn validate_all<H>(host: &H, options: &CompileOptions) -> Result<Verdict>
where
    H: SchemaProvider + ValueProvider + ?Sized,
{
    EvaluationEngine::new(*options).run(host)
}

/// Evaluate every compiled field against the current entry values.
pub fn evaluate<V: ValueProvider + ?Sized>(set: &ValidationSet, values: &V) -> Result<Verdict> {
    let mut fields = Vec::with_capacity(set.len());

    for field in set.iter() {
        let value = values
            .value(&field.field_id)
            .ok_or_else(|| EvalError::MissingField(field.field_id.clone()))?;
        fields.push(evaluate_field(&field.field_id, &field.predicates, &value)?);
    }

    Ok(Verdict::from_fields(fields))
}

/// Apply every predicate of one field; no predicates means the field passes.
pub fn evaluate_field(
    field_id: &str,
    predicates: &[Predicate],
    value: &Value,
) -> Result<FieldVerdict> {
    let mut failed = Vec::new();

    for (index, predicate) in predicates.iter().enumerate() {
        let passed = predicate
            .test(value)
            .map_err(|source| EvalError::Predicate {
                field: field_id.to_string(),
                index,
                source,
            })?;
        if !passed {
            failed.push(index);
        }
    }

    if !failed.is_empty() {
        tracing::debug!(event = "field_invalid", field = %field_id, failed = ?failed);
    }

    Ok(FieldVerdict {
        field_id: field_id.to_string(),
        valid: failed.is_empty(),
        checked: predicates.len(),
        failed,
    })
}

fn elapsed_micros(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use publishcheck_core::{ContentType, FieldDefinition, FieldType, MemoryEntry};
    use publishcheck_rules::{Bounds, FieldPredicates};
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_predicate_list_is_vacuously_valid() {
        let verdict = evaluate_field("any", &[], &json!({ "nested": true })).expect("evaluate");
        assert!(verdict.valid);
        assert_eq!(verdict.checked, 0);
    }

    #[test]
    fn records_failing_predicate_indexes() {
        let predicates = [
            Predicate::Unique,
            Predicate::Size(Bounds::new(Some(3.0), None)),
            Predicate::Required,
        ];
        let verdict = evaluate_field("title", &predicates, &json!("ab")).expect("evaluate");
        assert!(!verdict.valid);
        assert_eq!(verdict.failed, vec![1]);
        assert_eq!(verdict.checked, 3);
    }

    #[test]
    fn missing_field_aborts_the_pass() {
        let entry = MemoryEntry::new(ContentType {
            fields: vec![FieldDefinition::new("title", FieldType::Text)],
            ..ContentType::default()
        });
        let set = ValidationSet::new(vec![FieldPredicates {
            field_id: "ghost".to_string(),
            predicates: Vec::new(),
        }]);

        let err = evaluate(&set, &entry).expect_err("missing field");
        assert!(matches!(err, EvalError::MissingField(field) if field == "ghost"));
    }

    #[test]
    fn type_mismatch_names_field_and_rule() {
        let range = Predicate::Range {
            bounds: Bounds::default(),
            null_as_zero: true,
        };
        let err = evaluate_field("age", &[range], &json!("old")).expect_err("mismatch");
        assert!(matches!(err, EvalError::Predicate { ref field, index: 0, .. } if field == "age"));
        assert_eq!(
            err.to_string(),
            "field 'age', rule #0: range expects a number value, found string"
        );
    }

    #[test]
    fn pass_duration_saturates() {
        assert_eq!(elapsed_micros(Duration::from_micros(1_500)), 1_500);
        assert_eq!(elapsed_micros(Duration::MAX), u64::MAX);
    }
}
