use std::collections::BTreeSet;

use jsonschema::JSONSchema;
use schemars::schema::RootSchema;
use schemars::schema_for;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::issues::{ValidationIssue, ValidationReport};
use crate::schema::ContentType;

/// Emit the JSON Schema for content type documents.
pub fn content_type_json_schema() -> RootSchema {
    schema_for!(ContentType)
}

/// Validate internal consistency of a content type.
///
/// This checks:
/// - every field has a non-empty id
/// - field ids are unique
pub fn check_content_type(content_type: &ContentType) -> Result<()> {
    let mut seen = BTreeSet::new();

    for (idx, field) in content_type.fields.iter().enumerate() {
        if field.id.trim().is_empty() {
            return Err(Error::InvalidSchema(format!("field {idx} has an empty id")));
        }

        if !seen.insert(field.id.as_str()) {
            return Err(Error::InvalidSchema(format!(
                "duplicate field id: {}",
                field.id
            )));
        }
    }

    Ok(())
}

/// Validate a content type JSON document against a JSON Schema.
pub fn validate_content_type_json(
    content_type_json: &Value,
    content_type_schema: &Value,
) -> Result<ValidationReport> {
    let compiled = JSONSchema::compile(content_type_schema)
        .map_err(|err| Error::Schema(err.to_string()))?;

    let mut report = ValidationReport::default();

    if let Err(errors) = compiled.validate(content_type_json) {
        for error in errors {
            let path = normalized_json_pointer(&error.instance_path.to_string());
            report.push_error(ValidationIssue::error(
                "schema_violation",
                path,
                error.to_string(),
            ));
        }
    }

    Ok(report)
}

/// Parse a content type document, running the structural check first.
pub fn parse_content_type(content_type_json: &Value) -> Result<ContentType> {
    let schema = serde_json::to_value(content_type_json_schema())?;
    let report = validate_content_type_json(content_type_json, &schema)?;
    if let Some(issue) = report.errors.first() {
        return Err(Error::InvalidSchema(format!(
            "{} at {}: {}",
            issue.code, issue.path, issue.message
        )));
    }

    let content_type: ContentType = serde_json::from_value(content_type_json.clone())?;
    check_content_type(&content_type)?;
    tracing::debug!(
        event = "content_type_loaded",
        fields = content_type.fields.len()
    );
    Ok(content_type)
}

fn normalized_json_pointer(pointer: &str) -> String {
    if pointer.is_empty() {
        "/".to_string()
    } else {
        pointer.to_string()
    }
}
