use std::path::Path;

use publishcheck_core::{ContentType, parse_content_type};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::CliError;

/// One line of a change script for `replay`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Change {
    pub field: String,
    #[serde(default)]
    pub value: Value,
}

pub fn load_json(path: &Path) -> Result<Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let json = serde_json::from_str(&contents)?;
    Ok(json)
}

pub fn load_content_type(path: &Path) -> Result<ContentType, CliError> {
    let json = load_json(path)?;
    Ok(parse_content_type(&json)?)
}

/// Load entry values keyed by field id.
///
/// Accepts either an entry document (`{"fields": {...}}`) or a flat map of
/// values. With `locale`, localized values (`{"en-US": ...}`) are unwrapped
/// and values without that locale read as null.
pub fn load_entry_values(
    path: &Path,
    content_type: &ContentType,
    locale: Option<&str>,
) -> Result<Map<String, Value>, CliError> {
    let json = load_json(path)?;
    entry_values(json, content_type, locale)
}

pub fn entry_values(
    json: Value,
    content_type: &ContentType,
    locale: Option<&str>,
) -> Result<Map<String, Value>, CliError> {
    let Value::Object(mut object) = json else {
        return Err(CliError::InvalidInput(
            "entry must be a JSON object".to_string(),
        ));
    };

    // An entry document wraps values in `fields`, unless the content type
    // itself declares a field named `fields`.
    let wrapped = content_type.field("fields").is_none()
        && matches!(object.get("fields"), Some(Value::Object(_)));
    if wrapped {
        if let Some(Value::Object(fields)) = object.remove("fields") {
            object = fields;
        }
    }

    let Some(locale) = locale else {
        return Ok(object);
    };

    Ok(object
        .into_iter()
        .map(|(field, value)| {
            let value = match value {
                Value::Object(mut localized) if localized.contains_key(locale) => {
                    localized.remove(locale).unwrap_or(Value::Null)
                }
                Value::Object(_) => Value::Null,
                other => other,
            };
            (field, value)
        })
        .collect())
}

/// Parse a JSON-lines change script; blank lines are skipped.
pub fn parse_changes(contents: &str) -> Result<Vec<Change>, CliError> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|err| {
                CliError::InvalidInput(format!("change line {}: {err}", idx + 1))
            })
        })
        .collect()
}

pub fn load_changes(path: &Path) -> Result<Vec<Change>, CliError> {
    let contents = std::fs::read_to_string(path)?;
    parse_changes(&contents)
}
