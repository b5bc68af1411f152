use std::fmt;

use schemars::JsonSchema;
use schemars::r#gen::SchemaGenerator;
use schemars::schema::Schema;
use serde::{Deserialize, Serialize};

/// Declared type tag of a content type field.
///
/// Type names the host may add later are kept verbatim in [`FieldType::Other`]
/// so they round-trip through serialization unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Symbol,
    Text,
    RichText,
    Integer,
    Float,
    Boolean,
    Date,
    Location,
    Object,
    Link,
    Array,
    Other(String),
}

impl FieldType {
    /// Host name of the type (e.g. `Symbol`).
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Symbol => "Symbol",
            FieldType::Text => "Text",
            FieldType::RichText => "RichText",
            FieldType::Integer => "Integer",
            FieldType::Float => "Float",
            FieldType::Boolean => "Boolean",
            FieldType::Date => "Date",
            FieldType::Location => "Location",
            FieldType::Object => "Object",
            FieldType::Link => "Link",
            FieldType::Array => "Array",
            FieldType::Other(name) => name.as_str(),
        }
    }

    /// Short and long text fields, validated with the string rule set.
    pub fn is_string_like(&self) -> bool {
        matches!(self, FieldType::Symbol | FieldType::Text)
    }

    /// Integer and decimal fields, validated with the number rule set.
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Integer | FieldType::Float)
    }
}

impl From<String> for FieldType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Symbol" => FieldType::Symbol,
            "Text" => FieldType::Text,
            "RichText" => FieldType::RichText,
            "Integer" => FieldType::Integer,
            "Float" => FieldType::Float,
            "Boolean" => FieldType::Boolean,
            "Date" => FieldType::Date,
            "Location" => FieldType::Location,
            "Object" => FieldType::Object,
            "Link" => FieldType::Link,
            "Array" => FieldType::Array,
            _ => FieldType::Other(value),
        }
    }
}

impl From<&str> for FieldType {
    fn from(value: &str) -> Self {
        FieldType::from(value.to_string())
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        match value {
            FieldType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl JsonSchema for FieldType {
    fn schema_name() -> String {
        "FieldType".to_string()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        String::json_schema(generator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_type_names_round_trip() {
        let parsed: FieldType = serde_json::from_str("\"Markdown\"").expect("parse type");
        assert_eq!(parsed, FieldType::Other("Markdown".to_string()));
        assert_eq!(
            serde_json::to_string(&parsed).expect("serialize type"),
            "\"Markdown\""
        );
    }

    #[test]
    fn dispatch_groups() {
        assert!(FieldType::Symbol.is_string_like());
        assert!(FieldType::Text.is_string_like());
        assert!(!FieldType::RichText.is_string_like());
        assert!(FieldType::Integer.is_numeric());
        assert!(FieldType::Float.is_numeric());
        assert!(!FieldType::Boolean.is_numeric());
        assert!(!FieldType::from("Integer ").is_numeric());
    }
}
