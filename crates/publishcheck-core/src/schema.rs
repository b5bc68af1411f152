use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::FieldType;

/// Declaration key carrying a custom error text rather than a validation kind.
pub const MESSAGE_KEY: &str = "message";

/// Content type snapshot as delivered by the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentType {
    /// Content type identifier when the host provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name of the content type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Field id used as the entry title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_field: Option<String>,
    /// Fields in schema order.
    pub fields: Vec<FieldDefinition>,
}

impl ContentType {
    /// Look up a field definition by id.
    pub fn field(&self, id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.id == id)
    }
}

/// One named, typed attribute of an entry together with its declared validations.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    /// Validation declarations in the order they appear on the schema.
    #[serde(default)]
    pub validations: Vec<ValidationDeclaration>,
    #[serde(default)]
    pub localized: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub omitted: bool,
}

impl FieldDefinition {
    /// Minimal definition, mostly useful for fixtures.
    pub fn new(id: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            name: None,
            field_type,
            required: false,
            validations: Vec::new(),
            localized: false,
            disabled: false,
            omitted: false,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_validation(mut self, declaration: ValidationDeclaration) -> Self {
        self.validations.push(declaration);
        self
    }
}

/// A single raw validation declaration (e.g. `{"size": {"min": 5}}`).
///
/// Keys are kept uninterpreted; the rule compiler decides which ones it knows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ValidationDeclaration(pub Map<String, Value>);

impl ValidationDeclaration {
    /// Build a declaration with exactly one key.
    pub fn single(kind: impl Into<String>, config: Value) -> Self {
        let mut map = Map::new();
        map.insert(kind.into(), config);
        Self(map)
    }

    /// Configuration stored under `kind`, if declared.
    pub fn get(&self, kind: &str) -> Option<&Value> {
        self.0.get(kind)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.0.contains_key(kind)
    }

    /// Declared keys, excluding the custom `message` text.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|key| *key != MESSAGE_KEY)
    }

    /// Custom error text attached to the declaration.
    pub fn message(&self) -> Option<&str> {
        self.0.get(MESSAGE_KEY).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for ValidationDeclaration {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}
