use serde::{Deserialize, Serialize};

/// Outcome of checking one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldVerdict {
    pub field_id: String,
    /// True when every predicate passed, or the field has none.
    pub valid: bool,
    /// Number of predicates applied.
    pub checked: usize,
    /// Indexes of the predicates that returned false.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<usize>,
}

/// Aggregate publishability decision for an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// True iff every field verdict is valid.
    pub valid: bool,
    /// Per-field verdicts in schema order.
    pub fields: Vec<FieldVerdict>,
}

impl Verdict {
    /// Reduce field verdicts into the aggregate verdict.
    pub fn from_fields(fields: Vec<FieldVerdict>) -> Self {
        let valid = fields.iter().all(|field| field.valid);
        Self { valid, fields }
    }

    pub fn field(&self, field_id: &str) -> Option<&FieldVerdict> {
        self.fields.iter().find(|field| field.field_id == field_id)
    }

    /// Fields with at least one failing predicate.
    pub fn failed_fields(&self) -> impl Iterator<Item = &FieldVerdict> {
        self.fields.iter().filter(|field| !field.valid)
    }
}
