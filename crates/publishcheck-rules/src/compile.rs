use publishcheck_core::{FieldDefinition, FieldType, ValidationDeclaration};

use crate::errors::{ValidationIssue, ValidationReport};
use crate::model::{CompileOptions, Rule, RuleKind};
use crate::pattern::PatternError;
use crate::predicate::Predicate;

/// Ordered predicates compiled for one field.
#[derive(Debug, Clone)]
pub struct FieldPredicates {
    pub field_id: String,
    pub predicates: Vec<Predicate>,
}

/// Compiled predicates for every field of a content type.
///
/// Built fresh for each evaluation pass and not modified afterwards.
#[derive(Debug, Clone, Default)]
pub struct ValidationSet {
    fields: Vec<FieldPredicates>,
}

impl ValidationSet {
    pub fn new(fields: Vec<FieldPredicates>) -> Self {
        Self { fields }
    }

    /// Predicates for `field_id`, if the field was compiled.
    pub fn get(&self, field_id: &str) -> Option<&[Predicate]> {
        self.fields
            .iter()
            .find(|field| field.field_id == field_id)
            .map(|field| field.predicates.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldPredicates> {
        self.fields.iter()
    }

    /// Number of fields in the set.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total number of predicates across all fields.
    pub fn predicate_count(&self) -> usize {
        self.fields.iter().map(|field| field.predicates.len()).sum()
    }
}

/// Compiled validation set with accumulated warnings.
#[derive(Debug, Clone)]
pub struct CompiledValidations {
    pub set: ValidationSet,
    pub warnings: Vec<ValidationIssue>,
}

/// Kinds the compiler interprets for a field type.
pub fn recognized_kinds(field_type: &FieldType) -> &'static [RuleKind] {
    if field_type.is_string_like() {
        RuleKind::STRING
    } else if field_type.is_numeric() {
        RuleKind::NUMBER
    } else {
        &[]
    }
}

/// Parse the rules declared on a field, type-specific rules first, then shared ones.
///
/// Declarations are processed in order; within one declaration recognized
/// kinds follow the order of [`recognized_kinds`]. Unrecognized kinds are
/// recorded as warnings and otherwise ignored.
pub fn field_rules(field: &FieldDefinition, report: &mut ValidationReport) -> Vec<Rule> {
    located_rules(field, report)
        .into_iter()
        .map(|(rule, _)| rule)
        .collect()
}

fn located_rules(field: &FieldDefinition, report: &mut ValidationReport) -> Vec<(Rule, String)> {
    let kinds = recognized_kinds(&field.field_type);
    let mut rules = Vec::new();

    for (idx, declaration) in field.validations.iter().enumerate() {
        let base_path = declaration_path(field, idx);

        for kind in kinds {
            let Some(config) = declaration.get(kind.key()) else {
                continue;
            };
            let path = format!("{base_path}/{}", kind.key());
            match Rule::parse(*kind, config) {
                Ok(rule) => rules.push((rule, path)),
                Err(err) => report.push_error(
                    ValidationIssue::error(
                        "malformed_validation",
                        path,
                        format!(
                            "field '{}': invalid {} configuration: {err}",
                            field.id,
                            kind.key()
                        ),
                    )
                    .with_hint(config_hint(*kind)),
                ),
            }
        }

        push_unrecognized(field, declaration, kinds, &base_path, report);
    }

    let shared_path = format!("/fields/{}/required", field.id);
    rules.extend(
        shared_rules(field)
            .into_iter()
            .map(|rule| (rule, shared_path.clone())),
    );
    rules
}

/// Rules applied to every field regardless of its type.
pub fn shared_rules(field: &FieldDefinition) -> Vec<Rule> {
    let mut rules = Vec::new();
    if field.required {
        rules.push(Rule::Required);
    }
    rules
}

/// Compile a single field into its ordered predicate list.
pub fn compile_field(
    field: &FieldDefinition,
    options: &CompileOptions,
) -> Result<Vec<Predicate>, ValidationReport> {
    let mut report = ValidationReport::default();
    let predicates = compile_field_into(field, options, &mut report);
    if report.is_ok() {
        Ok(predicates)
    } else {
        Err(report)
    }
}

/// Compile every field, collecting all issues before giving up.
pub fn compile_validations(
    fields: &[FieldDefinition],
    options: &CompileOptions,
) -> Result<CompiledValidations, ValidationReport> {
    let mut report = ValidationReport::default();

    let compiled = fields
        .iter()
        .map(|field| FieldPredicates {
            field_id: field.id.clone(),
            predicates: compile_field_into(field, options, &mut report),
        })
        .collect();

    if !report.is_ok() {
        tracing::debug!(
            event = "compile_failed",
            errors = report.errors.len(),
            warnings = report.warnings.len()
        );
        return Err(report);
    }

    let set = ValidationSet::new(compiled);
    tracing::debug!(
        event = "compiled",
        fields = set.len(),
        predicates = set.predicate_count(),
        warnings = report.warnings.len()
    );

    Ok(CompiledValidations {
        set,
        warnings: report.warnings,
    })
}

fn compile_field_into(
    field: &FieldDefinition,
    options: &CompileOptions,
    report: &mut ValidationReport,
) -> Vec<Predicate> {
    let rules = located_rules(field, report);
    let mut predicates = Vec::with_capacity(rules.len());

    for (rule, path) in rules {
        match Predicate::compile(&rule, options) {
            Ok(predicate) => predicates.push(predicate),
            Err(PatternError::Flags(reason)) => report.push_error(
                ValidationIssue::error(
                    "invalid_flags",
                    path,
                    format!("field '{}': {reason}", field.id),
                )
                .with_hint("supported flags are i, m, s, u, g and y"),
            ),
            Err(PatternError::Pattern(reason)) => report.push_error(ValidationIssue::error(
                "invalid_pattern",
                path,
                format!("field '{}': {reason}", field.id),
            )),
        }
    }

    predicates
}

fn push_unrecognized(
    field: &FieldDefinition,
    declaration: &ValidationDeclaration,
    kinds: &[RuleKind],
    base_path: &str,
    report: &mut ValidationReport,
) {
    for key in declaration.kinds() {
        if kinds.iter().any(|kind| kind.key() == key) {
            continue;
        }
        tracing::debug!(
            event = "validation_ignored",
            field = %field.id,
            kind = %key,
            field_type = %field.field_type
        );
        report.push_warning(ValidationIssue::warning(
            "unrecognized_validation",
            format!("{base_path}/{key}"),
            format!(
                "field '{}': '{key}' is not checked for {} fields",
                field.id, field.field_type
            ),
        ));
    }
}

fn declaration_path(field: &FieldDefinition, idx: usize) -> String {
    format!("/fields/{}/validations/{idx}", field.id)
}

fn config_hint(kind: RuleKind) -> &'static str {
    match kind {
        RuleKind::Unique => "use `\"unique\": true`",
        RuleKind::Size | RuleKind::Range => "expected an object with numeric `min` and/or `max`",
        RuleKind::ProhibitRegexp => "expected an object with a string `pattern` and optional `flags`",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::Bounds;

    fn field(field_type: FieldType, validations: serde_json::Value) -> FieldDefinition {
        let mut field = FieldDefinition::new("field", field_type);
        field.validations =
            serde_json::from_value(validations).expect("parse validation declarations");
        field
    }

    #[test]
    fn string_fields_use_string_rules_then_shared() {
        let field = field(
            FieldType::Symbol,
            json!([
                { "unique": true },
                { "size": { "min": 5, "max": 10 } },
                { "prohibitRegexp": { "pattern": "x" } }
            ]),
        )
        .required(true);

        let mut report = ValidationReport::default();
        let rules = field_rules(&field, &mut report);
        let names: Vec<&str> = rules.iter().map(Rule::name).collect();
        assert_eq!(names, vec!["unique", "size", "prohibitRegexp", "required"]);
        assert!(report.is_ok());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn number_fields_only_use_range() {
        let field = field(
            FieldType::Float,
            json!([{ "range": { "max": 2.5 } }, { "size": { "max": 1 } }]),
        );

        let mut report = ValidationReport::default();
        let rules = field_rules(&field, &mut report);
        assert_eq!(rules, vec![Rule::Range(Bounds::new(None, Some(2.5)))]);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].code, "unrecognized_validation");
        assert_eq!(report.warnings[0].path, "/fields/field/validations/1/size");
    }

    #[test]
    fn other_types_only_get_shared_rules() {
        let field = field(FieldType::Boolean, json!([{ "in": [true] }])).required(true);

        let predicates = compile_field(&field, &CompileOptions::default()).expect("compile");
        assert_eq!(predicates.len(), 1);
        assert_eq!(predicates[0].name(), "required");
    }

    #[test]
    fn unknown_kinds_and_messages_do_not_add_predicates() {
        let field = field(
            FieldType::Text,
            json!([
                { "regexp": { "pattern": "^a" } },
                { "size": { "max": 3 }, "message": "too long" }
            ]),
        );

        let predicates = compile_field(&field, &CompileOptions::default()).expect("compile");
        assert_eq!(predicates.len(), 1);

        let mut report = ValidationReport::default();
        field_rules(&field, &mut report);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].path, "/fields/field/validations/0/regexp");
    }

    #[test]
    fn declaration_with_several_kinds_yields_each() {
        let field = field(
            FieldType::Text,
            json!([{ "prohibitRegexp": { "pattern": "a" }, "size": { "max": 3 }, "unique": true }]),
        );

        let mut report = ValidationReport::default();
        let names: Vec<&str> = field_rules(&field, &mut report)
            .iter()
            .map(Rule::name)
            .collect();
        assert_eq!(names, vec!["unique", "size", "prohibitRegexp"]);
    }

    #[test]
    fn bad_pattern_is_attributed_to_its_declaration() {
        let field = field(
            FieldType::Text,
            json!([
                { "prohibitRegexp": { "pattern": "ok" } },
                { "size": { "max": 3 } },
                { "prohibitRegexp": { "pattern": "(" } }
            ]),
        );

        let report = compile_field(&field, &CompileOptions::default()).expect_err("bad pattern");
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].code, "invalid_pattern");
        assert_eq!(
            report.errors[0].path,
            "/fields/field/validations/2/prohibitRegexp"
        );
        assert!(report.errors[0].message.contains("field 'field'"));
    }

    #[test]
    fn compile_collects_errors_across_fields() {
        let fields = vec![
            field(FieldType::Text, json!([{ "size": "long" }])),
            field(FieldType::Integer, json!([{ "range": { "min": 1 } }])),
            field(
                FieldType::Symbol,
                json!([{ "prohibitRegexp": { "pattern": "a", "flags": "z" } }]),
            ),
        ];

        let report =
            compile_validations(&fields, &CompileOptions::default()).expect_err("invalid fields");
        let codes: Vec<&str> = report.errors.iter().map(|issue| issue.code.as_str()).collect();
        assert_eq!(codes, vec!["malformed_validation", "invalid_flags"]);
        assert!(report.errors[0].hint.is_some());
    }

    #[test]
    fn compiled_set_keeps_schema_order() {
        let mut title = FieldDefinition::new("title", FieldType::Text).required(true);
        title.validations =
            serde_json::from_value(json!([{ "size": { "min": 5, "max": 10 } }])).expect("parse");
        let fields = vec![title, FieldDefinition::new("flag", FieldType::Boolean)];

        let compiled = compile_validations(&fields, &CompileOptions::default()).expect("compile");
        let ids: Vec<&str> = compiled
            .set
            .iter()
            .map(|field| field.field_id.as_str())
            .collect();
        assert_eq!(ids, vec!["title", "flag"]);
        assert_eq!(compiled.set.get("title").map(<[Predicate]>::len), Some(2));
        assert_eq!(compiled.set.get("flag").map(<[Predicate]>::len), Some(0));
        assert_eq!(compiled.set.predicate_count(), 2);
        assert!(compiled.warnings.is_empty());
    }
}
