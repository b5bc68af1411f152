use publishcheck_core::ContentType;
use publishcheck_rules::{ValidationIssue, ValidationReport, field_rules};

use crate::model::Verdict;
use crate::presentation::Status;

/// Render a deterministic markdown report for one evaluation pass.
pub fn render_report(
    content_type: &ContentType,
    verdict: &Verdict,
    warnings: &[ValidationIssue],
) -> String {
    let mut lines = Vec::new();
    let status = Status::from(verdict);

    lines.push("# Entry Validation Report".to_string());
    lines.push(String::new());
    if let Some(name) = &content_type.name {
        lines.push(format!("- content_type: {name}"));
    }
    lines.push(format!("- status: {}", status.note_kind()));
    lines.push(format!("- message: {}", status.message()));
    lines.push(String::new());

    lines.push("## Fields".to_string());
    lines.push("| field | type | checked | result |".to_string());
    lines.push("| --- | --- | --- | --- |".to_string());
    for field in &verdict.fields {
        let field_type = content_type
            .field(&field.field_id)
            .map(|definition| definition.field_type.to_string())
            .unwrap_or_else(|| "-".to_string());
        let result = if field.valid { "ok" } else { "invalid" };
        lines.push(format!(
            "| {} | {} | {} | {} |",
            field.field_id, field_type, field.checked, result
        ));
    }
    lines.push(String::new());

    let failures = failed_rules(content_type, verdict);
    if !failures.is_empty() {
        lines.push("## Failed rules".to_string());
        lines.extend(failures);
        lines.push(String::new());
    }

    if !warnings.is_empty() {
        lines.push("## Ignored validations".to_string());
        for warning in warnings {
            lines.push(format!("- {}: {}", warning.path, warning.message));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

fn failed_rules(content_type: &ContentType, verdict: &Verdict) -> Vec<String> {
    let mut lines = Vec::new();
    for field in verdict.failed_fields() {
        let Some(definition) = content_type.field(&field.field_id) else {
            continue;
        };
        let mut scratch = ValidationReport::default();
        let rules = field_rules(definition, &mut scratch);
        for index in &field.failed {
            let rule = rules
                .get(*index)
                .map(|rule| rule.to_string())
                .unwrap_or_else(|| format!("rule #{index}"));
            lines.push(format!("- {}: {}", field.field_id, rule));
        }
    }
    lines
}
