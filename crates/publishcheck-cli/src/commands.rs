use std::rc::Rc;

use publishcheck_core::{
    MemoryEntry, SchemaProvider, content_type_json_schema, field_definitions,
};
use publishcheck_eval::{Sidebar, Status, evaluate, render_report};
use publishcheck_rules::{
    CompileOptions, ValidationReport, compile_field, compile_validations, field_rules,
};
use serde_json::json;

use crate::inputs::{load_changes, load_content_type, load_entry_values};
use crate::{CliError, EntryArgs, OutputFormat, ReplayArgs, RulesArgs, ValidateArgs};

fn load_entry(args: &EntryArgs) -> Result<MemoryEntry, CliError> {
    let content_type = load_content_type(&args.content_type)?;
    let values = load_entry_values(&args.entry, &content_type, args.locale.as_deref())?;
    tracing::info!(
        event = "entry_loaded",
        fields = content_type.fields.len(),
        values = values.len()
    );
    Ok(MemoryEntry::with_values(content_type, values))
}

pub(crate) fn run_validate(args: ValidateArgs, options: &CompileOptions) -> Result<bool, CliError> {
    let entry = load_entry(&args.entry)?;
    let fields = field_definitions(&entry);

    let compiled = compile_validations(&fields, options).map_err(CliError::Compile)?;
    let verdict = evaluate(&compiled.set, &entry)?;
    let status = Status::from(&verdict);

    match args.format {
        OutputFormat::Text => {
            println!("{status}");
            for field in verdict.failed_fields() {
                eprintln!("invalid field: {}", field.field_id);
            }
        }
        OutputFormat::Json => {
            let output = json!({
                "status": status,
                "message": status.message(),
                "verdict": verdict,
                "ignored": compiled
                    .warnings
                    .iter()
                    .map(|issue| issue.path.as_str())
                    .collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Markdown => {
            let report = render_report(entry.content_type(), &verdict, &compiled.warnings);
            println!("{report}");
        }
    }

    Ok(verdict.valid)
}

pub(crate) fn run_rules(args: RulesArgs, options: &CompileOptions) -> Result<bool, CliError> {
    let content_type = load_content_type(&args.content_type)?;
    let mut errors = ValidationReport::default();

    for field in &content_type.fields {
        let mut report = ValidationReport::default();
        let rules = field_rules(field, &mut report);
        let required = if field.required { ", required" } else { "" };
        println!("{} ({}{required})", field.id, field.field_type);

        if rules.is_empty() {
            println!("  (no checks)");
        }
        for rule in &rules {
            println!("  - {rule}");
        }
        for warning in &report.warnings {
            println!("  ~ ignored {}", warning.path);
        }

        if let Err(report) = compile_field(field, options) {
            errors.merge(report);
        }
    }

    for issue in &errors.errors {
        eprintln!("error {} {}: {}", issue.code, issue.path, issue.message);
        if let Some(hint) = &issue.hint {
            eprintln!("  hint: {hint}");
        }
    }

    if errors.is_ok() {
        Ok(true)
    } else {
        Err(CliError::Compile(errors))
    }
}

pub(crate) fn run_replay(args: ReplayArgs, options: &CompileOptions) -> Result<bool, CliError> {
    let changes = load_changes(&args.changes)?;
    let entry = Rc::new(load_entry(&args.entry)?);
    let sidebar = Sidebar::new(Rc::clone(&entry), *options)?;

    let status = sidebar.mount();
    println!("mount\t{}\t{status}", status.note_kind());

    for (idx, change) in changes.into_iter().enumerate() {
        if !entry.set_value(&change.field, change.value) {
            tracing::warn!(event = "unknown_field", line = idx + 1, field = %change.field);
            return Err(CliError::InvalidInput(format!(
                "change line {}: unknown field '{}'",
                idx + 1,
                change.field
            )));
        }
        let status = sidebar.status();
        println!("{}\t{}\t{}\t{status}", idx + 1, change.field, status.note_kind());
    }

    tracing::info!(event = "replay_finished", passes = sidebar.passes());
    Ok(sidebar.status().is_valid())
}

pub(crate) fn run_schema() -> Result<bool, CliError> {
    let schema = content_type_json_schema();
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(true)
}
