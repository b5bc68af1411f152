use std::env;
use std::path::PathBuf;

use publishcheck_core::parse_content_type;
use publishcheck_rules::{CompileOptions, ValidationReport, compile_field, field_rules};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or("missing content type path")?;

    let contents = std::fs::read_to_string(&path)?;
    let content_type = parse_content_type(&serde_json::from_str(&contents)?)?;
    let options = CompileOptions::default();

    for field in &content_type.fields {
        let mut report = ValidationReport::default();
        let rules = field_rules(field, &mut report);
        println!("{} ({})", field.id, field.field_type);
        for rule in &rules {
            println!("  {rule}");
        }
        for issue in report.warnings.iter().chain(report.errors.iter()) {
            println!("  ! {} {}: {}", issue.code, issue.path, issue.message);
        }
        if let Err(report) = compile_field(field, &options) {
            for issue in &report.errors {
                eprintln!("  error {} {}: {}", issue.code, issue.path, issue.message);
            }
        }
    }

    Ok(())
}
