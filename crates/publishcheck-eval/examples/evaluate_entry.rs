use std::env;
use std::path::PathBuf;

use publishcheck_core::{MemoryEntry, parse_content_type};
use publishcheck_eval::{EvaluationEngine, Status};
use publishcheck_rules::CompileOptions;
use serde_json::{Map, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let mut content_type_path: Option<PathBuf> = None;
    let mut entry_path: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--content-type" => content_type_path = args.next().map(PathBuf::from),
            "--entry" => entry_path = args.next().map(PathBuf::from),
            _ => return Err("unexpected argument".into()),
        }
    }

    let content_type_path = content_type_path.ok_or("missing --content-type path")?;
    let entry_path = entry_path.ok_or("missing --entry path")?;

    let content_type_json: Value =
        serde_json::from_str(&std::fs::read_to_string(&content_type_path)?)?;
    let content_type = parse_content_type(&content_type_json)?;
    let values: Map<String, Value> = serde_json::from_str(&std::fs::read_to_string(&entry_path)?)?;

    let entry = MemoryEntry::with_values(content_type, values);
    let verdict = EvaluationEngine::new(CompileOptions::default()).run(&entry)?;

    for field in &verdict.fields {
        println!("{}: {}", field.field_id, if field.valid { "ok" } else { "invalid" });
    }
    println!("{}", Status::from(&verdict));
    Ok(())
}
