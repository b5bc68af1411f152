use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::{Value, json};
use tempfile::TempDir;

fn run_publishcheck(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_publishcheck"))
        .args(args)
        .env_remove("PUBLISHCHECK_LOG")
        .output()
        .expect("publishcheck command should execute")
}

fn write_json(dir: &Path, name: &str, value: &Value) -> String {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_vec_pretty(value).expect("encode json")).expect("write json");
    path.display().to_string()
}

fn content_type(dir: &Path) -> String {
    write_json(
        dir,
        "article.json",
        &json!({
            "name": "Article",
            "fields": [
                {
                    "id": "title",
                    "type": "Text",
                    "required": true,
                    "validations": [{ "size": { "min": 5, "max": 10 } }]
                },
                {
                    "id": "age",
                    "type": "Integer",
                    "validations": [{ "range": { "min": 18 } }, { "in": [18, 21] }]
                }
            ]
        }),
    )
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn validate_reports_publishable_entry() {
    let dir = TempDir::new().expect("temp dir");
    let content_type = content_type(dir.path());
    let entry = write_json(
        dir.path(),
        "entry.json",
        &json!({ "fields": { "title": "hello", "age": 30 } }),
    );

    let output = run_publishcheck(&[
        "validate",
        "--content-type",
        &content_type,
        "--entry",
        &entry,
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout(&output).trim(), "All is good! You can publish.");
}

#[test]
fn validate_exits_with_two_when_invalid() {
    let dir = TempDir::new().expect("temp dir");
    let content_type = content_type(dir.path());
    let entry = write_json(dir.path(), "entry.json", &json!({ "title": "hi", "age": 17 }));

    let output = run_publishcheck(&[
        "validate",
        "--content-type",
        &content_type,
        "--entry",
        &entry,
        "--format",
        "json",
    ]);
    assert_eq!(output.status.code(), Some(2));

    let body: Value = serde_json::from_str(&stdout(&output)).expect("json output");
    assert_eq!(body["status"], "invalid");
    assert_eq!(body["message"], "There are some errors in your fields.");
    assert_eq!(body["verdict"]["valid"], false);
    assert_eq!(body["ignored"], json!(["/fields/age/validations/1/in"]));
}

#[test]
fn rules_lists_compiled_checks() {
    let dir = TempDir::new().expect("temp dir");
    let content_type = content_type(dir.path());

    let output = run_publishcheck(&["rules", "--content-type", &content_type]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("title (Text, required)"));
    assert!(text.contains("  - size 5..=10"));
    assert!(text.contains("  - required"));
    assert!(text.contains("  ~ ignored /fields/age/validations/1/in"));
}

#[test]
fn replay_prints_status_after_each_change() {
    let dir = TempDir::new().expect("temp dir");
    let content_type = content_type(dir.path());
    let entry = write_json(dir.path(), "entry.json", &json!({}));
    let changes = dir.path().join("changes.jsonl");
    fs::write(
        &changes,
        "{\"field\":\"title\",\"value\":\"hello\"}\n{\"field\":\"age\",\"value\":30}\n{\"field\":\"age\",\"value\":12}\n",
    )
    .expect("write changes");

    let output = run_publishcheck(&[
        "replay",
        "--content-type",
        &content_type,
        "--entry",
        &entry,
        "--changes",
        &changes.display().to_string(),
    ]);
    assert_eq!(output.status.code(), Some(2));

    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("mount\tnegative"));
    // The unset age still compares as 0 against `min: 18`.
    assert!(lines[1].starts_with("1\ttitle\tnegative"));
    assert!(lines[2].starts_with("2\tage\tpositive"));
    assert!(lines[3].starts_with("3\tage\tnegative"));
}

#[test]
fn strict_zero_bounds_flag_changes_the_verdict() {
    let dir = TempDir::new().expect("temp dir");
    let content_type = write_json(
        dir.path(),
        "counter.json",
        &json!({
            "fields": [{ "id": "count", "type": "Integer", "validations": [{ "range": { "max": 0 } }] }]
        }),
    );
    let entry = write_json(dir.path(), "entry.json", &json!({ "count": 3 }));
    let args = ["validate", "--content-type", &content_type, "--entry", &entry];

    assert!(run_publishcheck(&args).status.success());

    let mut strict = args.to_vec();
    strict.push("--strict-zero-bounds");
    assert_eq!(run_publishcheck(&strict).status.code(), Some(2));
}

#[test]
fn schema_prints_json_schema() {
    let output = run_publishcheck(&["schema"]);
    assert!(output.status.success());
    let schema: Value = serde_json::from_str(&stdout(&output)).expect("schema json");
    assert_eq!(schema["title"], "ContentType");
}
