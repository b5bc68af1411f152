use publishcheck_core::content_type_json_schema;

fn main() {
    let schema = content_type_json_schema();
    let json = serde_json::to_string_pretty(&schema).expect("serialize json schema");
    println!("{json}");
}
