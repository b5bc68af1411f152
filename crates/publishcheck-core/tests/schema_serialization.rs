use publishcheck_core::{
    ContentType, FieldDefinition, FieldType, ValidationDeclaration, content_type_json_schema,
    validate_content_type_json,
};
use serde_json::json;

#[test]
fn serializes_content_type_deterministically() {
    let content_type = ContentType {
        id: None,
        name: Some("Article".to_string()),
        display_field: Some("title".to_string()),
        fields: vec![
            FieldDefinition::new("title", FieldType::Text)
                .required(true)
                .with_validation(ValidationDeclaration::single("size", json!({ "max": 10 }))),
        ],
    };

    let json = serde_json::to_string_pretty(&content_type).expect("serialize content type");
    let expected = r#"{
  "name": "Article",
  "displayField": "title",
  "fields": [
    {
      "id": "title",
      "type": "Text",
      "required": true,
      "validations": [
        {
          "size": {
            "max": 10
          }
        }
      ],
      "localized": false,
      "disabled": false,
      "omitted": false
    }
  ]
}"#;
    assert_eq!(json, expected);
}

#[test]
fn generated_json_schema_accepts_serialized_content_types() {
    let schema = serde_json::to_value(content_type_json_schema()).expect("serialize schema");
    let content_type = ContentType {
        fields: vec![
            FieldDefinition::new("age", FieldType::Integer)
                .with_validation(ValidationDeclaration::single("range", json!({ "min": 18 }))),
            FieldDefinition::new("where", FieldType::Other("Geo".to_string())),
        ],
        ..ContentType::default()
    };
    let document = serde_json::to_value(&content_type).expect("serialize content type");

    let report = validate_content_type_json(&document, &schema).expect("compile schema");
    assert!(report.is_ok(), "unexpected issues: {:?}", report.errors);
}

#[test]
fn generated_json_schema_requires_fields() {
    let schema = serde_json::to_value(content_type_json_schema()).expect("serialize schema");

    let report = validate_content_type_json(&json!({ "name": "Empty" }), &schema)
        .expect("compile schema");
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].path, "/");
}
