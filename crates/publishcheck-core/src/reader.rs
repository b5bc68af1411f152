use crate::host::SchemaProvider;
use crate::schema::FieldDefinition;

/// Snapshot the field definitions of the active content type.
///
/// Fields come back in schema order with their validations in declaration
/// order. Nothing is filtered or normalized.
pub fn field_definitions<S: SchemaProvider + ?Sized>(schema: &S) -> Vec<FieldDefinition> {
    schema.content_type().fields.clone()
}
