//! Core contracts for publishcheck.
//!
//! This crate defines the content type model, the schema reader, the host
//! traits the validator consumes and an in-memory host used by the CLI and
//! tests.

pub mod error;
pub mod host;
pub mod issues;
pub mod reader;
pub mod schema;
pub mod types;
pub mod validation;

pub use error::{Error, Result};
pub use host::{ChangeListener, MemoryEntry, SchemaProvider, ValueProvider};
pub use issues::{IssueSeverity, ValidationIssue, ValidationReport};
pub use reader::field_definitions;
pub use schema::{ContentType, FieldDefinition, MESSAGE_KEY, ValidationDeclaration};
pub use types::FieldType;
pub use validation::{
    check_content_type, content_type_json_schema, parse_content_type, validate_content_type_json,
};
