//! Rule compiler: turns validation declarations into predicates.
//!
//! Declarations are parsed into [`Rule`]s by field type (string rules for
//! `Symbol`/`Text`, number rules for `Integer`/`Float`, shared rules for every
//! field) and each rule is compiled into a [`Predicate`].

pub mod compile;
pub mod errors;
pub mod model;
pub mod pattern;
pub mod predicate;

pub use compile::{
    CompiledValidations, FieldPredicates, ValidationSet, compile_field, compile_validations,
    field_rules, recognized_kinds, shared_rules,
};
pub use errors::{IssueSeverity, PredicateError, ValidationIssue, ValidationReport};
pub use model::{Bounds, CompileOptions, PatternConfig, Rule, RuleKind};
pub use pattern::{JsPattern, PatternError, PatternFlags};
pub use predicate::{Predicate, value_kind};
