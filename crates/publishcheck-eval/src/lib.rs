//! Verdict evaluation and the sidebar controller.

pub mod engine;
pub mod errors;
pub mod model;
pub mod presentation;
pub mod report;
pub mod sidebar;

pub use engine::{EvaluationEngine, evaluate, evaluate_field, validate_all};
pub use errors::{EvalError, Result};
pub use model::{FieldVerdict, Verdict};
pub use presentation::{INVALID_MESSAGE, Status, VALID_MESSAGE};
pub use report::render_report;
pub use sidebar::Sidebar;
