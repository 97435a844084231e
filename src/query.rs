//! Query expression pipeline
//!
//! Builder configuration is turned into an [`Expr`] and serialized to
//! JMESPath text by the generator. The recognizer maps generated text back to
//! a configuration, and the executor evaluates any text against a document.

pub mod debouncer;
pub mod executor;
pub mod expr;
pub mod generator;
mod key_order;
pub mod recognizer;

pub use debouncer::Debouncer;
pub use executor::{Evaluator, ExecutionOutcome, JmespathEvaluator, QueryExecutor};
pub use expr::{Condition, Expr, FieldPath, Literal, ProjectionEntry};
pub use generator::{build_expr, generate};
pub use recognizer::recognize;

/// Expression text that returns the whole document
pub const IDENTITY_EXPRESSION: &str = "@";
