use serde_json::Value;

use super::key_order::{hash_key_orders, restore_key_order};

/// Evaluates expression text against a document.
///
/// Implementations must be pure: the same text and document always produce
/// the same result.
pub trait Evaluator {
    fn evaluate(&self, expression: &str, document: &Value) -> Result<Value, String>;
}

/// JMESPath evaluator backed by the `jmespath` crate.
///
/// Objects built by a multi-select hash keep the key order written in the
/// expression.
#[derive(Debug, Default, Clone, Copy)]
pub struct JmespathEvaluator;

impl Evaluator for JmespathEvaluator {
    fn evaluate(&self, expression: &str, document: &Value) -> Result<Value, String> {
        let compiled = jmespath::compile(expression).map_err(|e| e.to_string())?;
        let result = compiled.search(document).map_err(|e| e.to_string())?;
        let mut value = serde_json::to_value(&*result).map_err(|e| e.to_string())?;
        restore_key_order(&mut value, &hash_key_orders(compiled.as_ast()));
        Ok(value)
    }
}

/// Outcome of running expression text against the current document
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionOutcome {
    Success(Value),
    /// No document has been loaded
    EmptyInput,
    /// The expression text is blank; nothing to do
    EmptyQuery,
    /// The evaluator rejected the expression; message is the evaluator's own
    EvaluationError(String),
}

impl ExecutionOutcome {
    pub fn value(&self) -> Option<&Value> {
        match self {
            ExecutionOutcome::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            ExecutionOutcome::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionOutcome::Success(_))
    }

    /// Status line for non-success outcomes
    pub fn status_message(&self) -> Option<String> {
        match self {
            ExecutionOutcome::Success(_) => None,
            ExecutionOutcome::EmptyInput => Some("No JSON document loaded".to_string()),
            ExecutionOutcome::EmptyQuery => Some("Enter a query to run".to_string()),
            ExecutionOutcome::EvaluationError(message) => Some(message.clone()),
        }
    }
}

/// Sequences the precondition checks before delegating to an [`Evaluator`]
#[derive(Debug, Default, Clone)]
pub struct QueryExecutor<E = JmespathEvaluator> {
    evaluator: E,
}

impl QueryExecutor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: Evaluator> QueryExecutor<E> {
    pub fn with_evaluator(evaluator: E) -> Self {
        Self { evaluator }
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Execute `expression` against `document`.
    ///
    /// A missing document is reported before a blank expression.
    pub fn execute(&self, expression: &str, document: Option<&Value>) -> ExecutionOutcome {
        let Some(document) = document else {
            return ExecutionOutcome::EmptyInput;
        };

        if expression.trim().is_empty() {
            return ExecutionOutcome::EmptyQuery;
        }

        match self.evaluator.evaluate(expression, document) {
            Ok(value) => ExecutionOutcome::Success(value),
            Err(message) => {
                log::debug!("Evaluation failed for {:?}: {}", expression, message);
                ExecutionOutcome::EvaluationError(message)
            }
        }
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod executor_tests;
