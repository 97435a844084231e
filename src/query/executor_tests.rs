//! Tests for executor

use super::*;
use crate::builder::{BuilderConfig, FilterCondition, FilterOperator, Operation, SelectedField, SortDirection};
use crate::export::{ExportFormat, export_as};
use crate::query::generate;
use crate::results::Presenter;
use serde_json::json;
use std::cell::Cell;

fn run(expression: &str, document: &Value) -> Value {
    match QueryExecutor::new().execute(expression, Some(document)) {
        ExecutionOutcome::Success(value) => value,
        other => panic!("expected success, got {:?}", other),
    }
}

fn keys(value: &Value) -> Vec<&str> {
    value.as_object().unwrap().keys().map(String::as_str).collect()
}

#[test]
fn test_identity_returns_document_unchanged() {
    let document = json!({"name": "Alice", "tags": ["a", "b"], "n": null});
    assert_eq!(run("@", &document), document);

    let document = json!([1, "two", {"three": 3}]);
    assert_eq!(run("@", &document), document);
}

#[test]
fn test_missing_document_is_empty_input() {
    let outcome = QueryExecutor::new().execute("@", None);
    assert_eq!(outcome, ExecutionOutcome::EmptyInput);
}

#[test]
fn test_missing_document_checked_before_blank_query() {
    let outcome = QueryExecutor::new().execute("   ", None);
    assert_eq!(outcome, ExecutionOutcome::EmptyInput);
}

#[test]
fn test_blank_query_is_empty_query() {
    let outcome = QueryExecutor::new().execute(" \n ", Some(&json!({})));
    assert_eq!(outcome, ExecutionOutcome::EmptyQuery);
}

#[test]
fn test_invalid_expression_carries_evaluator_message() {
    let expected = jmespath::compile("[?").unwrap_err().to_string();
    let outcome = QueryExecutor::new().execute("[?", Some(&json!([])));
    assert_eq!(outcome, ExecutionOutcome::EvaluationError(expected));
}

#[test]
fn test_select_ordering_example() {
    let mut config = BuilderConfig::new(Operation::Select);
    config.selected_fields = vec![SelectedField::new("b", "B"), SelectedField::new("a", "A")];

    let result = run(&generate(&config), &json!([{"a": 1, "b": 2}]));
    assert_eq!(result, json!([{"B": 2, "A": 1}]));
    assert_eq!(keys(&result[0]), vec!["B", "A"]);

    let table = Presenter::present(&result).table_view.unwrap();
    assert_eq!(table.columns, vec!["B", "A"]);

    let csv = export_as(ExportFormat::Csv, Some(&result)).unwrap();
    assert_eq!(csv, "B,A\n2,1\n");
}

#[test]
fn test_nested_projection_keeps_written_order() {
    let document = json!({"people": [{"name": "Al", "age": 30, "city": "Rome"}]});
    let result = run("people[*].{who: name, info: {z: city, a: age}}", &document);

    assert_eq!(keys(&result[0]), vec!["who", "info"]);
    assert_eq!(keys(&result[0]["info"]), vec!["z", "a"]);
}

#[test]
fn test_complex_sort_by_aliased_field() {
    let document = json!([
        {"first name": "Bea", "x-y": "abc"},
        {"first name": "Cal", "x-y": "zzz"},
        {"first name": "Ann", "x-y": "bad"}
    ]);
    let mut config = BuilderConfig::new(Operation::Complex);
    config.filters = vec![FilterCondition::new("x-y", FilterOperator::Contains, "a")];
    config.selected_fields = vec![SelectedField::new("first name", "First Name")];
    config.sort_field = Some("first name".into());
    config.sort_direction = SortDirection::Descending;

    let result = run(&generate(&config), &document);
    assert_eq!(result, json!([{"First Name": "Bea"}, {"First Name": "Ann"}]));
}

#[test]
fn test_filter_conjunction_example() {
    let mut config = BuilderConfig::new(Operation::Filter);
    config.filters = vec![
        FilterCondition::new("age", FilterOperator::GreaterThan, "25"),
        FilterCondition::new("status", FilterOperator::Equals, "active"),
    ];
    let document = json!([
        {"age": 30, "status": "active"},
        {"age": 20, "status": "active"},
        {"age": 40, "status": "inactive"}
    ]);

    let result = run(&generate(&config), &document);
    assert_eq!(result, json!([{"age": 30, "status": "active"}]));
}

#[test]
fn test_count_without_filter_is_length() {
    let config = BuilderConfig::new(Operation::Count);
    let result = run(&generate(&config), &json!([1, 2, 3, 4, 5]));
    assert_eq!(result, json!(5));
}

#[test]
fn test_count_with_filter() {
    let mut config = BuilderConfig::new(Operation::Count);
    config.filters = vec![FilterCondition::new("n", FilterOperator::LessOrEqual, "2")];
    let result = run(&generate(&config), &json!([{"n": 1}, {"n": 2}, {"n": 3}]));
    assert_eq!(result, json!(2));
}

#[test]
fn test_sort_directions() {
    let document = json!([{"age": 3}, {"age": 1}, {"age": 2}]);
    let mut config = BuilderConfig::new(Operation::Sort);
    config.sort_field = Some("age".into());

    let ascending = run(&generate(&config), &document);
    assert_eq!(ascending, json!([{"age": 1}, {"age": 2}, {"age": 3}]));

    config.sort_direction = SortDirection::Descending;
    let descending = run(&generate(&config), &document);
    assert_eq!(descending, json!([{"age": 3}, {"age": 2}, {"age": 1}]));
}

#[test]
fn test_text_operators() {
    let document = json!([{"name": "Alice"}, {"name": "Bob"}, {"name": "Alicia"}]);
    let mut config = BuilderConfig::new(Operation::Filter);

    config.filters = vec![FilterCondition::new("name", FilterOperator::StartsWith, "Ali")];
    assert_eq!(run(&generate(&config), &document).as_array().unwrap().len(), 2);

    config.filters = vec![FilterCondition::new("name", FilterOperator::Contains, "o")];
    assert_eq!(run(&generate(&config), &document), json!([{"name": "Bob"}]));

    config.filters = vec![FilterCondition::new("name", FilterOperator::EndsWith, "ce")];
    assert_eq!(run(&generate(&config), &document), json!([{"name": "Alice"}]));
}

#[test]
fn test_escaped_values_match_literally() {
    let document = json!([{"name": "O'Brien"}, {"name": "C:\\temp"}, {"name": "plain"}]);
    let mut config = BuilderConfig::new(Operation::Filter);

    config.filters = vec![FilterCondition::new("name", FilterOperator::Equals, "O'Brien")];
    assert_eq!(run(&generate(&config), &document), json!([{"name": "O'Brien"}]));

    config.filters = vec![FilterCondition::new("name", FilterOperator::Equals, "C:\\temp")];
    assert_eq!(run(&generate(&config), &document), json!([{"name": "C:\\temp"}]));
}

#[test]
fn test_complex_pipeline() {
    let document = json!([
        {"name": "Cy", "age": 41, "team": "a"},
        {"name": "Al", "age": 30, "team": "a"},
        {"name": "Bo", "age": 25, "team": "b"}
    ]);
    let mut config = BuilderConfig::new(Operation::Complex);
    config.filters = vec![FilterCondition::new("team", FilterOperator::Equals, "a")];
    config.selected_fields = vec![SelectedField::new("name", "who"), SelectedField::new("age", "")];
    config.sort_field = Some("age".into());

    let result = run(&generate(&config), &document);
    assert_eq!(result, json!([{"who": "Al", "age": 30}, {"who": "Cy", "age": 41}]));
}

struct CountingEvaluator {
    calls: Cell<usize>,
}

impl Evaluator for CountingEvaluator {
    fn evaluate(&self, expression: &str, _document: &Value) -> Result<Value, String> {
        self.calls.set(self.calls.get() + 1);
        if expression == "boom" {
            Err("evaluator exploded at column 1".to_string())
        } else {
            Ok(json!(expression))
        }
    }
}

#[test]
fn test_custom_evaluator_is_not_called_when_preconditions_fail() {
    let executor = QueryExecutor::with_evaluator(CountingEvaluator { calls: Cell::new(0) });

    executor.execute("x", None);
    executor.execute("", Some(&json!({})));
    assert_eq!(executor.evaluator.calls.get(), 0);

    assert_eq!(
        executor.execute("x", Some(&json!({}))),
        ExecutionOutcome::Success(json!("x"))
    );
    assert_eq!(
        executor.execute("boom", Some(&json!({}))),
        ExecutionOutcome::EvaluationError("evaluator exploded at column 1".to_string())
    );
    assert_eq!(executor.evaluator.calls.get(), 2);
}

#[test]
fn test_status_messages() {
    assert!(ExecutionOutcome::Success(json!(1)).status_message().is_none());
    assert!(ExecutionOutcome::EmptyInput.status_message().is_some());
    assert_eq!(
        ExecutionOutcome::EvaluationError("bad".into()).status_message(),
        Some("bad".to_string())
    );
}
