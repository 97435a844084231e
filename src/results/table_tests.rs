//! Tests for the table view

use super::*;
use serde_json::json;

#[test]
fn test_columns_are_union_in_first_seen_order() {
    let table = Table::from_value(&json!([
        {"b": 1, "a": 2},
        {"c": 3, "a": 4}
    ]))
    .unwrap();

    assert_eq!(table.columns, vec!["b", "a", "c"]);
    assert_eq!(
        table.rows,
        vec![vec!["1", "2", NULL_MARKER], vec![NULL_MARKER, "4", "3"]]
    );
}

#[test]
fn test_non_object_elements_are_skipped() {
    let table = Table::from_value(&json!([1, {"a": "x"}, "s", null])).unwrap();
    assert_eq!(table.rows, vec![vec!["x"]]);
}

#[test]
fn test_cell_formatting() {
    let table = Table::from_value(&json!([
        {"s": "text", "n": 1.5, "b": true, "z": null, "o": {"k": [1, 2]}}
    ]))
    .unwrap();

    assert_eq!(table.rows[0], vec!["text", "1.5", "true", "null", "{\"k\":[1,2]}"]);
}

#[test]
fn test_no_table_for_empty_or_scalar_sequences() {
    assert_eq!(Table::from_value(&json!([])), None);
    assert_eq!(Table::from_value(&json!([1, 2, 3])), None);
    assert_eq!(Table::from_value(&json!(["a"])), None);
}

#[test]
fn test_no_table_for_non_sequences() {
    assert_eq!(Table::from_value(&json!({"a": 1})), None);
    assert_eq!(Table::from_value(&json!("a")), None);
    assert_eq!(Table::from_value(&json!(null)), None);
}

#[test]
fn test_render_aligns_columns() {
    let table = Table::from_value(&json!([
        {"name": "Alice", "age": 30},
        {"name": "Bob"}
    ]))
    .unwrap();

    insta::assert_snapshot!(table.render(), @r###"
    name   age
    -----  ----
    Alice  30
    Bob    null
    "###);
}
