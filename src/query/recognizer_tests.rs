//! Tests for recognizing generated expressions

use super::*;
use crate::query::generate;
use proptest::prelude::*;

#[test]
fn test_identity() {
    assert_eq!(recognize("@"), Some(BuilderConfig::default()));
    assert_eq!(recognize("  @  "), Some(BuilderConfig::default()));
}

#[test]
fn test_select() {
    let config = recognize("[*].{B: b, A: a}").unwrap();
    assert_eq!(config.operation, Operation::Select);
    assert_eq!(
        config.selected_fields,
        vec![SelectedField::new("b", "B"), SelectedField::new("a", "A")]
    );
}

#[test]
fn test_filter_with_quoted_values() {
    let config = recognize(r"[?age > `25` && name == 'O\'Brien']").unwrap();
    assert_eq!(config.operation, Operation::Filter);
    assert_eq!(
        config.filters,
        vec![
            FilterCondition::new("age", FilterOperator::GreaterThan, "25"),
            FilterCondition::new("name", FilterOperator::Equals, "O'Brien"),
        ]
    );
}

#[test]
fn test_filter_functions_and_json_literal() {
    let config = recognize(r#"[?contains(path, `"C:\\tmp"`)]"#).unwrap();
    assert_eq!(
        config.filters,
        vec![FilterCondition::new("path", FilterOperator::Contains, r"C:\tmp")]
    );
}

#[test]
fn test_count() {
    let config = recognize("length(@)").unwrap();
    assert_eq!(config.operation, Operation::Count);
    assert!(config.filters.is_empty());

    let config = recognize("length([?age < `3`])").unwrap();
    assert_eq!(config.operation, Operation::Count);
    assert_eq!(config.filters.len(), 1);
}

#[test]
fn test_sort_descending() {
    let config = recognize("reverse(sort_by(@, &user.age))").unwrap();
    assert_eq!(config.operation, Operation::Sort);
    assert_eq!(config.sort_field.as_deref(), Some("user.age"));
    assert_eq!(config.sort_direction, SortDirection::Descending);
}

#[test]
fn test_complex() {
    let text = "reverse(sort_by([?age > `25`].{Name: name}, &Name))";
    let config = recognize(text).unwrap();
    assert_eq!(config.operation, Operation::Complex);
    assert_eq!(config.selected_fields, vec![SelectedField::new("name", "Name")]);
    assert_eq!(config.filters.len(), 1);
    assert_eq!(config.sort_field.as_deref(), Some("Name"));
    assert_eq!(generate(&config), text);
}

#[test]
fn test_extra_whitespace_is_tolerated() {
    let config = recognize("sort_by( [*] . { n : name } , & n )").unwrap();
    assert_eq!(generate(&config), "sort_by([*].{n: name}, &n)");
}

#[test]
fn test_unrecognized_shapes() {
    assert_eq!(recognize(""), None);
    assert_eq!(recognize("people[0].name"), None);
    assert_eq!(recognize("[*]"), None);
    assert_eq!(recognize("length([*].{a: a})"), None);
    assert_eq!(recognize("[?a == `1`] | [0]"), None);
    assert_eq!(recognize("sort_by(@, &age"), None);
    assert_eq!(recognize(r#"[*].{x: "a.b"}"#), None);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_round_trip_through_text(
        operation in prop::sample::select(Operation::ALL.to_vec()),
        fields in prop::collection::vec(("[a-z_]{1,5}(\\.[a-z ]{1,3})?", "[A-Za-z]{0,4}"), 0..3),
        filters in prop::collection::vec(
            ("[a-z_]{1,5}", prop::sample::select(FilterOperator::ALL.to_vec()), ".{0,6}"),
            0..3,
        ),
        sort_field in prop::option::of("[a-z_]{1,5}"),
        descending in any::<bool>(),
    ) {
        let config = BuilderConfig {
            operation,
            selected_fields: fields.into_iter().map(|(f, a)| SelectedField::new(f, a)).collect(),
            filters: filters.into_iter().map(|(f, op, v)| FilterCondition::new(f, op, v)).collect(),
            sort_field,
            sort_direction: if descending { SortDirection::Descending } else { SortDirection::Ascending },
        };

        let text = generate(&config);
        let recognized = recognize(&text);
        prop_assert!(recognized.is_some(), "not recognized: {}", text);
        prop_assert_eq!(generate(&recognized.unwrap()), text);
    }
}
