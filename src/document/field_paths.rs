use std::collections::BTreeSet;

use serde_json::Value;

/// Paths never go deeper than `parent.child`
const MAX_PATH_SEGMENTS: usize = 2;

/// Discover dot-separated field paths from a representative element.
///
/// A non-empty array is represented by its first element. Only top-level keys
/// are descended into, so no path has more than two segments.
pub fn extract_field_paths(value: &Value) -> Vec<String> {
    let mut paths = BTreeSet::new();
    collect_paths(value, None, 0, &mut paths);
    paths.into_iter().collect()
}

fn collect_paths(value: &Value, prefix: Option<&str>, depth: usize, paths: &mut BTreeSet<String>) {
    let node = match value {
        Value::Array(items) => match items.first() {
            Some(first) => first,
            None => return,
        },
        other => other,
    };

    let Value::Object(map) = node else {
        return;
    };

    for (key, child) in map {
        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, key),
            None => key.clone(),
        };

        if depth + 1 < MAX_PATH_SEGMENTS && is_recursable(child) {
            collect_paths(child, Some(&path), depth + 1, paths);
        }

        paths.insert(path);
    }
}

fn is_recursable(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Array(items) => !items.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_keys_are_sorted() {
        let value = json!({"zeta": 1, "alpha": 2, "mid": 3});
        assert_eq!(extract_field_paths(&value), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_array_uses_first_element() {
        let value = json!([{"name": "a", "age": 1}, {"other": true}]);
        assert_eq!(extract_field_paths(&value), vec!["age", "name"]);
    }

    #[test]
    fn test_nested_object_adds_second_level() {
        let value = json!({"user": {"name": "x", "address": {"city": "y"}}, "id": 1});
        assert_eq!(
            extract_field_paths(&value),
            vec!["id", "user", "user.address", "user.name"]
        );
    }

    #[test]
    fn test_nested_array_descends_into_first_element() {
        let value = json!([{"tags": [{"label": "a"}], "empty": []}]);
        assert_eq!(extract_field_paths(&value), vec!["empty", "tags", "tags.label"]);
    }

    #[test]
    fn test_scalar_and_empty_values_produce_no_paths() {
        assert!(extract_field_paths(&json!(42)).is_empty());
        assert!(extract_field_paths(&json!("text")).is_empty());
        assert!(extract_field_paths(&json!([])).is_empty());
        assert!(extract_field_paths(&json!({})).is_empty());
        assert!(extract_field_paths(&json!([1, 2, 3])).is_empty());
    }

    #[test]
    fn test_never_exceeds_two_segments() {
        let value = json!({"a": {"b": {"c": {"d": 1}}}});
        let paths = extract_field_paths(&value);
        assert_eq!(paths, vec!["a", "a.b"]);
        assert!(paths.iter().all(|p| p.split('.').count() <= MAX_PATH_SEGMENTS));
    }
}
