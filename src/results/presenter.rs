use serde_json::Value;

use super::highlight::HighlightedJson;
use super::stats::ResultStats;
use super::table::Table;

/// Every view of a single result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub text_view: HighlightedJson,
    /// Absent unless the result is a non-empty array with at least one object
    pub table_view: Option<Table>,
    pub stats: ResultStats,
}

pub struct Presenter;

impl Presenter {
    pub fn present(result: &Value) -> Presentation {
        Presentation {
            text_view: HighlightedJson::new(result),
            table_view: Table::from_value(result),
            stats: ResultStats::of(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_present_records() {
        let value = json!([{"name": "A"}, {"name": "B"}]);
        let presentation = Presenter::present(&value);

        assert_eq!(
            presentation.text_view.plain(),
            serde_json::to_string_pretty(&value).unwrap()
        );
        assert_eq!(presentation.table_view.unwrap().rows.len(), 2);
        assert_eq!(presentation.stats.to_string(), "Array [2 objects]");
    }

    #[test]
    fn test_table_fallback_for_scalars_and_empty() {
        for value in [json!([]), json!([1, 2]), json!("x"), json!(3)] {
            let presentation = Presenter::present(&value);
            assert!(presentation.table_view.is_none());
            assert!(!presentation.text_view.plain().is_empty());
        }
    }
}
