use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::operator::FilterOperator;

/// Builder operation currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    #[default]
    Select,
    Filter,
    Count,
    Sort,
    Complex,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Select,
        Operation::Filter,
        Operation::Count,
        Operation::Sort,
        Operation::Complex,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Select => "select",
            Operation::Filter => "filter",
            Operation::Count => "count",
            Operation::Sort => "sort",
            Operation::Complex => "complex",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown operation: {}", s.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(format!("Unknown sort direction: {}", other)),
        }
    }
}

/// One projected field; a blank alias means "use the field text"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedField {
    pub field: String,
    #[serde(default)]
    pub alias: String,
}

impl SelectedField {
    pub fn new(field: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            alias: alias.into(),
        }
    }

    pub fn effective_alias(&self) -> &str {
        let alias = self.alias.trim();
        if alias.is_empty() {
            self.field.trim()
        } else {
            alias
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCondition {
    pub field: String,
    pub operator: FilterOperator,
    #[serde(default)]
    pub value: String,
}

impl FilterCondition {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
}

/// The full, mutable state of the visual builder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderConfig {
    pub operation: Operation,
    #[serde(default)]
    pub selected_fields: Vec<SelectedField>,
    #[serde(default)]
    pub filters: Vec<FilterCondition>,
    #[serde(default)]
    pub sort_field: Option<String>,
    #[serde(default)]
    pub sort_direction: SortDirection,
}

impl BuilderConfig {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            ..Self::default()
        }
    }

    /// Sort field, treating a blank value as unset
    pub fn active_sort_field(&self) -> Option<&str> {
        self.sort_field
            .as_deref()
            .map(str::trim)
            .filter(|field| !field.is_empty())
    }

    /// Pick the operation that applies every configured aspect.
    ///
    /// Used by the command line, where the user lists aspects rather than
    /// choosing an operation tab.
    pub fn inferred_operation(&self, count: bool) -> Operation {
        let has_fields = self.selected_fields.iter().any(|f| !f.field.trim().is_empty());
        let has_filters = self.filters.iter().any(|f| !f.field.trim().is_empty());
        let has_sort = self.active_sort_field().is_some();

        if count {
            return Operation::Count;
        }

        match (has_fields, has_filters, has_sort) {
            (_, false, false) => Operation::Select,
            (false, true, false) => Operation::Filter,
            (false, false, true) => Operation::Sort,
            _ => Operation::Complex,
        }
    }
}
