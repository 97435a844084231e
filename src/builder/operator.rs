use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Value types an operator is meant for. Used as a hint only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorClass {
    AllTypes,
    NumericOnly,
    TextOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    #[default]
    Equals,
    NotEquals,
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
    Contains,
    StartsWith,
    EndsWith,
}

impl FilterOperator {
    pub const ALL: [FilterOperator; 9] = [
        FilterOperator::Equals,
        FilterOperator::NotEquals,
        FilterOperator::GreaterThan,
        FilterOperator::GreaterOrEqual,
        FilterOperator::LessThan,
        FilterOperator::LessOrEqual,
        FilterOperator::Contains,
        FilterOperator::StartsWith,
        FilterOperator::EndsWith,
    ];

    /// Symbol shown in the builder and accepted on the command line
    pub fn symbol(self) -> &'static str {
        match self {
            FilterOperator::Equals => "==",
            FilterOperator::NotEquals => "!=",
            FilterOperator::GreaterThan => ">",
            FilterOperator::GreaterOrEqual => ">=",
            FilterOperator::LessThan => "<",
            FilterOperator::LessOrEqual => "<=",
            FilterOperator::Contains => "contains",
            FilterOperator::StartsWith => "starts_with",
            FilterOperator::EndsWith => "ends_with",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterOperator::Equals => "equals",
            FilterOperator::NotEquals => "not equals",
            FilterOperator::GreaterThan => "greater than",
            FilterOperator::GreaterOrEqual => "greater or equal",
            FilterOperator::LessThan => "less than",
            FilterOperator::LessOrEqual => "less or equal",
            FilterOperator::Contains => "contains",
            FilterOperator::StartsWith => "starts with",
            FilterOperator::EndsWith => "ends with",
        }
    }

    pub fn class(self) -> OperatorClass {
        match self {
            FilterOperator::Equals | FilterOperator::NotEquals => OperatorClass::AllTypes,
            FilterOperator::GreaterThan
            | FilterOperator::GreaterOrEqual
            | FilterOperator::LessThan
            | FilterOperator::LessOrEqual => OperatorClass::NumericOnly,
            FilterOperator::Contains | FilterOperator::StartsWith | FilterOperator::EndsWith => {
                OperatorClass::TextOnly
            }
        }
    }

    /// True for operators rendered as a function call rather than infix
    pub fn is_function(self) -> bool {
        self.class() == OperatorClass::TextOnly
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for FilterOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s.trim().to_ascii_lowercase().as_str() {
            "==" | "=" | "eq" | "equals" => FilterOperator::Equals,
            "!=" | "ne" | "not_equals" | "not-equals" => FilterOperator::NotEquals,
            ">" | "gt" | "greater_than" => FilterOperator::GreaterThan,
            ">=" | "gte" | "ge" | "greater_or_equal" => FilterOperator::GreaterOrEqual,
            "<" | "lt" | "less_than" => FilterOperator::LessThan,
            "<=" | "lte" | "le" | "less_or_equal" => FilterOperator::LessOrEqual,
            "contains" => FilterOperator::Contains,
            "starts_with" | "startswith" | "starts-with" => FilterOperator::StartsWith,
            "ends_with" | "endswith" | "ends-with" => FilterOperator::EndsWith,
            other => return Err(format!("Unknown filter operator: {}", other)),
        };
        Ok(op)
    }
}
