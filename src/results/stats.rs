//! One-line summaries of a result value

use std::fmt;

use serde_json::Value;

/// Type of elements in an array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Objects,
    Arrays,
    Strings,
    Numbers,
    Booleans,
    Nulls,
    Mixed,
    Empty,
}

impl ElementType {
    fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => ElementType::Objects,
            Value::Array(_) => ElementType::Arrays,
            Value::String(_) => ElementType::Strings,
            Value::Number(_) => ElementType::Numbers,
            Value::Bool(_) => ElementType::Booleans,
            Value::Null => ElementType::Nulls,
        }
    }

    fn classify(items: &[Value]) -> Self {
        let mut iter = items.iter().map(Self::of);
        let Some(first) = iter.next() else {
            return ElementType::Empty;
        };
        if iter.all(|t| t == first) {
            first
        } else {
            ElementType::Mixed
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Objects => write!(f, "objects"),
            ElementType::Arrays => write!(f, "arrays"),
            ElementType::Strings => write!(f, "strings"),
            ElementType::Numbers => write!(f, "numbers"),
            ElementType::Booleans => write!(f, "booleans"),
            ElementType::Nulls => write!(f, "nulls"),
            ElementType::Mixed => write!(f, "mixed"),
            ElementType::Empty => write!(f, ""),
        }
    }
}

/// Statistics about a result value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultStats {
    Array { count: usize, element_type: ElementType },
    /// Object (no key count - the keys are visible in the result)
    Object,
    String,
    Number,
    Boolean,
    Null,
}

impl ResultStats {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Array(items) => ResultStats::Array {
                count: items.len(),
                element_type: ElementType::classify(items),
            },
            Value::Object(_) => ResultStats::Object,
            Value::String(_) => ResultStats::String,
            Value::Number(_) => ResultStats::Number,
            Value::Bool(_) => ResultStats::Boolean,
            Value::Null => ResultStats::Null,
        }
    }
}

impl fmt::Display for ResultStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultStats::Array { element_type: ElementType::Empty, .. } => write!(f, "Array [0]"),
            ResultStats::Array { count, element_type } => {
                write!(f, "Array [{} {}]", count, element_type)
            }
            ResultStats::Object => write!(f, "Object"),
            ResultStats::String => write!(f, "String"),
            ResultStats::Number => write!(f, "Number"),
            ResultStats::Boolean => write!(f, "Boolean"),
            ResultStats::Null => write!(f, "null"),
        }
    }
}
