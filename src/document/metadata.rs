use std::fmt;

use serde_json::Value;

/// JSON type of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Null => write!(f, "null"),
            ValueKind::Boolean => write!(f, "boolean"),
            ValueKind::Number => write!(f, "number"),
            ValueKind::String => write!(f, "string"),
            ValueKind::Array => write!(f, "array"),
            ValueKind::Object => write!(f, "object"),
        }
    }
}

/// Metadata derived from the loaded document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub kind: ValueKind,
    /// Maximum container nesting; scalars are 0
    pub depth: usize,
    /// Keys of an object or elements of an array
    pub property_count: usize,
    pub size_bytes: usize,
}

impl DocumentMetadata {
    pub fn compute(value: &Value, size_bytes: usize) -> Self {
        let property_count = match value {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => 0,
        };

        Self {
            kind: ValueKind::of(value),
            depth: nesting_depth(value),
            property_count,
            size_bytes,
        }
    }
}

impl fmt::Display for DocumentMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.kind {
            ValueKind::Array => "elements",
            _ => "properties",
        };
        write!(
            f,
            "{}, {} {}, depth {}, {}",
            self.kind,
            self.property_count,
            unit,
            self.depth,
            format_size(self.size_bytes)
        )
    }
}

fn nesting_depth(value: &Value) -> usize {
    match value {
        Value::Array(items) => 1 + items.iter().map(nesting_depth).max().unwrap_or(0),
        Value::Object(map) => 1 + map.values().map(nesting_depth).max().unwrap_or(0),
        _ => 0,
    }
}

fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let size = bytes as f64;
    if size >= MB {
        format!("{:.1} MB", size / MB)
    } else if size >= KB {
        format!("{:.1} KB", size / KB)
    } else {
        format!("{} B", bytes)
    }
}
