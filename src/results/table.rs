use serde_json::Value;

/// Cell text for a key the row does not have
pub const NULL_MARKER: &str = "null";

const COLUMN_GAP: &str = "  ";

/// Tabular view of a sequence of mappings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table when `value` is a non-empty array holding at least one object.
    ///
    /// Columns are the union of object keys in first-seen order. Non-object
    /// elements are skipped.
    pub fn from_value(value: &Value) -> Option<Self> {
        let items = value.as_array()?;
        let objects: Vec<_> = items.iter().filter_map(Value::as_object).collect();
        if objects.is_empty() {
            return None;
        }

        let columns = column_union(items);
        let rows = objects
            .iter()
            .map(|object| {
                columns
                    .iter()
                    .map(|column| match object.get(column) {
                        Some(cell) => cell_text(cell),
                        None => NULL_MARKER.to_string(),
                    })
                    .collect()
            })
            .collect();

        Some(Self { columns, rows })
    }

    /// Lay the table out as left-aligned text with a header rule
    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(render_line(&self.columns, &widths));
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        lines.push(render_line(&rule, &widths));
        for row in &self.rows {
            lines.push(render_line(row, &widths));
        }
        lines.join("\n")
    }
}

/// Keys of every object in `items`, in first-seen order
pub(crate) fn column_union(items: &[Value]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for object in items.iter().filter_map(Value::as_object) {
        for key in object.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

/// Strings unquoted, containers as compact JSON, other scalars as JSON text
pub(crate) fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    padded.join(COLUMN_GAP).trim_end().to_string()
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod table_tests;
