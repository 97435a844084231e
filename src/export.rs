//! Export of a query result as JSON or CSV text

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::results::{cell_text, column_union};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!("unknown export format '{}' (expected json or csv)", other)),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("There is no result to export")]
    NoResult,

    #[error("Result cannot be exported as {format}: {reason}")]
    UnsuitableShape { format: ExportFormat, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render `result` in the given format
pub fn export_as(format: ExportFormat, result: Option<&Value>) -> Result<String, ExportError> {
    let value = result.ok_or(ExportError::NoResult)?;
    match format {
        ExportFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| unsuitable(format, e.to_string())),
        ExportFormat::Csv => to_csv(value),
    }
}

/// Render then write; nothing is written when rendering fails
pub fn export_to_file(
    format: ExportFormat,
    result: Option<&Value>,
    path: &Path,
) -> Result<(), ExportError> {
    let text = export_as(format, result)?;
    fs::write(path, text)?;
    log::debug!("Exported {} result to {}", format, path.display());
    Ok(())
}

fn to_csv(value: &Value) -> Result<String, ExportError> {
    let records: Vec<&Map<String, Value>> = match value {
        Value::Object(map) => vec![map],
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_object().ok_or_else(|| {
                    unsuitable(ExportFormat::Csv, "every array element must be an object")
                })
            })
            .collect::<Result<_, _>>()?,
        _ => {
            return Err(unsuitable(
                ExportFormat::Csv,
                "result must be an object or an array of objects",
            ));
        }
    };

    let items: Vec<Value> = records.iter().map(|m| Value::Object((*m).clone())).collect();
    let columns = column_union(&items);

    if columns.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());
    writer.write_record(&columns)?;
    for record in &records {
        let row: Vec<String> = columns
            .iter()
            .map(|column| match record.get(column) {
                None | Some(Value::Null) => String::new(),
                Some(cell) => cell_text(cell),
            })
            .collect();
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| unsuitable(ExportFormat::Csv, e.to_string()))
}

fn unsuitable(format: ExportFormat, reason: impl Into<String>) -> ExportError {
    ExportError::UnsuitableShape {
        format,
        reason: reason.into(),
    }
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod export_tests;
