//! Expression AST
//!
//! Everything the builder can express maps onto a handful of JMESPath forms.
//! Serialization goes through `Display`, which is the only place identifiers
//! are quoted and literals are escaped.

use std::fmt;

use serde_json::Number;

use crate::builder::FilterOperator;

/// A dot-separated key path such as `user.name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Split `text` on dots, dropping empty segments. Returns `None` for a
    /// blank path.
    pub fn parse(text: &str) -> Option<Self> {
        let segments: Vec<String> = text
            .trim()
            .split('.')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();
        Self::from_segments(segments)
    }

    pub fn from_segments(segments: Vec<String>) -> Option<Self> {
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The path as the user types it, without identifier quoting
    pub fn to_dotted(&self) -> String {
        self.segments.join(".")
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", Identifier(segment))?;
        }
        Ok(())
    }
}

/// An identifier, quoted when it is not a bare JMESPath identifier
#[derive(Debug, Clone, Copy)]
pub struct Identifier<'a>(pub &'a str);

impl fmt::Display for Identifier<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if is_plain_identifier(self.0) {
            f.write_str(self.0)
        } else {
            let quoted = serde_json::to_string(self.0).map_err(|_| fmt::Error)?;
            f.write_str(&quoted)
        }
    }
}

pub fn is_plain_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Filter value literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Number(Number),
    Text(String),
}

impl Literal {
    /// Classify a raw builder value: anything that parses fully as a finite
    /// number is numeric, everything else is text.
    pub fn from_raw(raw: &str) -> Self {
        match parse_number(raw) {
            Some(number) => Literal::Number(number),
            None => Literal::Text(raw.to_string()),
        }
    }

    /// The value as it appears in the builder's value box
    pub fn to_raw(&self) -> String {
        match self {
            Literal::Number(number) => number.to_string(),
            Literal::Text(text) => text.clone(),
        }
    }
}

fn parse_number(raw: &str) -> Option<Number> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Some(Number::from(int));
    }
    if let Ok(uint) = trimmed.parse::<u64>() {
        return Some(Number::from(uint));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|float| float.is_finite())
        .and_then(Number::from_f64)
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(number) => write!(f, "`{}`", number),
            // Raw strings cannot carry a trailing backslash, so fall back to a
            // JSON literal whenever one is present.
            Literal::Text(text) if text.contains('\\') => {
                let json = serde_json::to_string(text).map_err(|_| fmt::Error)?;
                write!(f, "`{}`", json.replace('`', "\\`"))
            }
            Literal::Text(text) => write!(f, "'{}'", text.replace('\'', "\\'")),
        }
    }
}

/// One predicate inside a filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub field: FieldPath,
    pub operator: FilterOperator,
    pub value: Literal,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operator.is_function() {
            write!(f, "{}({}, {})", self.operator.symbol(), self.field, self.value)
        } else {
            write!(f, "{} {} {}", self.field, self.operator.symbol(), self.value)
        }
    }
}

/// `key: path` inside a record construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionEntry {
    pub key: String,
    pub path: FieldPath,
}

impl fmt::Display for ProjectionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", Identifier(&self.key), self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// `@`
    Current,
    /// `[*]`
    Wildcard,
    /// `[?a && b]`
    Filter(Vec<Condition>),
    /// `<source>.{key: path, ...}`
    Project {
        source: Box<Expr>,
        entries: Vec<ProjectionEntry>,
    },
    /// `sort_by(<source>, &key)`
    SortBy { source: Box<Expr>, key: FieldPath },
    /// `reverse(<inner>)`
    Reverse(Box<Expr>),
    /// `length(<inner>)`
    Length(Box<Expr>),
}

impl Expr {
    /// Project records out of `source`. A projection needs a sequence
    /// projection on its left, so `@` becomes `[*]`.
    pub fn project(source: Expr, entries: Vec<ProjectionEntry>) -> Self {
        let source = match source {
            Expr::Current => Expr::Wildcard,
            other => other,
        };
        Expr::Project {
            source: Box::new(source),
            entries,
        }
    }

    pub fn sort_by(source: Expr, key: FieldPath) -> Self {
        Expr::SortBy {
            source: Box::new(source),
            key,
        }
    }

    pub fn reverse(inner: Expr) -> Self {
        Expr::Reverse(Box::new(inner))
    }

    pub fn length(inner: Expr) -> Self {
        Expr::Length(Box::new(inner))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Current => f.write_str("@"),
            Expr::Wildcard => f.write_str("[*]"),
            Expr::Filter(conditions) if conditions.is_empty() => f.write_str("[*]"),
            Expr::Filter(conditions) => {
                f.write_str("[?")?;
                for (i, condition) in conditions.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" && ")?;
                    }
                    write!(f, "{}", condition)?;
                }
                f.write_str("]")
            }
            Expr::Project { source, entries } => {
                write!(f, "{}.{{", source)?;
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", entry)?;
                }
                f.write_str("}")
            }
            Expr::SortBy { source, key } => write!(f, "sort_by({}, &{})", source, key),
            Expr::Reverse(inner) => write!(f, "reverse({})", inner),
            Expr::Length(inner) => write!(f, "length({})", inner),
        }
    }
}

#[cfg(test)]
#[path = "expr_tests.rs"]
mod expr_tests;
