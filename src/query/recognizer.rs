//! Expression text back to builder configuration
//!
//! Only the shapes the generator emits are recognized. Anything else returns
//! `None`, which leaves the builder untouched and the text in text mode.

use serde_json::Value;

use crate::builder::{
    BuilderConfig, FilterCondition, FilterOperator, Operation, SelectedField, SortDirection,
};

use super::expr::{Condition, Expr, FieldPath, Literal, ProjectionEntry};
use super::generator::build_expr;

/// Recognize generated expression text as a builder configuration.
///
/// The returned configuration regenerates exactly the canonical form of
/// `text`.
pub fn recognize(text: &str) -> Option<BuilderConfig> {
    let expr = parse(text)?;
    let config = config_from_expr(&expr)?;

    // Lossy shapes (a dotted quoted key, a padded alias) are rejected here
    if build_expr(&config) == expr {
        Some(config)
    } else {
        None
    }
}

/// Parse the generator's subset of the expression language
pub fn parse(text: &str) -> Option<Expr> {
    let mut parser = Parser::new(text);
    let expr = parser.expr()?;
    parser.skip_ws();
    if parser.at_end() { Some(expr) } else { None }
}

fn config_from_expr(expr: &Expr) -> Option<BuilderConfig> {
    match expr {
        Expr::Current => Some(BuilderConfig::default()),
        Expr::Length(inner) => {
            let mut config = BuilderConfig::new(Operation::Count);
            match inner.as_ref() {
                Expr::Current => {}
                Expr::Filter(conditions) if !conditions.is_empty() => {
                    config.filters = filters_from(conditions);
                }
                _ => return None,
            }
            Some(config)
        }
        Expr::Reverse(inner) => match inner.as_ref() {
            sorted @ Expr::SortBy { .. } => {
                let mut config = config_from_expr(sorted)?;
                config.sort_direction = SortDirection::Descending;
                Some(config)
            }
            _ => None,
        },
        Expr::SortBy { source, key } => {
            let mut config = match source.as_ref() {
                Expr::Current => BuilderConfig::new(Operation::Sort),
                other => {
                    let mut config = shape_from(other)?;
                    config.operation = Operation::Complex;
                    config
                }
            };
            config.sort_field = Some(key.to_dotted());
            Some(config)
        }
        other => shape_from(other),
    }
}

/// Filter and projection shapes, without a sort
fn shape_from(expr: &Expr) -> Option<BuilderConfig> {
    match expr {
        Expr::Filter(conditions) if !conditions.is_empty() => {
            let mut config = BuilderConfig::new(Operation::Filter);
            config.filters = filters_from(conditions);
            Some(config)
        }
        Expr::Project { source, entries } => {
            let mut config = match source.as_ref() {
                Expr::Wildcard => BuilderConfig::new(Operation::Select),
                Expr::Filter(conditions) if !conditions.is_empty() => {
                    let mut config = BuilderConfig::new(Operation::Complex);
                    config.filters = filters_from(conditions);
                    config
                }
                _ => return None,
            };
            config.selected_fields = fields_from(entries);
            Some(config)
        }
        _ => None,
    }
}

fn filters_from(conditions: &[Condition]) -> Vec<FilterCondition> {
    conditions
        .iter()
        .map(|c| FilterCondition::new(c.field.to_dotted(), c.operator, c.value.to_raw()))
        .collect()
}

fn fields_from(entries: &[ProjectionEntry]) -> Vec<SelectedField> {
    entries
        .iter()
        .map(|e| SelectedField::new(e.path.to_dotted(), e.key.clone()))
        .collect()
}

const COMPARATORS: [(&str, FilterOperator); 6] = [
    ("==", FilterOperator::Equals),
    ("!=", FilterOperator::NotEquals),
    (">=", FilterOperator::GreaterOrEqual),
    ("<=", FilterOperator::LessOrEqual),
    (">", FilterOperator::GreaterThan),
    ("<", FilterOperator::LessThan),
];

const TEXT_FUNCTIONS: [FilterOperator; 3] = [
    FilterOperator::Contains,
    FilterOperator::StartsWith,
    FilterOperator::EndsWith,
];

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    /// Consume `token` after optional whitespace
    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        let end = self.pos + token.chars().count();
        if end > self.chars.len() {
            return false;
        }
        if self.chars[self.pos..end].iter().copied().eq(token.chars()) {
            self.pos = end;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Option<()> {
        self.eat(token).then_some(())
    }

    /// Consume `name(` as a function call opener
    fn eat_call(&mut self, name: &str) -> bool {
        let start = self.pos;
        if self.eat(name) && self.eat("(") {
            return true;
        }
        self.pos = start;
        false
    }

    fn expr(&mut self) -> Option<Expr> {
        if self.eat("@") {
            return Some(Expr::Current);
        }

        if self.eat_call("sort_by") {
            let source = self.expr()?;
            self.expect(",")?;
            self.expect("&")?;
            let key = self.path()?;
            self.expect(")")?;
            return Some(Expr::sort_by(source, key));
        }

        if self.eat_call("reverse") {
            let inner = self.expr()?;
            self.expect(")")?;
            return Some(Expr::reverse(inner));
        }

        if self.eat_call("length") {
            let inner = self.expr()?;
            self.expect(")")?;
            return Some(Expr::length(inner));
        }

        let base = if self.eat("[*]") {
            Expr::Wildcard
        } else if self.eat("[?") {
            let conditions = self.conditions()?;
            self.expect("]")?;
            Expr::Filter(conditions)
        } else {
            return None;
        };

        if self.eat(".") {
            self.expect("{")?;
            let entries = self.entries()?;
            self.expect("}")?;
            return Some(Expr::Project {
                source: Box::new(base),
                entries,
            });
        }

        Some(base)
    }

    fn conditions(&mut self) -> Option<Vec<Condition>> {
        let mut conditions = vec![self.condition()?];
        while self.eat("&&") {
            conditions.push(self.condition()?);
        }
        Some(conditions)
    }

    fn condition(&mut self) -> Option<Condition> {
        for operator in TEXT_FUNCTIONS {
            if self.eat_call(operator.symbol()) {
                let field = self.path()?;
                self.expect(",")?;
                let value = self.literal()?;
                self.expect(")")?;
                return Some(Condition {
                    field,
                    operator,
                    value,
                });
            }
        }

        let field = self.path()?;
        let operator = COMPARATORS
            .iter()
            .find_map(|(symbol, op)| self.eat(symbol).then_some(*op))?;
        let value = self.literal()?;
        Some(Condition {
            field,
            operator,
            value,
        })
    }

    fn entries(&mut self) -> Option<Vec<ProjectionEntry>> {
        let mut entries = Vec::new();
        loop {
            let key = self.identifier()?;
            self.expect(":")?;
            let path = self.path()?;
            entries.push(ProjectionEntry { key, path });
            if !self.eat(",") {
                return Some(entries);
            }
        }
    }

    fn path(&mut self) -> Option<FieldPath> {
        let mut segments = vec![self.identifier()?];
        loop {
            let start = self.pos;
            if !self.eat(".") {
                break;
            }
            match self.identifier() {
                Some(segment) => segments.push(segment),
                None => {
                    self.pos = start;
                    break;
                }
            }
        }
        FieldPath::from_segments(segments)
    }

    fn identifier(&mut self) -> Option<String> {
        self.skip_ws();
        match self.peek()? {
            '"' => {
                let raw = self.delimited('"')?;
                serde_json::from_str(&format!("\"{}\"", raw)).ok()
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = self.pos;
                while self
                    .peek()
                    .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
                {
                    self.pos += 1;
                }
                Some(self.chars[start..self.pos].iter().collect())
            }
            _ => None,
        }
    }

    fn literal(&mut self) -> Option<Literal> {
        self.skip_ws();
        match self.peek()? {
            '\'' => {
                let raw = self.delimited('\'')?;
                Some(Literal::Text(raw.replace("\\'", "'")))
            }
            '`' => {
                let raw = self.delimited('`')?;
                match serde_json::from_str::<Value>(&raw.replace("\\`", "`")).ok()? {
                    Value::Number(number) => Some(Literal::Number(number)),
                    Value::String(text) => Some(Literal::Text(text)),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Read the body between `wrapper` characters, keeping escape pairs intact
    fn delimited(&mut self, wrapper: char) -> Option<String> {
        if self.peek()? != wrapper {
            return None;
        }
        self.pos += 1;

        let mut body = String::new();
        while let Some(c) = self.peek() {
            self.pos += 1;
            if c == wrapper {
                return Some(body);
            }
            body.push(c);
            if c == '\\' {
                body.push(self.peek()?);
                self.pos += 1;
            }
        }
        None
    }
}

#[cfg(test)]
#[path = "recognizer_tests.rs"]
mod recognizer_tests;
