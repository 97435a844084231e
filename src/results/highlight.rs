use std::fmt::Write as _;

use crossterm::style::Stylize;
use serde_json::Value;

use crate::theme::Theme;

const INDENT: &str = "  ";

/// Lexical class of a token in pretty-printed JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Key,
    String,
    Number,
    Boolean,
    Null,
    Punctuation,
    Whitespace,
}

impl TokenClass {
    /// CSS class used by [`HighlightedJson::to_markup`], `None` for untagged tokens
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            TokenClass::Key => Some("json-key"),
            TokenClass::String => Some("json-string"),
            TokenClass::Number => Some("json-number"),
            TokenClass::Boolean => Some("json-boolean"),
            TokenClass::Null => Some("json-null"),
            TokenClass::Punctuation | TokenClass::Whitespace => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub class: TokenClass,
    pub text: String,
}

/// Pretty-printed JSON split into classified tokens.
///
/// Concatenating the token texts gives exactly `serde_json::to_string_pretty`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighlightedJson {
    tokens: Vec<Token>,
}

impl HighlightedJson {
    pub fn new(value: &Value) -> Self {
        let mut out = Self::default();
        out.value(value, 0);
        out
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn plain(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    /// Markup with `& < > " '` escaped and tagged tokens wrapped in spans
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            let text = escape_markup(&token.text);
            match token.class.css_class() {
                Some(class) => {
                    let _ = write!(out, "<span class=\"{}\">{}</span>", class, text);
                }
                None => out.push_str(&text),
            }
        }
        out
    }

    /// Text with ANSI colour codes from the given theme
    pub fn to_ansi(&self, theme: Theme) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            match theme.token_color(token.class) {
                Some(color) => {
                    let _ = write!(out, "{}", token.text.as_str().with(color));
                }
                None => out.push_str(&token.text),
            }
        }
        out
    }

    fn push(&mut self, class: TokenClass, text: impl Into<String>) {
        self.tokens.push(Token {
            class,
            text: text.into(),
        });
    }

    fn newline(&mut self, depth: usize) {
        self.push(TokenClass::Whitespace, format!("\n{}", INDENT.repeat(depth)));
    }

    fn value(&mut self, value: &Value, depth: usize) {
        match value {
            Value::Null => self.push(TokenClass::Null, "null"),
            Value::Bool(b) => self.push(TokenClass::Boolean, b.to_string()),
            Value::Number(_) => self.push(TokenClass::Number, value.to_string()),
            Value::String(s) => self.push(TokenClass::String, quoted(s)),
            Value::Array(items) if items.is_empty() => self.push(TokenClass::Punctuation, "[]"),
            Value::Object(map) if map.is_empty() => self.push(TokenClass::Punctuation, "{}"),
            Value::Array(items) => {
                self.push(TokenClass::Punctuation, "[");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.push(TokenClass::Punctuation, ",");
                    }
                    self.newline(depth + 1);
                    self.value(item, depth + 1);
                }
                self.newline(depth);
                self.push(TokenClass::Punctuation, "]");
            }
            Value::Object(map) => {
                self.push(TokenClass::Punctuation, "{");
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        self.push(TokenClass::Punctuation, ",");
                    }
                    self.newline(depth + 1);
                    self.push(TokenClass::Key, quoted(key));
                    self.push(TokenClass::Punctuation, ":");
                    self.push(TokenClass::Whitespace, " ");
                    self.value(item, depth + 1);
                }
                self.newline(depth);
                self.push(TokenClass::Punctuation, "}");
            }
        }
    }
}

fn quoted(s: &str) -> String {
    // Value::String displays with serde_json's own escaping
    Value::String(s.to_string()).to_string()
}

pub(crate) fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "highlight_tests.rs"]
mod highlight_tests;
