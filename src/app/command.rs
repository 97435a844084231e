//! Interactive commands.
//!
//! Lines starting with `:` are commands; anything else is expression text.

use std::path::PathBuf;

use super::render::ViewMode;
use super::session::QueryMode;
use crate::builder::{FilterCondition, FilterOperator, Operation, SelectedField, SortDirection};
use crate::export::ExportFormat;
use crate::theme::Theme;

pub const HELP_TEXT: &str = "\
Type a JMESPath expression to run it, or a command:
  :load PATH              load a JSON file
  :json TEXT              load JSON text
  :clear                  drop the current document
  :mode builder|text      switch query source
  :op OPERATION           select, filter, count, sort or complex
  :select FIELD[=ALIAS]   add a projected field
  :unselect N             remove projected field N
  :where FIELD OP VALUE   add a filter (==, !=, >, >=, <, <=, contains, starts_with, ends_with)
  :unwhere N              remove filter N
  :sort FIELD [asc|desc]  sort by a field
  :unsort                 stop sorting
  :reset                  clear the builder
  :show                   show the builder and active expression
  :run                    run the active expression
  :fields                 list field paths of the document
  :view text|table|both   choose result views
  :export json|csv [PATH] export the result
  :copy [query|result]    copy to the clipboard
  :share [BASE_URL]       print a shareable link
  :open SHARED            open a shared link or parameter
  :save NAME [NOTE...]    save the active expression
  :saved                  list saved queries
  :use NAME               load a saved query
  :delete NAME            delete a saved query
  :history [SEARCH]       list or search history
  :recall N               load history entry N
  :theme dark|light       change colours
  :help                   show this help
  :quit                   leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Query(String),
    Load(PathBuf),
    Json(String),
    Clear,
    Mode(QueryMode),
    Operation(Operation),
    Select(SelectedField),
    Unselect(usize),
    Where(FilterCondition),
    Unwhere(usize),
    Sort(String, SortDirection),
    Unsort,
    Reset,
    Show,
    Run,
    Fields,
    View(ViewMode),
    Export(ExportFormat, Option<PathBuf>),
    CopyQuery,
    CopyResult,
    Share(Option<String>),
    Open(String),
    Save(String, Option<String>),
    Saved,
    Use(String),
    Delete(String),
    History(Option<String>),
    Recall(usize),
    Theme(Theme),
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<Result<Command, String>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let Some(body) = line.strip_prefix(':') else {
        return Some(Ok(Command::Query(line.to_string())));
    };

    let (name, rest) = match body.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (body, ""),
    };
    Some(parse_named(name, rest))
}

fn parse_named(name: &str, rest: &str) -> Result<Command, String> {
    let command = match name {
        "load" => Command::Load(PathBuf::from(required(rest, "a file path")?)),
        "json" => Command::Json(required(rest, "JSON text")?.to_string()),
        "clear" => Command::Clear,
        "mode" => Command::Mode(match rest {
            "builder" => QueryMode::Builder,
            "text" => QueryMode::Text,
            other => return Err(format!("unknown mode '{}' (expected builder or text)", other)),
        }),
        "op" => Command::Operation(required(rest, "an operation")?.parse()?),
        "select" => Command::Select(parse_selection(required(rest, "a field")?)),
        "unselect" => Command::Unselect(parse_index(rest)?),
        "where" => Command::Where(parse_filter(rest)?),
        "unwhere" => Command::Unwhere(parse_index(rest)?),
        "sort" => {
            let mut parts = rest.split_whitespace();
            let field = parts.next().ok_or("expected a field to sort by")?;
            let direction = match parts.next() {
                Some(direction) => direction.parse()?,
                None => SortDirection::Ascending,
            };
            Command::Sort(field.to_string(), direction)
        }
        "unsort" => Command::Unsort,
        "reset" => Command::Reset,
        "show" => Command::Show,
        "run" => Command::Run,
        "fields" => Command::Fields,
        "view" => Command::View(match rest {
            "text" => ViewMode::Text,
            "table" => ViewMode::Table,
            "both" => ViewMode::Both,
            other => return Err(format!("unknown view '{}' (expected text, table or both)", other)),
        }),
        "export" => {
            let (format, path) = match rest.split_once(char::is_whitespace) {
                Some((format, path)) => (format, Some(PathBuf::from(path.trim()))),
                None => (rest, None),
            };
            Command::Export(required(format, "a format")?.parse()?, path)
        }
        "copy" => match rest {
            "" | "query" => Command::CopyQuery,
            "result" => Command::CopyResult,
            other => return Err(format!("unknown copy target '{}' (expected query or result)", other)),
        },
        "share" => Command::Share(optional(rest)),
        "open" => Command::Open(required(rest, "a link or parameter")?.to_string()),
        "save" => {
            let (name, note) = match rest.split_once(char::is_whitespace) {
                Some((name, note)) => (name, optional(note.trim())),
                None => (rest, None),
            };
            Command::Save(required(name, "a name")?.to_string(), note)
        }
        "saved" => Command::Saved,
        "use" => Command::Use(required(rest, "a name")?.to_string()),
        "delete" => Command::Delete(required(rest, "a name")?.to_string()),
        "history" => Command::History(optional(rest)),
        "recall" => Command::Recall(parse_index(rest)?),
        "theme" => Command::Theme(rest.parse()?),
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(format!("unknown command ':{}' (try :help)", other)),
    };
    Ok(command)
}

/// `FIELD` or `FIELD=ALIAS`
pub fn parse_selection(text: &str) -> SelectedField {
    match text.split_once('=') {
        Some((field, alias)) => SelectedField::new(field.trim(), alias.trim()),
        None => SelectedField::new(text.trim(), ""),
    }
}

/// `FIELD OP VALUE`; the value is the rest of the text and may contain spaces
pub fn parse_filter(text: &str) -> Result<FilterCondition, String> {
    let text = text.trim();
    let (field, rest) = text
        .split_once(char::is_whitespace)
        .ok_or_else(|| format!("expected 'FIELD OP VALUE', got '{}'", text))?;
    let rest = rest.trim_start();
    let (operator, value) = match rest.split_once(char::is_whitespace) {
        Some((operator, value)) => (operator, value.trim()),
        None => (rest, ""),
    };
    let operator: FilterOperator = operator.parse()?;
    Ok(FilterCondition::new(field, operator, value))
}

fn parse_index(text: &str) -> Result<usize, String> {
    text.trim()
        .parse()
        .map_err(|_| format!("expected a row number, got '{}'", text))
}

fn required<'a>(text: &'a str, what: &str) -> Result<&'a str, String> {
    if text.is_empty() {
        Err(format!("expected {}", what))
    } else {
        Ok(text)
    }
}

fn optional(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod command_tests;
