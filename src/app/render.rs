use std::fmt;

use crate::query::ExecutionOutcome;
use crate::results::{Presentation, Presenter};
use crate::theme::Theme;

/// Which result views are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ViewMode {
    #[default]
    Text,
    Table,
    Both,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Text => write!(f, "text"),
            ViewMode::Table => write!(f, "table"),
            ViewMode::Both => write!(f, "both"),
        }
    }
}

/// Terminal text for an outcome.
///
/// A table is printed only when the result has one; otherwise the text view
/// stands in for it. Non-success outcomes render their status message.
pub fn render_outcome(outcome: &ExecutionOutcome, view: ViewMode, theme: Theme, color: bool) -> String {
    match outcome.value() {
        Some(value) => render_presentation(&Presenter::present(value), view, theme, color),
        None => outcome.status_message().unwrap_or_default(),
    }
}

fn render_presentation(presentation: &Presentation, view: ViewMode, theme: Theme, color: bool) -> String {
    let text = if color {
        presentation.text_view.to_ansi(theme)
    } else {
        presentation.text_view.plain()
    };

    let mut sections = Vec::new();
    match (view, &presentation.table_view) {
        (ViewMode::Text, _) | (ViewMode::Table, None) => sections.push(text),
        (ViewMode::Table, Some(table)) => sections.push(table.render()),
        (ViewMode::Both, Some(table)) => {
            sections.push(text);
            sections.push(table.render());
        }
        (ViewMode::Both, None) => sections.push(text),
    }
    sections.push(format!("-- {}", presentation.stats));
    sections.join("\n\n")
}
