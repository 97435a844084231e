//! Result presentation: highlighted text, optional table, and a one-line summary

mod highlight;
mod presenter;
mod stats;
mod table;

pub use highlight::{HighlightedJson, Token, TokenClass};
pub use presenter::{Presentation, Presenter};
pub use stats::{ElementType, ResultStats};
pub use table::{NULL_MARKER, Table};

pub(crate) use table::{cell_text, column_union};
