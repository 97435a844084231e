mod command;
mod context;
mod render;
mod repl;
mod session;

pub use command::{Command, HELP_TEXT, parse_command, parse_filter, parse_selection};
pub use context::AppContext;
pub use render::{ViewMode, render_outcome};
pub use repl::Repl;
pub use session::{QueryMode, Session};
