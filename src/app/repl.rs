use std::io::{self, BufRead, Write};

use super::command::{Command, HELP_TEXT, parse_command};
use super::context::AppContext;
use super::render::{ViewMode, render_outcome};
use super::session::{QueryMode, Session};
use crate::input::InputReader;
use crate::notification::render_notification;
use crate::query::ExecutionOutcome;
use crate::share::DEFAULT_SHARE_BASE;

const PROMPT: &str = "jsonq> ";

enum Flow {
    Continue,
    Quit,
}

/// Line-oriented interactive front end over any reader and writer
pub struct Repl<R, W> {
    input: R,
    output: W,
    view: ViewMode,
    prompt: bool,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(input: R, output: W, view: ViewMode) -> Self {
        Self {
            input,
            output,
            view,
            prompt: true,
        }
    }

    /// Skip the prompt, for piped input and tests
    pub fn without_prompt(mut self) -> Self {
        self.prompt = false;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Read and dispatch lines until `:quit` or end of input
    pub fn run(&mut self, ctx: &mut AppContext, session: &mut Session) -> io::Result<()> {
        self.flush_notifications(ctx)?;
        let mut line = String::new();
        loop {
            if self.prompt {
                write!(self.output, "{}", PROMPT)?;
                self.output.flush()?;
            }

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }

            let flow = match parse_command(&line) {
                None => Flow::Continue,
                Some(Ok(command)) => self.dispatch(ctx, session, command)?,
                Some(Err(message)) => {
                    ctx.notification.show_error(&message);
                    Flow::Continue
                }
            };
            self.flush_notifications(ctx)?;

            if let Flow::Quit = flow {
                break;
            }
        }
        Ok(())
    }

    fn dispatch(
        &mut self,
        ctx: &mut AppContext,
        session: &mut Session,
        command: Command,
    ) -> io::Result<Flow> {
        match command {
            Command::Query(text) => {
                session.set_query_text(&text);
                let outcome = session.run(ctx);
                self.print_outcome(ctx, outcome)?;
            }
            Command::Load(path) => match InputReader::read_file(&path) {
                Ok(text) => self.load(ctx, session, &text)?,
                Err(e) => ctx.notification.show_error(&e.to_string()),
            },
            Command::Json(text) => self.load(ctx, session, &text)?,
            Command::Clear => {
                session.clear_document();
                ctx.notification.show("Document cleared");
            }
            Command::Mode(mode) => {
                if session.set_mode(ctx, mode) {
                    self.print_expression(session)?;
                }
            }
            Command::Operation(operation) => {
                session.builder_mut().set_operation(operation);
                self.print_expression(session)?;
            }
            Command::Select(selected) => {
                let builder = session.builder_mut();
                let index = builder.add_field();
                builder.update_field(index, &selected.field, &selected.alias);
                self.print_expression(session)?;
            }
            Command::Unselect(index) => {
                if session.builder_mut().remove_field(index) {
                    self.print_expression(session)?;
                } else {
                    ctx.notification.show_error(&format!("No field row {}", index));
                }
            }
            Command::Where(condition) => {
                let builder = session.builder_mut();
                let index = builder.add_filter();
                builder.update_filter(index, &condition.field, condition.operator, &condition.value);
                self.print_expression(session)?;
            }
            Command::Unwhere(index) => {
                if session.builder_mut().remove_filter(index) {
                    self.print_expression(session)?;
                } else {
                    ctx.notification.show_error(&format!("No filter row {}", index));
                }
            }
            Command::Sort(field, direction) => {
                let builder = session.builder_mut();
                builder.set_sort_field(Some(&field));
                builder.set_sort_direction(direction);
                self.print_expression(session)?;
            }
            Command::Unsort => {
                session.builder_mut().set_sort_field(None);
                self.print_expression(session)?;
            }
            Command::Reset => {
                session.builder_mut().reset();
                self.print_expression(session)?;
            }
            Command::Show => self.show(session)?,
            Command::Run => {
                let outcome = session.run(ctx);
                self.print_outcome(ctx, outcome)?;
            }
            Command::Fields => {
                if session.document().is_loaded() {
                    for path in session.document().field_paths() {
                        writeln!(self.output, "{}", path)?;
                    }
                } else {
                    ctx.notification.show_error("No JSON document loaded");
                }
            }
            Command::View(view) => self.view = view,
            Command::Export(format, path) => {
                if let Some(text) = session.export(ctx, format, path.as_deref()) {
                    if path.is_none() {
                        writeln!(self.output, "{}", text)?;
                    }
                }
            }
            Command::CopyQuery => {
                session.copy_query(ctx);
            }
            Command::CopyResult => {
                session.copy_result(ctx);
            }
            Command::Share(base) => {
                let base = base.as_deref().unwrap_or(DEFAULT_SHARE_BASE);
                if let Some(link) = session.share_link(ctx, base) {
                    writeln!(self.output, "{}", link)?;
                }
            }
            Command::Open(shared) => {
                if session.apply_shared(ctx, &shared) {
                    match session.outcome() {
                        Some(outcome) if !session.has_pending_shared() => {
                            self.print_outcome(ctx, outcome)?;
                        }
                        _ => ctx
                            .notification
                            .show("Shared query will run once a document is loaded"),
                    }
                }
            }
            Command::Save(name, note) => {
                session.save_query(ctx, &name, note.as_deref());
            }
            Command::Saved => {
                for query in ctx.saved.list() {
                    match &query.description {
                        Some(description) => {
                            writeln!(self.output, "{}  {}  # {}", query.name, query.expression, description)?
                        }
                        None => writeln!(self.output, "{}  {}", query.name, query.expression)?,
                    }
                }
            }
            Command::Use(name) => {
                if session.use_saved(ctx, &name) {
                    self.print_active(ctx, session)?;
                }
            }
            Command::Delete(name) => match ctx.saved.delete(&name) {
                Ok(true) => ctx.notification.show(&format!("Deleted '{}'", name)),
                Ok(false) => ctx
                    .notification
                    .show_error(&format!("No saved query named '{}'", name)),
                Err(e) => ctx.notification.show_error(&format!("Could not delete: {}", e)),
            },
            Command::History(search) => {
                let entries = ctx.history.entries();
                for entry in ctx.history.search(search.as_deref().unwrap_or("")) {
                    let index = entries
                        .iter()
                        .position(|e| e.expression == entry.expression)
                        .unwrap_or_default();
                    writeln!(
                        self.output,
                        "{:>3}  {}  {}",
                        index,
                        entry.timestamp.format("%Y-%m-%d %H:%M"),
                        entry.expression
                    )?;
                }
            }
            Command::Recall(index) => {
                if session.use_history(ctx, index) {
                    self.print_active(ctx, session)?;
                }
            }
            Command::Theme(theme) => ctx.theme = theme,
            Command::Help => writeln!(self.output, "{}", HELP_TEXT)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn load(&mut self, ctx: &mut AppContext, session: &mut Session, text: &str) -> io::Result<()> {
        if session.load_document(ctx, text) {
            if let Some(metadata) = session.document().metadata() {
                writeln!(self.output, "Loaded {}", metadata)?;
            }
        }
        Ok(())
    }

    fn show(&mut self, session: &Session) -> io::Result<()> {
        let mode = match session.mode() {
            QueryMode::Builder => "builder",
            QueryMode::Text => "text",
        };
        let config = session.builder().config();
        writeln!(self.output, "mode: {}", mode)?;
        writeln!(self.output, "operation: {}", config.operation)?;
        for (i, field) in config.selected_fields.iter().enumerate() {
            writeln!(self.output, "  field {}: {} as {}", i, field.field, field.effective_alias())?;
        }
        for (i, filter) in config.filters.iter().enumerate() {
            writeln!(
                self.output,
                "  filter {}: {} {} {}",
                i, filter.field, filter.operator, filter.value
            )?;
        }
        if let Some(field) = config.active_sort_field() {
            writeln!(self.output, "  sort: {} {:?}", field, config.sort_direction)?;
        }
        self.print_expression(session)
    }

    fn print_expression(&mut self, session: &Session) -> io::Result<()> {
        writeln!(self.output, "=> {}", session.active_expression())
    }

    fn print_active(&mut self, ctx: &AppContext, session: &Session) -> io::Result<()> {
        self.print_expression(session)?;
        if let Some(outcome) = session.outcome() {
            self.print_outcome(ctx, outcome)?;
        }
        Ok(())
    }

    fn print_outcome(&mut self, ctx: &AppContext, outcome: &ExecutionOutcome) -> io::Result<()> {
        writeln!(self.output, "{}", render_outcome(outcome, self.view, ctx.theme, ctx.color))
    }

    fn flush_notifications(&mut self, ctx: &mut AppContext) -> io::Result<()> {
        for notification in ctx.notification.drain() {
            writeln!(
                self.output,
                "{}",
                render_notification(&notification, ctx.theme, ctx.color)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "repl_tests.rs"]
mod repl_tests;
