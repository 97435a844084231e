use std::path::Path;

use serde_json::Value;
use url::Url;

use super::context::AppContext;
use crate::builder::BuilderState;
use crate::clipboard::copy_to_clipboard;
use crate::document::Document;
use crate::export::{self, ExportFormat};
use crate::query::{
    Debouncer, Evaluator, ExecutionOutcome, JmespathEvaluator, QueryExecutor, recognize,
};
use crate::results::{Presentation, Presenter};
use crate::share;

/// Where the active expression comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryMode {
    #[default]
    Builder,
    Text,
}

/// Binds the document, builder and executor together.
///
/// Errors never escape: they become notifications on the context and the
/// session is left either valid or empty.
#[derive(Debug)]
pub struct Session<E = JmespathEvaluator> {
    document: Document,
    builder: BuilderState,
    mode: QueryMode,
    query_text: String,
    executor: QueryExecutor<E>,
    outcome: Option<ExecutionOutcome>,
    json_debouncer: Debouncer,
    query_debouncer: Debouncer,
    pending_json: Option<String>,
    /// Shared query waiting for a document to run against
    pending_shared: Option<String>,
}

impl Session {
    pub fn new(debounce_ms: u64) -> Self {
        Self::with_evaluator(JmespathEvaluator, debounce_ms)
    }
}

impl<E: Evaluator> Session<E> {
    pub fn with_evaluator(evaluator: E, debounce_ms: u64) -> Self {
        Self {
            document: Document::new(),
            builder: BuilderState::new(),
            mode: QueryMode::Builder,
            query_text: String::new(),
            executor: QueryExecutor::with_evaluator(evaluator),
            outcome: None,
            json_debouncer: Debouncer::with_window(debounce_ms),
            query_debouncer: Debouncer::with_window(debounce_ms),
            pending_json: None,
            pending_shared: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn builder(&self) -> &BuilderState {
        &self.builder
    }

    /// Edit the builder; this makes the builder the active query source
    pub fn builder_mut(&mut self) -> &mut BuilderState {
        self.mode = QueryMode::Builder;
        &mut self.builder
    }

    pub fn mode(&self) -> QueryMode {
        self.mode
    }

    /// Latest outcome, kept until the next execution or document change
    pub fn outcome(&self) -> Option<&ExecutionOutcome> {
        self.outcome.as_ref()
    }

    pub fn result(&self) -> Option<&Value> {
        self.outcome.as_ref().and_then(ExecutionOutcome::value)
    }

    pub fn presentation(&self) -> Option<Presentation> {
        self.result().map(Presenter::present)
    }

    /// The expression that runs next, from the builder or the text input
    pub fn active_expression(&self) -> &str {
        match self.mode {
            QueryMode::Builder => self.builder.expression(),
            QueryMode::Text => &self.query_text,
        }
    }

    pub fn has_pending_shared(&self) -> bool {
        self.pending_shared.is_some()
    }

    /// Parse and install a document. A parse failure discards the previous
    /// document and result.
    pub fn load_document(&mut self, ctx: &mut AppContext, text: &str) -> bool {
        self.outcome = None;
        if let Err(e) = self.document.set_text(text) {
            ctx.notification.show_error(&format!("Invalid JSON: {}", e.message()));
            return false;
        }

        if let Some(metadata) = self.document.metadata() {
            log::debug!("Loaded document: {}", metadata);
        }

        if let Some(shared) = self.pending_shared.take() {
            self.set_query_text(&shared);
        }
        self.execute();
        true
    }

    pub fn clear_document(&mut self) {
        self.document.clear();
        self.outcome = None;
        self.pending_json = None;
        self.json_debouncer.mark_executed();
    }

    /// Queue document text, applied once input has been quiet for the window
    pub fn on_json_input(&mut self, text: &str, now_ms: u64) {
        self.pending_json = Some(text.to_string());
        self.json_debouncer.schedule_execution_at(now_ms);
    }

    /// Queue expression text, switching to text mode
    pub fn on_query_input(&mut self, text: &str, now_ms: u64) {
        self.mode = QueryMode::Text;
        self.query_text = text.to_string();
        self.query_debouncer.schedule_execution_at(now_ms);
    }

    /// Apply whatever debounced input is due. Document input goes first so a
    /// query typed in the same window runs against the new document.
    ///
    /// Returns whether anything was applied.
    pub fn tick(&mut self, ctx: &mut AppContext, now_ms: u64) -> bool {
        let mut applied = false;

        if self.json_debouncer.should_execute_at(now_ms) {
            self.json_debouncer.mark_executed();
            if let Some(text) = self.pending_json.take() {
                self.load_document(ctx, &text);
                applied = true;
            }
        }

        if self.query_debouncer.should_execute_at(now_ms) {
            self.query_debouncer.mark_executed();
            self.execute();
            applied = true;
        }

        applied
    }

    /// Apply pending input immediately, regardless of the window
    pub fn flush(&mut self, ctx: &mut AppContext) {
        if self.json_debouncer.has_pending() {
            self.json_debouncer.mark_executed();
            if let Some(text) = self.pending_json.take() {
                self.load_document(ctx, &text);
            }
        }
        if self.query_debouncer.has_pending() {
            self.query_debouncer.mark_executed();
            self.execute();
        }
    }

    /// Replace the text query without waiting, switching to text mode
    pub fn set_query_text(&mut self, text: &str) {
        self.mode = QueryMode::Text;
        self.query_text = text.to_string();
    }

    /// Switch query source.
    ///
    /// Going to text mode copies the generated expression. Going back to the
    /// builder only succeeds for expressions the builder can represent.
    pub fn set_mode(&mut self, ctx: &mut AppContext, mode: QueryMode) -> bool {
        match (self.mode, mode) {
            (QueryMode::Builder, QueryMode::Text) => {
                self.query_text = self.builder.expression().to_string();
            }
            (QueryMode::Text, QueryMode::Builder) => {
                if self.query_text.trim().is_empty() {
                    self.builder.reset();
                } else {
                    match recognize(&self.query_text) {
                        Some(config) => self.builder.load(config),
                        None => {
                            ctx.notification
                                .show_warning("This query can't be edited in the builder");
                            return false;
                        }
                    }
                }
            }
            _ => {}
        }
        self.mode = mode;
        true
    }

    /// Evaluate the active expression without recording it
    pub fn execute(&mut self) -> &ExecutionOutcome {
        let outcome = self
            .executor
            .execute(self.active_expression(), self.document.value());
        self.outcome.insert(outcome)
    }

    /// Evaluate and, on success, record the expression in history
    pub fn run(&mut self, ctx: &mut AppContext) -> &ExecutionOutcome {
        let succeeded = self.execute().is_success();
        if succeeded {
            let expression = self.active_expression().to_string();
            if let Err(e) = ctx.history.add(&expression) {
                ctx.notification.show_warning(&format!(
                    "History could not be saved, keeping it for this session only: {}",
                    e
                ));
            }
        }
        self.outcome.get_or_insert(ExecutionOutcome::EmptyQuery)
    }

    /// Export the current result, to `path` when given, otherwise as text
    pub fn export(
        &self,
        ctx: &mut AppContext,
        format: ExportFormat,
        path: Option<&Path>,
    ) -> Option<String> {
        let result = match path {
            Some(path) => export::export_to_file(format, self.result(), path).map(|()| {
                ctx.notification
                    .show(&format!("Exported {} to {}", format, path.display()));
                String::new()
            }),
            None => export::export_as(format, self.result()),
        };

        match result {
            Ok(text) => Some(text),
            Err(e) => {
                ctx.notification.show_error(&e.to_string());
                None
            }
        }
    }

    pub fn copy_query(&self, ctx: &mut AppContext) -> bool {
        let expression = self.active_expression().to_string();
        self.copy(ctx, &expression, "query")
    }

    pub fn copy_result(&self, ctx: &mut AppContext) -> bool {
        let Some(value) = self.result() else {
            ctx.notification.show_error("There is no result to copy");
            return false;
        };
        let text = match serde_json::to_string_pretty(value) {
            Ok(text) => text,
            Err(e) => {
                ctx.notification.show_error(&e.to_string());
                return false;
            }
        };
        self.copy(ctx, &text, "result")
    }

    fn copy(&self, ctx: &mut AppContext, text: &str, what: &str) -> bool {
        match copy_to_clipboard(text, ctx.clipboard_backend()) {
            Ok(()) => {
                ctx.notification.show(&format!("Copied {}", what));
                true
            }
            Err(e) => {
                ctx.notification.show_error(&format!("Copy failed: {}", e));
                false
            }
        }
    }

    /// Link carrying the active expression
    pub fn share_link(&self, ctx: &mut AppContext, base: &str) -> Option<Url> {
        match share::share_link(base, self.active_expression()) {
            Ok(url) => Some(url),
            Err(e) => {
                ctx.notification.show_error(&format!("Could not build link: {}", e));
                None
            }
        }
    }

    /// Open a shared link or parameter as the text query.
    ///
    /// Without a document the query waits and runs once one is loaded.
    pub fn apply_shared(&mut self, ctx: &mut AppContext, link_or_param: &str) -> bool {
        let expression = match share::resolve_shared(link_or_param) {
            Ok(expression) => expression,
            Err(e) => {
                ctx.notification.show_error(&format!("Invalid shared query: {}", e));
                return false;
            }
        };

        if self.document.is_loaded() {
            self.set_query_text(&expression);
            self.execute();
        } else {
            self.pending_shared = Some(expression);
        }
        true
    }

    /// Store the active expression under `name`
    pub fn save_query(&self, ctx: &mut AppContext, name: &str, description: Option<&str>) -> bool {
        let expression = self.active_expression().to_string();
        match ctx.saved.save(name, &expression, description) {
            Ok(saved) => {
                let message = format!("Saved query '{}'", saved.name);
                ctx.notification.show(&message);
                true
            }
            Err(e) => {
                ctx.notification.show_error(&format!("Could not save query: {}", e));
                false
            }
        }
    }

    /// Make a saved query the active one, in the builder when it fits
    pub fn use_saved(&mut self, ctx: &mut AppContext, name: &str) -> bool {
        let Some(expression) = ctx.saved.get(name).map(|q| q.expression.clone()) else {
            ctx.notification.show_error(&format!("No saved query named '{}'", name.trim()));
            return false;
        };
        self.use_expression(&expression);
        self.execute();
        true
    }

    /// Make a history entry the active query; index 0 is the newest
    pub fn use_history(&mut self, ctx: &mut AppContext, index: usize) -> bool {
        let Some(expression) = ctx.history.entries().get(index).map(|e| e.expression.clone()) else {
            ctx.notification.show_error(&format!("No history entry {}", index));
            return false;
        };
        self.use_expression(&expression);
        self.execute();
        true
    }

    fn use_expression(&mut self, expression: &str) {
        match recognize(expression) {
            Some(config) => {
                self.builder.load(config);
                self.mode = QueryMode::Builder;
            }
            None => self.set_query_text(expression),
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
