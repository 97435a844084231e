//! Tests for the session adapter

use super::*;
use crate::builder::{FilterOperator, Operation, SortDirection};
use crate::config::{ClipboardBackend, Config, StorageConfig};
use crate::notification::NotificationType;
use serde_json::json;
use std::cell::Cell;
use tempfile::TempDir;

const WINDOW: u64 = 100;
const PEOPLE: &str = r#"[
    {"name": "Alice", "age": 30, "city": "Paris"},
    {"name": "Bob", "age": 20, "city": "Rome"},
    {"name": "Cara", "age": 40}
]"#;

fn setup() -> (AppContext, Session) {
    let mut config = Config::default();
    config.clipboard.backend = ClipboardBackend::Osc52;
    (AppContext::in_memory(config), Session::new(WINDOW))
}

fn loaded() -> (AppContext, Session) {
    let (mut ctx, mut session) = setup();
    assert!(session.load_document(&mut ctx, PEOPLE));
    (ctx, session)
}

fn last_notification(ctx: &AppContext) -> (NotificationType, String) {
    let latest = ctx.notification.latest().unwrap();
    (latest.notification_type, latest.message.clone())
}

#[test]
fn test_new_session_is_empty() {
    let (_ctx, session) = setup();
    assert_eq!(session.mode(), QueryMode::Builder);
    assert_eq!(session.active_expression(), "@");
    assert!(session.outcome().is_none());
}

#[test]
fn test_execute_without_document_is_empty_input() {
    let (_ctx, mut session) = setup();
    assert_eq!(session.execute(), &ExecutionOutcome::EmptyInput);
}

#[test]
fn test_loading_runs_identity() {
    let (_ctx, session) = loaded();
    assert_eq!(session.result().unwrap().as_array().unwrap().len(), 3);
    assert_eq!(session.document().field_paths(), &["age", "city", "name"]);
}

#[test]
fn test_invalid_json_discards_previous_document() {
    let (mut ctx, mut session) = loaded();

    assert!(!session.load_document(&mut ctx, "{oops"));
    assert!(!session.document().is_loaded());
    assert!(session.outcome().is_none());

    let (kind, message) = last_notification(&ctx);
    assert_eq!(kind, NotificationType::Error);
    assert!(message.starts_with("Invalid JSON: "));
}

#[test]
fn test_builder_edits_drive_execution() {
    let (_ctx, mut session) = loaded();
    {
        let builder = session.builder_mut();
        builder.set_operation(Operation::Complex);
        let filter = builder.add_filter();
        builder.update_filter(filter, "age", FilterOperator::GreaterOrEqual, "30");
        for name in ["name", "age"] {
            let field = builder.add_field();
            builder.update_field(field, name, "");
        }
        builder.set_sort_field(Some("age"));
        builder.set_sort_direction(SortDirection::Descending);
    }

    assert_eq!(
        session.active_expression(),
        "reverse(sort_by([?age >= `30`].{name: name, age: age}, &age))"
    );
    assert_eq!(
        session.execute().value(),
        Some(&json!([{"name": "Cara", "age": 40}, {"name": "Alice", "age": 30}]))
    );
}

#[test]
fn test_count_operation() {
    let (_ctx, mut session) = loaded();
    let builder = session.builder_mut();
    builder.set_operation(Operation::Count);
    let filter = builder.add_filter();
    builder.update_filter(filter, "city", FilterOperator::NotEquals, "Paris");

    assert_eq!(session.execute().value(), Some(&json!(2)));
}

#[test]
fn test_run_records_history_only_on_success() {
    let (mut ctx, mut session) = loaded();

    session.set_query_text("length(@)");
    assert!(session.run(&mut ctx).is_success());

    session.set_query_text("[?");
    assert!(!session.run(&mut ctx).is_success());

    let recorded: Vec<_> = ctx.history.entries().iter().map(|e| e.expression.as_str()).collect();
    assert_eq!(recorded, vec!["length(@)"]);
}

#[test]
fn test_history_write_failure_becomes_warning() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    let config = Config {
        storage: StorageConfig {
            dir: Some(data.clone()),
        },
        ..Config::default()
    };
    let mut ctx = AppContext::new(crate::config::ConfigResult {
        config,
        warning: None,
    });
    std::fs::write(&data, "").unwrap();

    let mut session = Session::new(WINDOW);
    session.load_document(&mut ctx, PEOPLE);
    session.set_query_text("length(@)");
    assert!(session.run(&mut ctx).is_success());

    let (kind, message) = last_notification(&ctx);
    assert_eq!(kind, NotificationType::Warning);
    assert!(message.starts_with("History could not be saved"));
    assert!(!ctx.history.is_persistent());
    assert_eq!(ctx.history.len(), 1);
}

#[test]
fn test_debounced_input_applies_json_before_query() {
    let (mut ctx, mut session) = setup();

    session.on_json_input("[1, 2, 3]", 0);
    session.on_query_input("length(@)", 10);

    assert!(!session.tick(&mut ctx, 50));
    assert!(session.outcome().is_none());

    assert!(session.tick(&mut ctx, 110));
    assert_eq!(session.result(), Some(&json!(3)));
}

#[test]
fn test_debounced_burst_uses_latest_input() {
    let (mut ctx, mut session) = setup();

    session.on_json_input("[1]", 0);
    session.on_json_input("[1, 2]", 60);
    session.on_json_input("[1, 2, 3, 4]", 120);

    assert!(!session.tick(&mut ctx, 200));
    assert!(session.tick(&mut ctx, 220));
    assert_eq!(session.result(), Some(&json!([1, 2, 3, 4])));
    assert!(!session.tick(&mut ctx, 1000));
}

#[test]
fn test_flush_applies_pending_immediately() {
    let (mut ctx, mut session) = setup();
    session.on_json_input(r#"{"a": 1}"#, 0);
    session.on_query_input("a", 0);

    session.flush(&mut ctx);

    assert_eq!(session.result(), Some(&json!(1)));
}

#[test]
fn test_clear_document_drops_result_and_pending_input() {
    let (mut ctx, mut session) = loaded();
    session.on_json_input("[]", 0);

    session.clear_document();

    assert!(!session.document().is_loaded());
    assert!(session.outcome().is_none());
    assert!(!session.tick(&mut ctx, 10_000));
}

#[test]
fn test_mode_switch_round_trip() {
    let (mut ctx, mut session) = loaded();
    {
        let builder = session.builder_mut();
        builder.set_operation(Operation::Filter);
        let filter = builder.add_filter();
        builder.update_filter(filter, "name", FilterOperator::StartsWith, "A");
    }

    assert!(session.set_mode(&mut ctx, QueryMode::Text));
    assert_eq!(session.active_expression(), "[?starts_with(name, 'A')]");

    session.set_query_text("[?age < `25`]");
    assert!(session.set_mode(&mut ctx, QueryMode::Builder));
    assert_eq!(session.builder().operation(), Operation::Filter);
    assert_eq!(session.active_expression(), "[?age < `25`]");
}

#[test]
fn test_unrecognised_text_stays_in_text_mode() {
    let (mut ctx, mut session) = loaded();
    session.set_query_text("[0].name");

    assert!(!session.set_mode(&mut ctx, QueryMode::Builder));
    assert_eq!(session.mode(), QueryMode::Text);
    assert_eq!(last_notification(&ctx).0, NotificationType::Warning);
}

#[test]
fn test_blank_text_resets_builder() {
    let (mut ctx, mut session) = loaded();
    session.builder_mut().set_operation(Operation::Count);
    session.set_query_text("  ");

    assert!(session.set_mode(&mut ctx, QueryMode::Builder));
    assert_eq!(session.builder().operation(), Operation::Select);
    assert_eq!(session.active_expression(), "@");
}

#[test]
fn test_export_without_result_notifies() {
    let (mut ctx, session) = setup();
    assert_eq!(session.export(&mut ctx, ExportFormat::Json, None), None);
    assert_eq!(last_notification(&ctx).0, NotificationType::Error);
}

#[test]
fn test_export_csv_to_file() {
    let (mut ctx, mut session) = loaded();
    session.set_query_text("[*].{name: name}");
    session.execute();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");
    assert!(session.export(&mut ctx, ExportFormat::Csv, Some(&path)).is_some());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "name\nAlice\nBob\nCara\n");
    assert_eq!(last_notification(&ctx).0, NotificationType::Info);
}

#[test]
fn test_export_unsuitable_shape_writes_nothing() {
    let (mut ctx, mut session) = loaded();
    session.set_query_text("[*].name");
    session.execute();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");
    assert!(session.export(&mut ctx, ExportFormat::Csv, Some(&path)).is_none());
    assert!(!path.exists());
}

#[test]
fn test_copy_notifies() {
    let (mut ctx, session) = loaded();
    assert!(session.copy_query(&mut ctx));
    assert_eq!(last_notification(&ctx).1, "Copied query");
    assert!(session.copy_result(&mut ctx));
    assert_eq!(last_notification(&ctx).1, "Copied result");
}

#[test]
fn test_copy_result_without_result() {
    let (mut ctx, session) = setup();
    assert!(!session.copy_result(&mut ctx));
    assert_eq!(last_notification(&ctx).0, NotificationType::Error);
}

#[test]
fn test_shared_query_waits_for_document() {
    let (mut ctx, mut session) = setup();
    let link = share::share_link(share::DEFAULT_SHARE_BASE, "length(@)").unwrap();

    assert!(session.apply_shared(&mut ctx, link.as_str()));
    assert!(session.has_pending_shared());
    assert!(session.outcome().is_none());

    session.load_document(&mut ctx, PEOPLE);
    assert!(!session.has_pending_shared());
    assert_eq!(session.mode(), QueryMode::Text);
    assert_eq!(session.result(), Some(&json!(3)));
}

#[test]
fn test_shared_query_runs_immediately_with_document() {
    let (mut ctx, mut session) = loaded();
    let param = share::encode_share_param("[?age > `25`].name");

    assert!(session.apply_shared(&mut ctx, &param));
    assert_eq!(session.result(), Some(&json!(["Alice", "Cara"])));
}

#[test]
fn test_invalid_share_notifies() {
    let (mut ctx, mut session) = loaded();
    assert!(!session.apply_shared(&mut ctx, "https://example.com/?x=1"));
    assert_eq!(last_notification(&ctx).0, NotificationType::Error);
}

#[test]
fn test_share_link_uses_active_expression() {
    let (mut ctx, mut session) = loaded();
    session.set_query_text("length(@)");
    let link = session.share_link(&mut ctx, "https://example.com/").unwrap();
    assert_eq!(share::query_from_link(link.as_str()).unwrap(), "length(@)");
}

#[test]
fn test_save_and_use_saved_query() {
    let (mut ctx, mut session) = loaded();
    session.set_query_text("[?age > `25`]");
    assert!(session.save_query(&mut ctx, "older", Some("over 25")));

    session.set_query_text("@");
    assert!(session.use_saved(&mut ctx, "older"));
    assert_eq!(session.mode(), QueryMode::Builder);
    assert_eq!(session.builder().operation(), Operation::Filter);
    assert_eq!(session.result().unwrap().as_array().unwrap().len(), 2);

    assert!(!session.use_saved(&mut ctx, "missing"));
}

#[test]
fn test_use_history_keeps_text_queries_as_text() {
    let (mut ctx, mut session) = loaded();
    session.set_query_text("[0].name");
    session.run(&mut ctx);
    session.set_query_text("@");

    assert!(session.use_history(&mut ctx, 0));
    assert_eq!(session.mode(), QueryMode::Text);
    assert_eq!(session.result(), Some(&json!("Alice")));
    assert!(!session.use_history(&mut ctx, 5));
}

struct CountingEvaluator {
    calls: Cell<usize>,
}

impl Evaluator for CountingEvaluator {
    fn evaluate(&self, _expression: &str, document: &Value) -> Result<Value, String> {
        self.calls.set(self.calls.get() + 1);
        Ok(document.clone())
    }
}

#[test]
fn test_burst_of_query_input_evaluates_once() {
    let (mut ctx, _) = setup();
    let mut session = Session::with_evaluator(CountingEvaluator { calls: Cell::new(0) }, WINDOW);
    session.load_document(&mut ctx, "[]");
    let after_load = session.executor_calls();

    for (i, text) in ["l", "le", "len", "length(@)"].iter().enumerate() {
        session.on_query_input(text, i as u64 * 10);
    }
    session.tick(&mut ctx, 500);
    session.tick(&mut ctx, 900);

    assert_eq!(session.executor_calls() - after_load, 1);
}

impl Session<CountingEvaluator> {
    fn executor_calls(&self) -> usize {
        self.executor.evaluator().calls.get()
    }
}
