//! Tests for command parsing

use super::*;

fn parse(line: &str) -> Command {
    parse_command(line).unwrap().unwrap()
}

fn parse_err(line: &str) -> String {
    parse_command(line).unwrap().unwrap_err()
}

#[test]
fn test_blank_line_is_nothing() {
    assert_eq!(parse_command("   "), None);
}

#[test]
fn test_plain_text_is_a_query() {
    assert_eq!(parse("  [?a == `1`] "), Command::Query("[?a == `1`]".into()));
}

#[test]
fn test_simple_commands() {
    assert_eq!(parse(":clear"), Command::Clear);
    assert_eq!(parse(":run"), Command::Run);
    assert_eq!(parse(":q"), Command::Quit);
    assert_eq!(parse(":help"), Command::Help);
    assert_eq!(parse(":mode text"), Command::Mode(QueryMode::Text));
    assert_eq!(parse(":op Count"), Command::Operation(Operation::Count));
    assert_eq!(parse(":view both"), Command::View(ViewMode::Both));
    assert_eq!(parse(":theme light"), Command::Theme(Theme::Light));
}

#[test]
fn test_load_and_json() {
    assert_eq!(parse(":load data/people.json"), Command::Load("data/people.json".into()));
    assert_eq!(parse(":json {\"a\": 1}"), Command::Json("{\"a\": 1}".into()));
    assert_eq!(parse_err(":load"), "expected a file path");
}

#[test]
fn test_select_with_and_without_alias() {
    assert_eq!(parse(":select name"), Command::Select(SelectedField::new("name", "")));
    assert_eq!(
        parse(":select address.city = City"),
        Command::Select(SelectedField::new("address.city", "City"))
    );
}

#[test]
fn test_where_keeps_spaces_in_value() {
    assert_eq!(
        parse(":where city == New York"),
        Command::Where(FilterCondition::new("city", FilterOperator::Equals, "New York"))
    );
    assert_eq!(
        parse(":where name startswith A"),
        Command::Where(FilterCondition::new("name", FilterOperator::StartsWith, "A"))
    );
    assert!(parse_err(":where name").starts_with("expected 'FIELD OP VALUE'"));
    assert!(parse_command(":where age ~ 3").unwrap().is_err());
}

#[test]
fn test_row_indices() {
    assert_eq!(parse(":unselect 2"), Command::Unselect(2));
    assert_eq!(parse(":unwhere 0"), Command::Unwhere(0));
    assert_eq!(parse(":recall 1"), Command::Recall(1));
    assert!(parse_err(":unselect x").starts_with("expected a row number"));
}

#[test]
fn test_sort() {
    assert_eq!(parse(":sort age"), Command::Sort("age".into(), SortDirection::Ascending));
    assert_eq!(parse(":sort age desc"), Command::Sort("age".into(), SortDirection::Descending));
    assert_eq!(parse(":unsort"), Command::Unsort);
}

#[test]
fn test_export() {
    assert_eq!(parse(":export csv"), Command::Export(ExportFormat::Csv, None));
    assert_eq!(
        parse(":export json out/result.json"),
        Command::Export(ExportFormat::Json, Some("out/result.json".into()))
    );
    assert!(parse_command(":export xml").unwrap().is_err());
}

#[test]
fn test_copy_share_and_open() {
    assert_eq!(parse(":copy"), Command::CopyQuery);
    assert_eq!(parse(":copy result"), Command::CopyResult);
    assert_eq!(parse(":share"), Command::Share(None));
    assert_eq!(
        parse(":share https://example.com/"),
        Command::Share(Some("https://example.com/".into()))
    );
    assert_eq!(parse(":open abc"), Command::Open("abc".into()));
}

#[test]
fn test_saved_queries() {
    assert_eq!(parse(":save adults"), Command::Save("adults".into(), None));
    assert_eq!(
        parse(":save adults people over 18"),
        Command::Save("adults".into(), Some("people over 18".into()))
    );
    assert_eq!(parse(":saved"), Command::Saved);
    assert_eq!(parse(":use adults"), Command::Use("adults".into()));
    assert_eq!(parse(":delete adults"), Command::Delete("adults".into()));
}

#[test]
fn test_history() {
    assert_eq!(parse(":history"), Command::History(None));
    assert_eq!(parse(":history sort age"), Command::History(Some("sort age".into())));
}

#[test]
fn test_unknown_command() {
    assert_eq!(parse_err(":frobnicate"), "unknown command ':frobnicate' (try :help)");
}

#[test]
fn test_parse_selection() {
    assert_eq!(parse_selection("a=b"), SelectedField::new("a", "b"));
    assert_eq!(parse_selection(" a "), SelectedField::new("a", ""));
}
