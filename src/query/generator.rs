//! Builder configuration to expression text
//!
//! Generation is a pure function of the configuration. Rows with a blank
//! field are skipped so a half-edited builder still yields valid text, and an
//! empty configuration always yields the identity expression.

use crate::builder::{BuilderConfig, Operation, SortDirection};

use super::expr::{Condition, Expr, FieldPath, Literal, ProjectionEntry};

/// Generate expression text for `config`
pub fn generate(config: &BuilderConfig) -> String {
    build_expr(config).to_string()
}

/// Build the expression tree for `config`
pub fn build_expr(config: &BuilderConfig) -> Expr {
    match config.operation {
        Operation::Select => select_expr(config),
        Operation::Filter => filter_expr(config).unwrap_or(Expr::Current),
        Operation::Count => Expr::length(filter_expr(config).unwrap_or(Expr::Current)),
        Operation::Sort => sort_expr(config, Expr::Current),
        Operation::Complex => complex_expr(config),
    }
}

fn select_expr(config: &BuilderConfig) -> Expr {
    let entries = projection_entries(config);
    if entries.is_empty() {
        Expr::Current
    } else {
        Expr::project(Expr::Wildcard, entries)
    }
}

fn filter_expr(config: &BuilderConfig) -> Option<Expr> {
    let conditions = conditions(config);
    if conditions.is_empty() {
        None
    } else {
        Some(Expr::Filter(conditions))
    }
}

/// Wrap `source` in a sort when a sort field is set
fn sort_expr(config: &BuilderConfig, source: Expr) -> Expr {
    let key = config.active_sort_field().and_then(FieldPath::parse);
    sorted_by(config, source, key)
}

fn sorted_by(config: &BuilderConfig, source: Expr, key: Option<FieldPath>) -> Expr {
    let Some(key) = key else {
        return source;
    };

    let sorted = Expr::sort_by(source, key);
    match config.sort_direction {
        SortDirection::Ascending => sorted,
        SortDirection::Descending => Expr::reverse(sorted),
    }
}

/// Filter, then project, then sort
fn complex_expr(config: &BuilderConfig) -> Expr {
    let entries = projection_entries(config);

    let base = match filter_expr(config) {
        Some(filter) => filter,
        None if !entries.is_empty() => Expr::Wildcard,
        None => Expr::Current,
    };

    if entries.is_empty() {
        return sort_expr(config, base);
    }

    let key = projected_sort_key(config);
    sorted_by(config, Expr::project(base, entries), key)
}

/// Sort key once records are projected. A sort field naming a selected
/// source field sorts by that field's alias; alias names are used as is.
fn projected_sort_key(config: &BuilderConfig) -> Option<FieldPath> {
    let sort_field = config.active_sort_field()?;
    let selected = || {
        config
            .selected_fields
            .iter()
            .filter(|selected| FieldPath::parse(&selected.field).is_some())
    };

    let by_alias = selected().find(|selected| selected.effective_alias() == sort_field);
    let by_field = || selected().find(|selected| selected.field.trim() == sort_field);

    match by_alias.or_else(by_field) {
        Some(selected) => FieldPath::from_segments(vec![selected.effective_alias().to_string()]),
        None => FieldPath::parse(sort_field),
    }
}

fn projection_entries(config: &BuilderConfig) -> Vec<ProjectionEntry> {
    config
        .selected_fields
        .iter()
        .filter_map(|selected| {
            let path = FieldPath::parse(&selected.field)?;
            Some(ProjectionEntry {
                key: selected.effective_alias().to_string(),
                path,
            })
        })
        .collect()
}

fn conditions(config: &BuilderConfig) -> Vec<Condition> {
    config
        .filters
        .iter()
        .filter_map(|filter| {
            let field = FieldPath::parse(&filter.field)?;
            Some(Condition {
                field,
                operator: filter.operator,
                value: Literal::from_raw(&filter.value),
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "generator_tests.rs"]
mod generator_tests;
