use crate::query::generate;

use super::config::{BuilderConfig, FilterCondition, Operation, SelectedField, SortDirection};
use super::operator::FilterOperator;

/// Which editors are shown for the active operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleSections {
    pub fields: bool,
    pub filters: bool,
    pub sort: bool,
}

impl VisibleSections {
    pub fn for_operation(operation: Operation) -> Self {
        match operation {
            Operation::Select => Self {
                fields: true,
                filters: false,
                sort: false,
            },
            Operation::Filter | Operation::Count => Self {
                fields: false,
                filters: true,
                sort: false,
            },
            Operation::Sort => Self {
                fields: false,
                filters: false,
                sort: true,
            },
            Operation::Complex => Self {
                fields: true,
                filters: true,
                sort: true,
            },
        }
    }
}

/// Owns the builder configuration and the text generated from it.
///
/// Every mutation regenerates, so [`BuilderState::expression`] always matches
/// the configuration. Index-based edits return `false` when the index is out
/// of range and leave the state unchanged.
#[derive(Debug, Clone)]
pub struct BuilderState {
    config: BuilderConfig,
    expression: String,
}

impl Default for BuilderState {
    fn default() -> Self {
        Self::new()
    }
}

impl BuilderState {
    pub fn new() -> Self {
        Self::from_config(BuilderConfig::default())
    }

    pub fn from_config(config: BuilderConfig) -> Self {
        let expression = generate(&config);
        Self { config, expression }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn operation(&self) -> Operation {
        self.config.operation
    }

    pub fn visible_sections(&self) -> VisibleSections {
        VisibleSections::for_operation(self.config.operation)
    }

    /// Switch the active operation. Configured fields, filters and sort are kept.
    pub fn set_operation(&mut self, operation: Operation) {
        self.config.operation = operation;
        self.regenerate();
    }

    /// Append an empty field row and return its index
    pub fn add_field(&mut self) -> usize {
        self.config.selected_fields.push(SelectedField::default());
        self.regenerate();
        self.config.selected_fields.len() - 1
    }

    pub fn update_field(&mut self, index: usize, field: &str, alias: &str) -> bool {
        let Some(row) = self.config.selected_fields.get_mut(index) else {
            return false;
        };
        row.field = field.to_string();
        row.alias = alias.to_string();
        self.regenerate();
        true
    }

    pub fn remove_field(&mut self, index: usize) -> bool {
        if index >= self.config.selected_fields.len() {
            return false;
        }
        self.config.selected_fields.remove(index);
        self.regenerate();
        true
    }

    /// Append an empty filter row and return its index
    pub fn add_filter(&mut self) -> usize {
        self.config.filters.push(FilterCondition::default());
        self.regenerate();
        self.config.filters.len() - 1
    }

    pub fn update_filter(
        &mut self,
        index: usize,
        field: &str,
        operator: FilterOperator,
        value: &str,
    ) -> bool {
        let Some(row) = self.config.filters.get_mut(index) else {
            return false;
        };
        row.field = field.to_string();
        row.operator = operator;
        row.value = value.to_string();
        self.regenerate();
        true
    }

    pub fn remove_filter(&mut self, index: usize) -> bool {
        if index >= self.config.filters.len() {
            return false;
        }
        self.config.filters.remove(index);
        self.regenerate();
        true
    }

    pub fn set_sort_field(&mut self, field: Option<&str>) {
        self.config.sort_field = field.map(str::to_string);
        self.regenerate();
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        self.config.sort_direction = direction;
        self.regenerate();
    }

    /// Replace the whole configuration
    pub fn load(&mut self, config: BuilderConfig) {
        self.config = config;
        self.regenerate();
    }

    /// Clear everything and return to an empty select
    pub fn reset(&mut self) {
        self.load(BuilderConfig::default());
    }

    fn regenerate(&mut self) {
        self.expression = generate(&self.config);

        #[cfg(debug_assertions)]
        log::debug!("Builder regenerated: {}", self.expression);
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod state_tests;
