//! Visual query builder
//!
//! The builder owns a [`BuilderConfig`] and regenerates expression text after
//! every edit. Switching operation only changes which sections are shown and
//! which parts of the configuration feed the generator; it never clears data.

mod config;
mod operator;
mod state;

pub use config::{BuilderConfig, FilterCondition, Operation, SelectedField, SortDirection};
pub use operator::{FilterOperator, OperatorClass};
pub use state::{BuilderState, VisibleSections};
