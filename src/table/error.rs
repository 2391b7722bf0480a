//! Build errors for transition tables and rules.

use thiserror::Error;

/// Errors that can occur when building tables and rules.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No rules defined. Add at least one rule")]
    NoRules,

    #[error("Rule source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Rule event not specified. Call .on(event)")]
    MissingEvent,

    #[error("Duplicate rule for state '{from}' on event '{event}'")]
    DuplicateRule { from: String, event: String },
}
