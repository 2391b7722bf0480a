//! State machine error types.

use thiserror::Error;

/// Errors raised by the context/state contract.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StateError {
    /// A transition was requested without a target state.
    /// The context keeps its previously active state.
    #[error("Invalid state: {reason}")]
    InvalidState { reason: String },

    /// A handler ran on a state that has no live owning context.
    #[error("Precondition violated in state '{state}': {reason}")]
    PreconditionViolation { state: String, reason: String },
}
