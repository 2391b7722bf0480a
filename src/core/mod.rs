//! Core state machine types.
//!
//! This module contains the delegating state machine:
//! - The `State` capability contract and its `Owner` back-reference
//! - The `Context` that owns the active state
//! - Events, errors and activation history

mod context;
mod error;
mod event;
mod history;
mod state;

pub use context::Context;
pub use error::StateError;
pub use event::Event;
pub use history::{StateHistory, StateTransition};
pub use state::{Owner, State};
