//! Statecraft: behavioral design patterns around a delegating state machine
//!
//! The centre of the crate is the State pattern. A [`Context`] owns one
//! active [`State`] and forwards every request to it; a state's handler
//! may swap the context's active state before returning. States hold a
//! weak back-reference to their context, so a context is dropped as soon
//! as its last handle goes away.
//!
//! # Core Concepts
//!
//! - **Context**: Owns the active state and delegates requests to it
//! - **State**: Behavior for one phase, with a back-reference to its context
//! - **Transition tables**: The same machine described as data
//! - **Output**: Lines are written through an injected emitter, optionally translated
//!
//! Two smaller patterns sit alongside: an access-gating [`proxy`] and a
//! per-type [`singleton`] registry.
//!
//! # Example
//!
//! ```rust
//! use statecraft::core::Context;
//! use statecraft::output::Recorder;
//! use statecraft::states::StateA;
//! use std::sync::Arc;
//!
//! let recorder = Arc::new(Recorder::new());
//! let context = Context::with_emitter(StateA::new(), recorder.clone());
//!
//! context.request1().unwrap();
//! context.request2().unwrap();
//!
//! assert_eq!(context.current_name(), "StateA");
//! assert_eq!(
//!     recorder.lines_matching("handles"),
//!     vec!["A handles request1", "B handles request2"]
//! );
//! ```

pub mod config;
pub mod core;
pub mod output;
pub mod proxy;
pub mod singleton;
pub mod states;
pub mod table;

// Re-export commonly used types
pub use self::core::{Context, Event, Owner, State, StateError, StateHistory, StateTransition};
