//! Table-driven state machines.
//!
//! A [`TransitionTable`] describes a machine as data: each (state, event)
//! pair maps to a list of actions and an optional target. The table runs
//! on the same [`Context`](crate::core::Context) as hand-written states,
//! through [`TableState`].
//!
//! # Example
//!
//! ```rust
//! use statecraft::core::Event;
//! use statecraft::output::Recorder;
//! use statecraft::state_enum;
//! use statecraft::table::{edge, RuleBuilder, TableBuilder};
//! use std::sync::Arc;
//!
//! state_enum! {
//!     enum Light {
//!         Red,
//!         Green,
//!     }
//! }
//!
//! let table = TableBuilder::new()
//!     .initial(Light::Red)
//!     .add_rule(edge(Light::Red, Event::named("go"), Light::Green))
//!     .rule(
//!         RuleBuilder::new()
//!             .from(Light::Green)
//!             .on(Event::named("stop"))
//!             .emit("braking")
//!             .to(Light::Red),
//!     )
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let context = table.start(Arc::new(Recorder::new()));
//! context.dispatch(&Event::named("go")).unwrap();
//! assert_eq!(context.current_name(), "Green");
//! ```

pub mod builder;
pub mod error;
pub mod machine;
pub mod macros;
pub mod rule;
pub mod state;

pub use builder::{RuleBuilder, TableBuilder};
pub use error::BuildError;
pub use machine::TransitionTable;
pub use rule::{Rule, RuleAction};
pub use state::TableState;

use crate::core::Event;
use std::fmt::Debug;

/// Identifier of a state within a transition table.
///
/// Usually a fieldless enum; see [`state_enum!`](crate::state_enum).
pub trait StateId: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// Name used for display, logging and history.
    fn name(&self) -> &str;
}

/// A rule that moves `from` to `to` on `event` with no actions.
pub fn edge<S: StateId>(from: S, event: Event, to: S) -> Rule<S> {
    Rule {
        from,
        event,
        actions: Vec::new(),
        to: Some(to),
    }
}
