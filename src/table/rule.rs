//! Transition rules: one (state, event) pair mapped to actions and a target.

use super::StateId;
use crate::core::{Context, Event, StateError};
use std::fmt;
use std::sync::Arc;

/// Action run when a rule fires, before any transition.
pub type RuleAction = Arc<dyn Fn(&Context) -> Result<(), StateError> + Send + Sync>;

/// A row of a transition table.
///
/// When the active state is `from` and `event` arrives, `actions` run in
/// order and the context then moves to `to`. A rule without `to` is a
/// self-loop.
pub struct Rule<S: StateId> {
    pub from: S,
    pub event: Event,
    pub actions: Vec<RuleAction>,
    pub to: Option<S>,
}

impl<S: StateId> Rule<S> {
    /// Whether this rule applies to `current` receiving `event` (pure).
    pub fn can_fire(&self, current: &S, event: &Event) -> bool {
        *current == self.from && *event == self.event
    }

    pub fn is_self_loop(&self) -> bool {
        self.to.is_none()
    }
}

impl<S: StateId> Clone for Rule<S> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            event: self.event.clone(),
            actions: self.actions.iter().map(Arc::clone).collect(),
            to: self.to.clone(),
        }
    }
}

impl<S: StateId> fmt::Debug for Rule<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("from", &self.from)
            .field("event", &self.event)
            .field("actions", &self.actions.len())
            .field("to", &self.to)
            .finish()
    }
}
