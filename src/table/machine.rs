//! Transition tables.

use super::rule::Rule;
use super::state::TableState;
use super::StateId;
use crate::core::{Context, Event};
use crate::output::Emitter;
use std::sync::Arc;

/// A finite state machine described as data.
///
/// Each rule maps a (state, event) pair to actions and an optional
/// target. Pairs without a rule do nothing.
#[derive(Debug)]
pub struct TransitionTable<S: StateId> {
    initial: S,
    rules: Vec<Rule<S>>,
}

impl<S: StateId> TransitionTable<S> {
    pub(crate) fn new(initial: S, rules: Vec<Rule<S>>) -> Self {
        Self { initial, rules }
    }

    pub fn initial(&self) -> &S {
        &self.initial
    }

    pub fn rules(&self) -> &[Rule<S>] {
        &self.rules
    }

    /// The rule for `from` receiving `event`, if any (pure).
    pub fn rule_for(&self, from: &S, event: &Event) -> Option<&Rule<S>> {
        self.rules.iter().find(|rule| rule.can_fire(from, event))
    }

    /// The state reached from `from` on `event` (pure).
    ///
    /// Unmatched pairs and rules without a target stay in `from`.
    pub fn next(&self, from: &S, event: &Event) -> S {
        self.rule_for(from, event)
            .and_then(|rule| rule.to.clone())
            .unwrap_or_else(|| from.clone())
    }

    /// A detached state for `id`, bound to this table.
    pub fn state(self: &Arc<Self>, id: S) -> TableState<S> {
        TableState::new(id, Arc::clone(self))
    }

    /// Start a context in this table's initial state.
    pub fn start(self, emitter: Arc<dyn Emitter>) -> Context {
        let table = Arc::new(self);
        let initial = table.state(table.initial.clone());
        Context::with_emitter(initial, emitter)
    }
}
