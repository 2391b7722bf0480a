//! A [`State`] whose behavior comes from a transition table.

use super::machine::TransitionTable;
use super::StateId;
use crate::core::{Event, Owner, State, StateError};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// One state of a [`TransitionTable`].
///
/// Firing an event looks up the rule for this state, runs its actions,
/// and activates a fresh `TableState` for the target when there is one.
pub struct TableState<S: StateId> {
    id: S,
    table: Arc<TransitionTable<S>>,
    owner: Owner,
}

impl<S: StateId> TableState<S> {
    pub fn new(id: S, table: Arc<TransitionTable<S>>) -> Self {
        Self {
            id,
            table,
            owner: Owner::new(),
        }
    }

    pub fn id(&self) -> &S {
        &self.id
    }

    fn fire(&self, event: &Event) -> Result<(), StateError> {
        let context = self.owner.context(self.name())?;

        let Some(rule) = self.table.rule_for(&self.id, event) else {
            trace!(state = %self.name(), %event, "no rule for event");
            return Ok(());
        };

        for action in &rule.actions {
            action(&context)?;
        }

        match &rule.to {
            Some(to) => context.transition_to(self.table.state(to.clone())),
            None => Ok(()),
        }
    }
}

impl<S: StateId> State for TableState<S> {
    fn name(&self) -> &str {
        self.id.name()
    }

    fn owner(&self) -> &Owner {
        &self.owner
    }

    fn handle1(&self) -> Result<(), StateError> {
        self.fire(&Event::Handle1)
    }

    fn handle2(&self) -> Result<(), StateError> {
        self.fire(&Event::Handle2)
    }

    fn handle(&self, event: &Event) -> Result<(), StateError> {
        self.fire(event)
    }
}

impl<S: StateId> fmt::Debug for TableState<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableState")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Context;
    use crate::output::Recorder;
    use crate::state_enum;
    use crate::table::{RuleBuilder, TableBuilder};

    state_enum! {
        enum Switch {
            Off,
            On,
        }
    }

    fn table() -> Arc<TransitionTable<Switch>> {
        let table = TableBuilder::new()
            .initial(Switch::Off)
            .rule(
                RuleBuilder::new()
                    .from(Switch::Off)
                    .on(Event::Handle1)
                    .emit("switching on")
                    .to(Switch::On),
            )
            .unwrap()
            .rule(
                RuleBuilder::new()
                    .from(Switch::On)
                    .on(Event::Handle1)
                    .action(|_ctx| {
                        Err(StateError::InvalidState {
                            reason: "already on".to_string(),
                        })
                    })
                    .to(Switch::Off),
            )
            .unwrap()
            .build()
            .unwrap();
        Arc::new(table)
    }

    #[test]
    fn detached_table_state_refuses_events() {
        let state = table().state(Switch::Off);
        assert!(matches!(
            state.handle1(),
            Err(StateError::PreconditionViolation { .. })
        ));
    }

    #[test]
    fn rule_fires_actions_then_transitions() {
        let recorder = Arc::new(Recorder::new());
        let context = Context::with_emitter(table().state(Switch::Off), recorder.clone());

        context.request1().unwrap();

        assert_eq!(context.current_name(), "On");
        assert_eq!(
            recorder.lines(),
            vec![
                "Context: Transition to Off",
                "switching on",
                "Context: Transition to On",
            ]
        );
    }

    #[test]
    fn failing_action_skips_transition() {
        let context = Context::with_emitter(table().state(Switch::On), Arc::new(Recorder::new()));

        let result = context.request1();

        assert!(matches!(result, Err(StateError::InvalidState { .. })));
        assert_eq!(context.current_name(), "On");
    }

    #[test]
    fn unmatched_event_does_nothing() {
        let context = Context::with_emitter(table().state(Switch::Off), Arc::new(Recorder::new()));

        context.request2().unwrap();

        assert_eq!(context.current_name(), "Off");
        assert_eq!(context.history().transitions().len(), 1);
    }
}
