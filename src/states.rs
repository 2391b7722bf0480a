//! The two built-in concrete states.
//!
//! | Current | Event   | Output                   | Next   |
//! |---------|---------|--------------------------|--------|
//! | A       | handle1 | "A handles request1"     | B      |
//! | A       | handle2 | "A handles request2"     | A      |
//! | B       | handle1 | "B handles request1"     | B      |
//! | B       | handle2 | "B handles request2"     | A      |
//!
//! [`demo_table`] describes the same machine as data.

use crate::core::{Event, Owner, State, StateError};
use crate::table::{BuildError, RuleBuilder, TableBuilder, TransitionTable};

#[derive(Debug, Default)]
pub struct StateA {
    owner: Owner,
}

impl StateA {
    pub fn new() -> Self {
        Self::default()
    }
}

impl State for StateA {
    fn name(&self) -> &str {
        "StateA"
    }

    fn owner(&self) -> &Owner {
        &self.owner
    }

    fn handle1(&self) -> Result<(), StateError> {
        let context = self.owner.context(self.name())?;
        context.emit("A handles request1");
        context.emit("A wants to change the state of the context");
        context.transition_to(StateB::new())
    }

    fn handle2(&self) -> Result<(), StateError> {
        let context = self.owner.context(self.name())?;
        context.emit("A handles request2");
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct StateB {
    owner: Owner,
}

impl StateB {
    pub fn new() -> Self {
        Self::default()
    }
}

impl State for StateB {
    fn name(&self) -> &str {
        "StateB"
    }

    fn owner(&self) -> &Owner {
        &self.owner
    }

    fn handle1(&self) -> Result<(), StateError> {
        let context = self.owner.context(self.name())?;
        context.emit("B handles request1");
        Ok(())
    }

    fn handle2(&self) -> Result<(), StateError> {
        let context = self.owner.context(self.name())?;
        context.emit("B handles request2");
        context.emit("B wants to change the state of the context");
        context.transition_to(StateA::new())
    }
}

crate::state_enum! {
    /// Ids of the built-in states, for use with [`demo_table`].
    pub enum DemoState {
        StateA,
        StateB,
    }
}

/// The A/B machine as a transition table, starting in `StateA`.
///
/// Emits exactly the same lines as [`StateA`] and [`StateB`].
pub fn demo_table() -> Result<TransitionTable<DemoState>, BuildError> {
    TableBuilder::new()
        .initial(DemoState::StateA)
        .rule(
            RuleBuilder::new()
                .from(DemoState::StateA)
                .on(Event::Handle1)
                .emit("A handles request1")
                .emit("A wants to change the state of the context")
                .to(DemoState::StateB),
        )?
        .rule(
            RuleBuilder::new()
                .from(DemoState::StateA)
                .on(Event::Handle2)
                .emit("A handles request2"),
        )?
        .rule(
            RuleBuilder::new()
                .from(DemoState::StateB)
                .on(Event::Handle1)
                .emit("B handles request1"),
        )?
        .rule(
            RuleBuilder::new()
                .from(DemoState::StateB)
                .on(Event::Handle2)
                .emit("B handles request2")
                .emit("B wants to change the state of the context")
                .to(DemoState::StateA),
        )?
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Context;
    use crate::output::Recorder;
    use std::sync::Arc;

    fn recorded(initial: impl State) -> (Context, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::new());
        let context = Context::with_emitter(initial, recorder.clone());
        (context, recorder)
    }

    #[test]
    fn a_handle1_moves_to_b() {
        let (context, recorder) = recorded(StateA::new());

        context.request1().unwrap();

        assert_eq!(context.current_name(), "StateB");
        assert_eq!(
            recorder.lines(),
            vec![
                "Context: Transition to StateA",
                "A handles request1",
                "A wants to change the state of the context",
                "Context: Transition to StateB",
            ]
        );
    }

    #[test]
    fn a_handle2_is_a_self_loop() {
        let (context, recorder) = recorded(StateA::new());

        context.request2().unwrap();

        assert_eq!(context.current_name(), "StateA");
        assert_eq!(context.history().transitions().len(), 1);
        assert!(recorder.contains("A handles request2"));
    }

    #[test]
    fn b_handle1_is_a_self_loop() {
        let (context, recorder) = recorded(StateB::new());

        context.request1().unwrap();

        assert_eq!(context.current_name(), "StateB");
        assert_eq!(context.history().transitions().len(), 1);
        assert!(recorder.contains("B handles request1"));
    }

    #[test]
    fn b_handle2_moves_to_a() {
        let (context, recorder) = recorded(StateB::new());

        context.request2().unwrap();

        assert_eq!(context.current_name(), "StateA");
        assert!(recorder.contains("B handles request2"));
        assert!(recorder.contains("B wants to change the state of the context"));
    }

    #[test]
    fn request1_then_request2_returns_to_a() {
        let (context, recorder) = recorded(StateA::new());

        context.request1().unwrap();
        assert_eq!(context.current_name(), "StateB");

        context.request2().unwrap();
        assert_eq!(context.current_name(), "StateA");

        assert_eq!(
            recorder.lines_matching("handles"),
            vec!["A handles request1", "B handles request2"]
        );
        assert_eq!(
            context.history().get_path(),
            vec!["StateA", "StateB", "StateA"]
        );
    }

    #[test]
    fn demo_table_matches_handwritten_states() {
        let events = [
            Event::Handle1,
            Event::Handle1,
            Event::Handle2,
            Event::Handle2,
            Event::named("ignored"),
            Event::Handle1,
        ];

        let (hand, hand_lines) = recorded(StateA::new());
        let table_lines = Arc::new(Recorder::new());
        let table = demo_table().unwrap().start(table_lines.clone());

        for event in &events {
            hand.dispatch(event).unwrap();
            table.dispatch(event).unwrap();
        }

        assert_eq!(hand_lines.lines(), table_lines.lines());
        assert_eq!(hand.history().get_path(), table.history().get_path());
    }

    #[test]
    fn demo_table_is_pure_lookup() {
        let table = demo_table().unwrap();

        assert_eq!(table.next(&DemoState::StateA, &Event::Handle1), DemoState::StateB);
        assert_eq!(table.next(&DemoState::StateA, &Event::Handle2), DemoState::StateA);
        assert_eq!(table.next(&DemoState::StateB, &Event::Handle1), DemoState::StateB);
        assert_eq!(table.next(&DemoState::StateB, &Event::Handle2), DemoState::StateA);
    }

    #[test]
    fn detached_states_refuse_to_handle() {
        assert!(matches!(
            StateA::new().handle1(),
            Err(StateError::PreconditionViolation { .. })
        ));
        assert!(matches!(
            StateB::new().handle2(),
            Err(StateError::PreconditionViolation { .. })
        ));
    }
}
