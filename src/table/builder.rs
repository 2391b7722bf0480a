//! Fluent builders for rules and transition tables.

use super::error::BuildError;
use super::machine::TransitionTable;
use super::rule::{Rule, RuleAction};
use super::StateId;
use crate::core::{Context, Event, StateError};
use std::sync::Arc;

/// Builder for a single [`Rule`].
pub struct RuleBuilder<S: StateId> {
    from: Option<S>,
    event: Option<Event>,
    actions: Vec<RuleAction>,
    to: Option<S>,
}

impl<S: StateId> RuleBuilder<S> {
    pub fn new() -> Self {
        Self {
            from: None,
            event: None,
            actions: Vec::new(),
            to: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the triggering event (required).
    pub fn on(mut self, event: Event) -> Self {
        self.event = Some(event);
        self
    }

    /// Append an action. Actions run in the order they were added.
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&Context) -> Result<(), StateError> + Send + Sync + 'static,
    {
        self.actions.push(Arc::new(action));
        self
    }

    /// Append an action that writes `line` through the context.
    pub fn emit(self, line: impl Into<String>) -> Self {
        let line = line.into();
        self.action(move |context| {
            context.emit(&line);
            Ok(())
        })
    }

    /// Set the target state. Without one the rule is a self-loop.
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    pub fn build(self) -> Result<Rule<S>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let event = self.event.ok_or(BuildError::MissingEvent)?;

        Ok(Rule {
            from,
            event,
            actions: self.actions,
            to: self.to,
        })
    }
}

impl<S: StateId> Default for RuleBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a [`TransitionTable`].
pub struct TableBuilder<S: StateId> {
    initial: Option<S>,
    rules: Vec<Rule<S>>,
}

impl<S: StateId> TableBuilder<S> {
    pub fn new() -> Self {
        Self {
            initial: None,
            rules: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Add a rule using a builder.
    /// Returns an error if the builder fails validation.
    pub fn rule(mut self, builder: RuleBuilder<S>) -> Result<Self, BuildError> {
        let rule = builder.build()?;
        self.rules.push(rule);
        Ok(self)
    }

    /// Add a pre-built rule.
    pub fn add_rule(mut self, rule: Rule<S>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(mut self, rules: Vec<Rule<S>>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Build the table.
    /// Fails if the initial state is missing, no rules were added, or two
    /// rules share the same state and event.
    pub fn build(self) -> Result<TransitionTable<S>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.rules.is_empty() {
            return Err(BuildError::NoRules);
        }

        for (i, rule) in self.rules.iter().enumerate() {
            if self.rules[..i]
                .iter()
                .any(|earlier| earlier.can_fire(&rule.from, &rule.event))
            {
                return Err(BuildError::DuplicateRule {
                    from: rule.from.name().to_string(),
                    event: rule.event.name().to_string(),
                });
            }
        }

        Ok(TransitionTable::new(initial, self.rules))
    }
}

impl<S: StateId> Default for TableBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
