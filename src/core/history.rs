//! State activation history.
//!
//! Every time a context activates a state it records one
//! [`StateTransition`]. The first record is the initial activation and
//! has no `from` state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single activation.
///
/// # Example
///
/// ```rust
/// use statecraft::core::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: Some("StateA".to_string()),
///     to: "StateB".to_string(),
///     timestamp: Utc::now(),
///     sequence: 1,
/// };
/// assert!(!transition.is_initial());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being left, absent for the initial activation
    pub from: Option<String>,
    /// The state being activated
    pub to: String,
    /// When the activation happened
    pub timestamp: DateTime<Utc>,
    /// Position of this record within its history
    pub sequence: usize,
}

impl StateTransition {
    pub fn is_initial(&self) -> bool {
        self.from.is_none()
    }

    /// Whether the transition left and re-entered the same state name.
    pub fn is_self_loop(&self) -> bool {
        self.from.as_deref() == Some(self.to.as_str())
    }
}

/// Ordered history of state activations.
///
/// `record` is immutable and returns a new history with the transition
/// added. A context appends in place instead, so keeping history costs
/// the same per transition however long the machine runs.
///
/// Unbounded histories keep every record. A history built with
/// [`with_limit`](Self::with_limit) keeps only the most recent records;
/// `sequence` numbers keep counting across dropped entries.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: None,
///         to: "StateA".to_string(),
///         timestamp: Utc::now(),
///         sequence: 0,
///     })
///     .record(StateTransition {
///         from: Some("StateA".to_string()),
///         to: "StateB".to_string(),
///         timestamp: Utc::now(),
///         sequence: 1,
///     });
///
/// assert_eq!(history.get_path(), vec!["StateA", "StateB"]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: VecDeque<StateTransition>,
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    recorded: usize,
}

impl StateHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty history retaining at most `limit` records (at least one).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
            ..Self::default()
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is left untouched.
    pub fn record(&self, transition: StateTransition) -> Self {
        let mut history = self.clone();
        history.push(transition);
        history
    }

    /// Append in place, dropping the oldest record when over the limit.
    pub(crate) fn push(&mut self, transition: StateTransition) {
        self.transitions.push_back(transition);
        self.recorded += 1;
        self.trim();
    }

    pub(crate) fn set_limit(&mut self, limit: usize) {
        self.limit = Some(limit.max(1));
        self.trim();
    }

    fn trim(&mut self) {
        if let Some(limit) = self.limit {
            while self.transitions.len() > limit {
                self.transitions.pop_front();
            }
        }
    }

    /// Sequence number the next record should carry.
    ///
    /// Counts every record ever pushed, including ones the limit dropped.
    pub fn next_sequence(&self) -> usize {
        self.recorded
    }

    /// Names of the states traversed, in order.
    ///
    /// Starts with the first record's `from` when present, followed by
    /// the `to` of each record.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        if let Some(from) = self.transitions.front().and_then(|t| t.from.as_deref()) {
            path.push(from);
        }
        for transition in &self.transitions {
            path.push(transition.to.as_str());
        }
        path
    }

    /// Name of the most recently activated state.
    pub fn current(&self) -> Option<&str> {
        self.transitions.back().map(|t| t.to.as_str())
    }

    /// Elapsed time between the first and last record.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Retained records, oldest first.
    pub fn transitions(&self) -> &VecDeque<StateTransition> {
        &self.transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activation(from: Option<&str>, to: &str, sequence: usize) -> StateTransition {
        StateTransition {
            from: from.map(str::to_string),
            to: to.to_string(),
            timestamp: Utc::now(),
            sequence,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = StateHistory::new();
        assert_eq!(history.transitions().len(), 0);
        assert!(history.get_path().is_empty());
        assert!(history.current().is_none());
        assert!(history.duration().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let new_history = history.record(activation(None, "StateA", 0));

        assert_eq!(history.transitions().len(), 0);
        assert_eq!(new_history.transitions().len(), 1);
    }

    #[test]
    fn initial_activation_starts_path() {
        let history = StateHistory::new()
            .record(activation(None, "StateA", 0))
            .record(activation(Some("StateA"), "StateB", 1))
            .record(activation(Some("StateB"), "StateA", 2));

        assert_eq!(history.get_path(), vec!["StateA", "StateB", "StateA"]);
        assert_eq!(history.current(), Some("StateA"));
        assert!(history.transitions()[0].is_initial());
    }

    #[test]
    fn path_includes_leading_from_state() {
        let history = StateHistory::new().record(activation(Some("StateA"), "StateB", 0));
        assert_eq!(history.get_path(), vec!["StateA", "StateB"]);
    }

    #[test]
    fn self_loop_is_detected() {
        assert!(activation(Some("StateA"), "StateA", 1).is_self_loop());
        assert!(!activation(Some("StateA"), "StateB", 1).is_self_loop());
        assert!(!activation(None, "StateA", 0).is_self_loop());
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let history = StateHistory::new().record(activation(None, "StateA", 0));

        std::thread::sleep(std::time::Duration::from_millis(10));

        let history = history.record(activation(Some("StateA"), "StateB", 1));

        let duration = history.duration();
        assert!(duration.is_some());
        assert!(duration.unwrap() >= std::time::Duration::from_millis(10));
    }

    #[test]
    fn push_appends_in_place() {
        let mut history = StateHistory::new();
        history.push(activation(None, "StateA", 0));
        history.push(activation(Some("StateA"), "StateB", 1));

        assert_eq!(history.transitions().len(), 2);
        assert_eq!(history.next_sequence(), 2);
        assert_eq!(history.current(), Some("StateB"));
    }

    #[test]
    fn limit_drops_oldest_records() {
        let mut history = StateHistory::with_limit(3);
        history.push(activation(None, "StateA", 0));
        for sequence in 1..10 {
            let (from, to) = if sequence % 2 == 1 {
                ("StateA", "StateB")
            } else {
                ("StateB", "StateA")
            };
            history.push(activation(Some(from), to, sequence));
        }

        assert_eq!(history.transitions().len(), 3);
        assert_eq!(history.next_sequence(), 10);
        let sequences: Vec<usize> = history.transitions().iter().map(|t| t.sequence).collect();
        assert_eq!(sequences, vec![7, 8, 9]);
        assert_eq!(history.get_path(), vec!["StateA", "StateB", "StateA", "StateB"]);
    }

    #[test]
    fn zero_limit_keeps_latest_record() {
        let history = StateHistory::with_limit(0)
            .record(activation(None, "StateA", 0))
            .record(activation(Some("StateA"), "StateB", 1));

        assert_eq!(history.limit(), Some(1));
        assert_eq!(history.current(), Some("StateB"));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::new()
            .record(activation(None, "StateA", 0))
            .record(activation(Some("StateA"), "StateB", 1));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history.transitions(), deserialized.transitions());
    }
}
