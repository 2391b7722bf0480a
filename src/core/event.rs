//! Named events that drive a context.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An external trigger delivered to the active state.
///
/// `Handle1` and `Handle2` are the two events every state answers
/// through [`State::handle1`](super::State::handle1) and
/// [`State::handle2`](super::State::handle2). `Named` carries any other
/// event; states that do not recognise it do nothing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    Handle1,
    Handle2,
    Named(String),
}

impl Event {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Event name as used in logs and history.
    pub fn name(&self) -> &str {
        match self {
            Self::Handle1 => "handle1",
            Self::Handle2 => "handle2",
            Self::Named(name) => name,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
