//! The context that owns the active state and delegates requests to it.

use super::error::StateError;
use super::event::Event;
use super::history::{StateHistory, StateTransition};
use super::state::State;
use crate::output::{Console, Emitter};
use chrono::Utc;
use parking_lot::ReentrantMutex;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

struct Slot {
    active: Arc<dyn State>,
    history: StateHistory,
}

pub(crate) struct ContextInner {
    slot: Mutex<Slot>,
    // Held for the whole of a request. Re-entrant so a handler may issue
    // further requests on the same thread.
    requests: ReentrantMutex<()>,
    emitter: Arc<dyn Emitter>,
}

/// Holds the single active [`State`] and forwards requests to it.
///
/// `Context` is a cheap handle: clones share the same active state.
/// States reach it through their [`Owner`](super::Owner) back-reference,
/// which does not keep it alive.
///
/// Requests are serialized: a request from another thread waits until the
/// current one, including any transition its handler makes, has finished.
/// The slot lock itself is released before any handler or emitter runs,
/// so a handler may call [`transition_to`](Self::transition_to) while its
/// own request is still on the stack.
///
/// # Example
///
/// ```rust
/// use statecraft::core::Context;
/// use statecraft::output::Recorder;
/// use statecraft::states::StateA;
/// use std::sync::Arc;
///
/// let recorder = Arc::new(Recorder::new());
/// let context = Context::with_emitter(StateA::new(), recorder.clone());
///
/// context.request1().unwrap();
/// assert_eq!(context.current_name(), "StateB");
///
/// context.request2().unwrap();
/// assert_eq!(context.current_name(), "StateA");
/// ```
#[derive(Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

impl Context {
    /// Create a context writing to stdout, starting in `initial`.
    pub fn new(initial: impl State) -> Self {
        Self::with_emitter(initial, Arc::new(Console))
    }

    /// Create a context writing to `emitter`, starting in `initial`.
    pub fn with_emitter(initial: impl State, emitter: Arc<dyn Emitter>) -> Self {
        Self::from_shared(Arc::new(initial), emitter)
    }

    /// Create a context around an already shared state.
    pub fn from_shared(initial: Arc<dyn State>, emitter: Arc<dyn Emitter>) -> Self {
        let name = initial.name().to_string();
        let mut history = StateHistory::new();
        history.push(StateTransition {
            from: None,
            to: name.clone(),
            timestamp: Utc::now(),
            sequence: 0,
        });

        let inner = Arc::new(ContextInner {
            slot: Mutex::new(Slot {
                active: Arc::clone(&initial),
                history,
            }),
            requests: ReentrantMutex::new(()),
            emitter,
        });
        initial.owner().attach(Arc::downgrade(&inner));

        let context = Self { inner };
        debug!(state = %name, "context created");
        context.announce(&name);
        context
    }

    pub(crate) fn from_inner(inner: Arc<ContextInner>) -> Self {
        Self { inner }
    }

    pub(crate) fn inner(&self) -> &Arc<ContextInner> {
        &self.inner
    }

    /// Retain only the `limit` most recent history records.
    ///
    /// Without a limit the history grows by one record per transition for
    /// the lifetime of the context.
    pub fn with_history_limit(self, limit: usize) -> Self {
        self.slot().history.set_limit(limit);
        self
    }

    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.inner
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the active state with `next`.
    pub fn transition_to(&self, next: impl State) -> Result<(), StateError> {
        self.replace_state(Some(Arc::new(next)))
    }

    /// Replace the active state, attaching `next` to this context first.
    ///
    /// `None` fails with [`StateError::InvalidState`] and leaves the
    /// current state active. The superseded state keeps its back-reference
    /// to this context.
    pub fn replace_state(&self, next: Option<Arc<dyn State>>) -> Result<(), StateError> {
        let next = next.ok_or_else(|| StateError::InvalidState {
            reason: "transition target is absent".to_string(),
        })?;
        let to = next.name().to_string();

        {
            let mut slot = self.slot();
            next.owner().attach(Arc::downgrade(&self.inner));

            let from = slot.active.name().to_string();
            let sequence = slot.history.next_sequence();
            slot.history.push(StateTransition {
                from: Some(from.clone()),
                to: to.clone(),
                timestamp: Utc::now(),
                sequence,
            });
            slot.active = next;
            debug!(%from, %to, sequence, "state transition");
        }

        self.announce(&to);
        Ok(())
    }

    /// Delegate to the active state's `handle1`.
    pub fn request1(&self) -> Result<(), StateError> {
        self.dispatch(&Event::Handle1)
    }

    /// Delegate to the active state's `handle2`.
    pub fn request2(&self) -> Result<(), StateError> {
        self.dispatch(&Event::Handle2)
    }

    /// Deliver `event` to the active state.
    ///
    /// Blocks while another thread's request is in progress.
    pub fn dispatch(&self, event: &Event) -> Result<(), StateError> {
        let _turn = self.inner.requests.lock();
        let active = self.active_state();
        debug!(state = %active.name(), %event, "dispatch");
        active.handle(event)
    }

    /// The currently active state.
    pub fn active_state(&self) -> Arc<dyn State> {
        Arc::clone(&self.slot().active)
    }

    /// Name of the currently active state.
    pub fn current_name(&self) -> String {
        self.slot().active.name().to_string()
    }

    /// Snapshot of every activation so far, starting with the initial state.
    pub fn history(&self) -> StateHistory {
        self.slot().history.clone()
    }

    /// Write one line of output through this context's emitter.
    pub fn emit(&self, line: &str) {
        self.inner.emitter.emit(line);
    }

    fn announce(&self, to: &str) {
        self.inner.emitter.emit_named("Context: Transition to", to);
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("active", &self.current_name())
            .finish_non_exhaustive()
    }
}
