//! The State capability contract and its back-reference to the owning context.
//!
//! A state is a behavior object: the context forwards every request to
//! whichever state is currently active, and a state's handler may ask the
//! context to swap in a different state before returning.

use super::context::{Context, ContextInner};
use super::error::StateError;
use super::event::Event;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, Weak};

/// Behavior associated with one phase of a [`Context`].
///
/// Handlers take no input besides the state's [`Owner`]. Each may emit
/// output through the owning context and may call
/// [`Context::transition_to`] at most once before returning.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{Context, Owner, State, StateError};
/// use statecraft::output::Recorder;
/// use std::sync::Arc;
///
/// #[derive(Debug, Default)]
/// struct Idle {
///     owner: Owner,
/// }
///
/// impl State for Idle {
///     fn name(&self) -> &str {
///         "Idle"
///     }
///
///     fn owner(&self) -> &Owner {
///         &self.owner
///     }
///
///     fn handle1(&self) -> Result<(), StateError> {
///         self.owner.context(self.name())?.emit("Idle handles request1");
///         Ok(())
///     }
///
///     fn handle2(&self) -> Result<(), StateError> {
///         Ok(())
///     }
/// }
///
/// let recorder = Arc::new(Recorder::new());
/// let context = Context::with_emitter(Idle::default(), recorder.clone());
/// context.request1().unwrap();
/// assert!(recorder.contains("Idle handles request1"));
/// ```
pub trait State: fmt::Debug + Send + Sync + 'static {
    /// Name used for display, logging and history.
    fn name(&self) -> &str;

    /// Back-reference to the context currently using this state.
    fn owner(&self) -> &Owner;

    fn handle1(&self) -> Result<(), StateError>;

    fn handle2(&self) -> Result<(), StateError>;

    /// Handle an arbitrary event.
    ///
    /// The default routes the two built-in events to their handlers and
    /// treats every other event as a self-loop with no action.
    fn handle(&self, event: &Event) -> Result<(), StateError> {
        match event {
            Event::Handle1 => self.handle1(),
            Event::Handle2 => self.handle2(),
            Event::Named(_) => Ok(()),
        }
    }
}

/// Non-owning back-reference from a state to its context.
///
/// Set by the context each time the state is activated. Once the state
/// is superseded the reference keeps pointing at its last owner; it is
/// never cleared.
#[derive(Default)]
pub struct Owner {
    context: RwLock<Option<Weak<ContextInner>>>,
}

impl Owner {
    /// Create a detached back-reference.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn attach(&self, context: Weak<ContextInner>) {
        let mut slot = self.context.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(context);
    }

    /// Resolve the owning context.
    ///
    /// `state` names the caller for the error message. Fails with
    /// [`StateError::PreconditionViolation`] when the state was never
    /// attached or its context has been dropped.
    pub fn context(&self, state: &str) -> Result<Context, StateError> {
        let slot = self.context.read().unwrap_or_else(PoisonError::into_inner);
        let weak = slot
            .as_ref()
            .ok_or_else(|| StateError::PreconditionViolation {
                state: state.to_string(),
                reason: "state is not attached to a context".to_string(),
            })?;

        weak.upgrade()
            .map(Context::from_inner)
            .ok_or_else(|| StateError::PreconditionViolation {
                state: state.to_string(),
                reason: "owning context has been dropped".to_string(),
            })
    }

    /// Whether a context has ever been attached.
    pub fn is_attached(&self) -> bool {
        self.context
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Whether the last attached context is `context`.
    pub fn is_attached_to(&self, context: &Context) -> bool {
        let slot = self.context.read().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref()
            .is_some_and(|weak| std::ptr::eq(weak.as_ptr(), Arc::as_ptr(context.inner())))
    }
}

impl fmt::Debug for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Owner")
            .field("attached", &self.is_attached())
            .finish()
    }
}
