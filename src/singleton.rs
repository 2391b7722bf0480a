//! Lazily initialised, one-instance-per-type registry.
//!
//! [`Registry`] hands out a shared `Arc<T>` for each type `T`, building it
//! on first request. Code that needs a singleton takes a `&Registry`;
//! [`Registry::global`] is the process-wide one.

use once_cell::sync::{Lazy, OnceCell};
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

type Instance = Arc<dyn Any + Send + Sync>;
type Cell = Arc<OnceCell<Instance>>;

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

/// Thread-safe map from type to its single shared instance.
///
/// The map lock is only held to find a type's slot, never while an
/// instance is being built, so one singleton's `init` may ask the same
/// registry for another.
///
/// # Example
///
/// ```rust
/// use statecraft::singleton::Registry;
/// use std::sync::Arc;
///
/// struct Settings {
///     verbose: bool,
/// }
///
/// let registry = Registry::new();
/// let first = registry.get_or_init(|| Settings { verbose: true });
/// let second = registry.get_or_init(|| Settings { verbose: false });
///
/// assert!(Arc::ptr_eq(&first, &second));
/// assert!(second.verbose);
/// ```
#[derive(Default)]
pub struct Registry {
    instances: RwLock<HashMap<TypeId, Cell>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// The instance of `T`, if one has been created.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        let instances = self.instances.read().unwrap_or_else(PoisonError::into_inner);
        instances
            .get(&TypeId::of::<T>())
            .and_then(|cell| cell.get())
            .and_then(|instance| Arc::clone(instance).downcast::<T>().ok())
    }

    /// The instance of `T`, building it with `init` on first use.
    ///
    /// `init` runs at most once per type; later calls ignore their
    /// `init` and return the existing instance. Concurrent first callers
    /// wait for the one running `init`.
    ///
    /// `init` must not ask for `T` itself.
    pub fn get_or_init<T, F>(&self, init: F) -> Arc<T>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> T,
    {
        let cell = self.cell::<T>();
        let instance = cell.get_or_init(|| {
            debug!(kind = type_name::<T>(), "creating singleton instance");
            Arc::new(init()) as Instance
        });

        match Arc::clone(instance).downcast::<T>() {
            Ok(typed) => typed,
            // Cells are keyed by the TypeId of what they hold.
            Err(_) => unreachable!("registry slot for {} holds another type", type_name::<T>()),
        }
    }

    /// The slot for `T`, created empty if missing.
    fn cell<T: Any>(&self) -> Cell {
        let key = TypeId::of::<T>();
        if let Some(cell) = self
            .instances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Arc::clone(cell);
        }

        let mut instances = self.instances.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(instances.entry(key).or_default())
    }

    pub fn contains<T: Any + Send + Sync>(&self) -> bool {
        self.get::<T>().is_some()
    }

    /// Number of instances created so far.
    pub fn len(&self) -> usize {
        self.instances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|cell| cell.get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A type with exactly one instance per registry.
pub trait Singleton: Any + Send + Sync + Sized {
    fn create() -> Self;

    /// The shared instance held by `registry`.
    fn instance(registry: &Registry) -> Arc<Self> {
        registry.get_or_init(Self::create)
    }

    /// The shared instance held by the global registry.
    fn global() -> Arc<Self> {
        Self::instance(Registry::global())
    }
}

/// Demonstration singleton carrying a fixed identifier.
#[derive(Debug)]
pub struct UniqueId {
    label: String,
}

impl UniqueId {
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Singleton for UniqueId {
    fn create() -> Self {
        Self {
            label: "My Unique ID".to_string(),
        }
    }
}
