//! The process-wide manager instance and its accessor.

use crate::definition::{Definition, Instance};
use crate::error::Result;
use crate::filter::ListFilter;
use crate::manager::{self, Manager, Resolution};
use once_cell::sync::Lazy;
use parking_lot::ReentrantMutex;
use std::any::Any;
use std::cell::RefCell;
use std::sync::Arc;

// Created on first access, never reset.
static GLOBAL_MANAGER: Lazy<GlobalManager> = Lazy::new(GlobalManager::default);

/// A [`Manager`] that can live in a `static`.
///
/// The lock is re-entrant and no borrow of the inner manager is held while an
/// initializer runs, so factories may resolve their own dependencies through
/// [`global()`]. It exists to make the process-wide instance sound, not to make
/// the registry a concurrent data structure: populate it during bootstrap.
#[derive(Default)]
pub struct GlobalManager {
  inner: ReentrantMutex<RefCell<Manager>>,
}

impl GlobalManager {
  /// See [`Manager::add_definition`].
  pub fn add_definition(&self, def: Definition) {
    self.with(|manager| manager.add_definition(def));
  }

  /// See [`Manager::get`].
  pub fn get(&self, id: &str) -> Option<Instance> {
    let guard = self.inner.lock();
    let resolution = guard.borrow().resolution(id);
    match resolution {
      Resolution::Pending { initializer, shared } => {
        // The borrow is released here; the lock is not.
        let instance = initializer();
        if shared {
          guard.borrow_mut().settle(id, &initializer, &instance);
        }
        Some(instance)
      }
      Resolution::Cached(instance) => Some(instance),
      Resolution::Unknown => None,
    }
  }

  /// See [`Manager::get_as`].
  pub fn get_as<T: Any + Send + Sync>(&self, id: &str) -> Option<Arc<T>> {
    self.try_get(id).ok()
  }

  /// See [`Manager::try_get`].
  pub fn try_get<T: Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>> {
    manager::downcast(id, self.get(id))
  }

  /// See [`Manager::list_ids`].
  pub fn list_ids(&self, filter: ListFilter) -> Vec<String> {
    self.inner.lock().borrow().list_ids(filter)
  }

  /// See [`Manager::contains`].
  pub fn contains(&self, id: &str) -> bool {
    self.inner.lock().borrow().contains(id)
  }

  /// Runs `f` with exclusive access to the underlying manager.
  ///
  /// # Panics
  ///
  /// Panics if an initializer invoked from within `f` calls back into this
  /// `GlobalManager`, since the manager is already mutably borrowed.
  pub fn with<R>(&self, f: impl FnOnce(&mut Manager) -> R) -> R {
    let guard = self.inner.lock();
    let mut manager = guard.borrow_mut();
    f(&mut *manager)
  }
}

/// Provides a reference to the process-wide manager.
///
/// # Examples
///
/// ```
/// use fibre_registry::{global, Definition};
///
/// global().add_definition(Definition::shared("app.greeting", || String::from("hello")));
///
/// let greeting = global().get_as::<String>("app.greeting").unwrap();
/// assert_eq!(*greeting, "hello");
/// ```
pub fn global() -> &'static GlobalManager {
  &GLOBAL_MANAGER
}
