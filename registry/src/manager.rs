//! The `Manager`: definitions, the shared-instance cache and the lookup
//! state machine that moves ids from one to the other.

use crate::definition::{Definition, Initializer, Instance};
use crate::error::{ResolveError, Result};
use crate::filter::ListFilter;
use std::any::{self, Any};
use std::collections::HashMap;
use std::sync::Arc;

/// Where an id currently lives.
pub(crate) enum Resolution {
  /// A definition exists; its initializer has to run.
  Pending { initializer: Initializer, shared: bool },
  /// A shared definition was already resolved.
  Cached(Instance),
  Unknown,
}

/// A container of dependency definitions and resolved shared instances.
///
/// An id is in exactly one of three states: unknown, pending (a definition
/// is registered) or cached (a shared definition was resolved and dropped).
/// Non-shared ids never leave the pending state.
///
/// The manager is not meant to be shared between threads: every mutation,
/// including the one hidden inside [`Manager::get`], requires `&mut self`.
/// Wrap it in a lock, or use [`global()`](crate::global), for shared access.
#[derive(Default)]
pub struct Manager {
  definitions: HashMap<String, Definition>,
  shared: HashMap<String, Instance>,
}

impl Manager {
  /// Creates a new, empty `Manager`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers `def` under its id, replacing any previous definition with
  /// that id. Already cached shared instances are left untouched.
  pub fn add_definition(&mut self, def: Definition) {
    tracing::trace!(id = %def.id(), shared = def.is_shared(), "adding dependency definition");
    self.definitions.insert(def.id().to_owned(), def);
  }

  /// Resolves a dependency.
  ///
  /// This is a state transition, not a plain read. A pending definition has
  /// its initializer invoked; if it is shared the produced value moves into
  /// the cache and the definition is removed, so the initializer never runs
  /// again. Ids without a definition are served from the cache, and `None`
  /// is returned for ids that were never registered.
  pub fn get(&mut self, id: &str) -> Option<Instance> {
    match self.resolution(id) {
      Resolution::Pending { initializer, shared } => {
        let instance = initializer();
        if shared {
          self.settle(id, &initializer, &instance);
        }
        Some(instance)
      }
      Resolution::Cached(instance) => Some(instance),
      Resolution::Unknown => None,
    }
  }

  /// Resolves a dependency and downcasts it to `T`.
  ///
  /// Returns `None` both for unknown ids and for values of another type.
  pub fn get_as<T: Any + Send + Sync>(&mut self, id: &str) -> Option<Arc<T>> {
    self.try_get(id).ok()
  }

  /// Resolves a dependency and downcasts it to `T`, reporting why it failed.
  pub fn try_get<T: Any + Send + Sync>(&mut self, id: &str) -> Result<Arc<T>> {
    downcast(id, self.get(id))
  }

  /// Lists known ids, in no particular order. Each id appears once.
  ///
  /// An id re-defined after its shared value was cached is both pending and
  /// cached; it is still listed once, and as initialized while its old value
  /// stays cached.
  pub fn list_ids(&self, filter: ListFilter) -> Vec<String> {
    match filter {
      ListFilter::AllRegistered => self
        .definitions
        .keys()
        .chain(
          self
            .shared
            .keys()
            .filter(|id| !self.definitions.contains_key(id.as_str())),
        )
        .cloned()
        .collect(),
      ListFilter::InitializedShared => self.shared.keys().cloned().collect(),
    }
  }

  /// Whether `id` is pending or cached.
  pub fn contains(&self, id: &str) -> bool {
    self.definitions.contains_key(id) || self.shared.contains_key(id)
  }

  /// First half of `get`: finds out what resolving `id` requires without
  /// running any initializer.
  pub(crate) fn resolution(&self, id: &str) -> Resolution {
    if let Some(def) = self.definitions.get(id) {
      return Resolution::Pending {
        initializer: Arc::clone(def.initializer()),
        shared: def.is_shared(),
      };
    }
    match self.shared.get(id) {
      Some(instance) => {
        tracing::trace!(id = %id, "serving cached shared dependency");
        Resolution::Cached(Arc::clone(instance))
      }
      None => {
        tracing::trace!(id = %id, "no dependency registered");
        Resolution::Unknown
      }
    }
  }

  /// Second half of `get` for shared definitions: caches `instance` under
  /// `id` and drops the definition holding `initializer`.
  ///
  /// If the definition was replaced while its initializer ran, the newer
  /// definition wins and nothing is cached. Returns whether `instance` was
  /// cached.
  pub(crate) fn settle(&mut self, id: &str, initializer: &Initializer, instance: &Instance) -> bool {
    match self.definitions.get(id) {
      Some(current) if Arc::ptr_eq(current.initializer(), initializer) => {
        self.definitions.remove(id);
        self.shared.insert(id.to_owned(), Arc::clone(instance));
        tracing::debug!(id = %id, "shared dependency initialized and cached");
        true
      }
      _ => {
        tracing::debug!(
          id = %id,
          "definition replaced during initialization, result not cached"
        );
        false
      }
    }
  }
}

pub(crate) fn downcast<T: Any + Send + Sync>(id: &str, instance: Option<Instance>) -> Result<Arc<T>> {
  let instance = instance.ok_or_else(|| ResolveError::NotFound { id: id.to_owned() })?;
  instance
    .downcast::<T>()
    .map_err(|_| ResolveError::TypeMismatch {
      id: id.to_owned(),
      expected: any::type_name::<T>(),
    })
}
