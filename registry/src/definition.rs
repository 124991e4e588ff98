//! Dependency definitions: an identifier, a factory and a sharing flag.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A type-erased value produced by an initializer.
///
/// Two `Instance`s are the "same" dependency when `Arc::ptr_eq` holds.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// A zero-argument factory producing an [`Instance`].
pub type Initializer = Arc<dyn Fn() -> Instance + Send + Sync>;

/// Describes how to produce a dependency.
///
/// A shared definition is resolved at most once: its first produced value is
/// cached by the [`Manager`](crate::Manager) and the definition is dropped.
/// A non-shared (transient) definition runs its initializer on every lookup.
///
/// Sharing only makes sense when the factory hands out something with
/// identity. A factory that always returns the same global handle is
/// effectively shared regardless of the flag.
#[derive(Clone)]
pub struct Definition {
  id: String,
  initializer: Initializer,
  shared: bool,
}

impl Definition {
  /// Creates a definition from a typed factory.
  ///
  /// Each call of `factory` is wrapped in a fresh `Arc`, so non-shared
  /// lookups always yield distinct allocations.
  pub fn new<T, F>(id: impl Into<String>, factory: F, shared: bool) -> Self
  where
    T: Any + Send + Sync,
    F: Fn() -> T + Send + Sync + 'static,
  {
    Self::from_initializer(
      id,
      Arc::new(move || -> Instance { Arc::new(factory()) }),
      shared,
    )
  }

  /// A definition whose first produced value is reused for every lookup.
  pub fn shared<T, F>(id: impl Into<String>, factory: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn() -> T + Send + Sync + 'static,
  {
    Self::new(id, factory, true)
  }

  /// A definition whose factory runs on every lookup.
  pub fn transient<T, F>(id: impl Into<String>, factory: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn() -> T + Send + Sync + 'static,
  {
    Self::new(id, factory, false)
  }

  /// Creates a definition from an initializer that already produces
  /// type-erased instances.
  pub fn from_initializer(id: impl Into<String>, initializer: Initializer, shared: bool) -> Self {
    Self {
      id: id.into(),
      initializer,
      shared,
    }
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  pub fn is_shared(&self) -> bool {
    self.shared
  }

  /// Runs the initializer once.
  pub fn initialize(&self) -> Instance {
    (self.initializer)()
  }

  pub(crate) fn initializer(&self) -> &Initializer {
    &self.initializer
  }
}

impl fmt::Debug for Definition {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Definition")
      .field("id", &self.id)
      .field("shared", &self.shared)
      .finish_non_exhaustive()
  }
}
