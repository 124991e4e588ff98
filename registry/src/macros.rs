//! Public macros for ergonomic dependency resolution.

/// Resolves a dependency and downcasts it, panicking if it is missing or of
/// another type.
///
/// Without `in`, the dependency is resolved from [`global()`](crate::global).
/// The `trait` form expects the definition to produce an `Arc<dyn Trait>` and
/// returns that inner `Arc`.
///
/// # Panics
///
/// Panics when the id is unknown or the value has another type. For a
/// non-panicking lookup use `get_as` or `try_get`.
///
/// # Examples
///
/// ```
/// use fibre_registry::{global, resolve, Definition, Manager};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync { fn greet(&self) -> String; }
/// struct English;
/// impl Greeter for English { fn greet(&self) -> String { "Hello!".to_string() } }
///
/// global().add_definition(Definition::shared("macro.doc.greeter", || -> Arc<dyn Greeter> {
///   Arc::new(English)
/// }));
/// let greeter = resolve!(trait Greeter, "macro.doc.greeter");
/// assert_eq!(greeter.greet(), "Hello!");
///
/// let mut manager = Manager::new();
/// manager.add_definition(Definition::transient("answer", || 42u32));
/// assert_eq!(*resolve!(in manager, u32, "answer"), 42);
/// ```
#[macro_export]
macro_rules! resolve {
  (in $manager:expr, trait $trait_ident:ident, $id:expr) => {{
    let id: &str = $id;
    $manager
      .get_as::<::std::sync::Arc<dyn $trait_ident>>(id)
      .map(|outer| ::std::sync::Arc::clone(&*outer))
      .unwrap_or_else(|| {
        panic!(
          "Failed to resolve required dependency '{}': {}",
          id,
          ::std::any::type_name::<dyn $trait_ident>()
        )
      })
  }};

  (in $manager:expr, $type:ty, $id:expr) => {{
    let id: &str = $id;
    $manager.get_as::<$type>(id).unwrap_or_else(|| {
      panic!(
        "Failed to resolve required dependency '{}': {}",
        id,
        ::std::any::type_name::<$type>()
      )
    })
  }};

  (trait $trait_ident:ident, $id:expr) => {
    $crate::resolve!(in $crate::global(), trait $trait_ident, $id)
  };

  ($type:ty, $id:expr) => {
    $crate::resolve!(in $crate::global(), $type, $id)
  };
}
