//! # Fibre Registry
//!
//! A small dependency registry for application bootstrap. Factories
//! ("initializers") are registered under string ids and run lazily, the first
//! time somebody asks for the dependency.
//!
//! ## Core Concepts
//!
//! - **Definition**: an id, a factory and a `shared` flag.
//! - **Shared dependency**: produced once, cached, and handed out as the very
//!   same `Arc` on every later lookup. Its definition is dropped once cached.
//! - **Transient dependency**: produced fresh on every lookup.
//! - **Manager**: owns pending definitions and the shared-instance cache.
//!   It is single-threaded by contract; lookups take `&mut self`.
//! - **Global Manager**: a lazily created process-wide instance, via `global()`.
//!
//! Values are type-erased (`Arc<dyn Any + Send + Sync>`); recovering the
//! concrete type is the caller's business, through `get_as`, `try_get` or the
//! `resolve!` macro.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_registry::{Definition, ListFilter, Manager};
//! use std::sync::Arc;
//!
//! let mut manager = Manager::new();
//! manager.add_definition(Definition::shared("app.config", || String::from("prod")));
//! manager.add_definition(Definition::transient("app.buffer", Vec::<u8>::new));
//!
//! let a = manager.get("app.config").unwrap();
//! let b = manager.get("app.config").unwrap();
//! assert!(Arc::ptr_eq(&a, &b));
//!
//! assert_eq!(manager.list_ids(ListFilter::InitializedShared), vec!["app.config"]);
//! assert!(manager.get("app.unknown").is_none());
//! ```

mod definition;
mod error;
mod filter;
mod global;
mod macros;
mod manager;

pub use definition::{Definition, Initializer, Instance};
pub use error::{ResolveError, Result};
pub use filter::ListFilter;
pub use global::{global, GlobalManager};
pub use manager::Manager;
