use thiserror::Error;

/// Errors reported by the typed retrieval helpers (`try_get`).
///
/// The untyped lookup never fails: an unknown id is simply `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
  #[error("no dependency registered under '{id}'")]
  NotFound { id: String },

  #[error("dependency '{id}' is not of type {expected}")]
  TypeMismatch { id: String, expected: &'static str },
}

/// A specialized `Result` type for registry lookups.
pub type Result<T, E = ResolveError> = std::result::Result<T, E>;
