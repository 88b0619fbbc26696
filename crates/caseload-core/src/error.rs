//! Error types for `caseload-core`.

use thiserror::Error;

use crate::policy::Action;

#[derive(Debug, Error)]
pub enum Error {
  /// A policy predicate denied the transition.
  #[error("not permitted to {0}")]
  Forbidden(Action),

  /// The entity does not exist or lies outside the caller's organization.
  #[error("not found: {0}")]
  NotFound(String),

  /// The persistence layer rejected the write.
  #[error("validation failed: {}", .0.join(". "))]
  ValidationFailed(Vec<String>),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Convenience constructor for a single validation message.
  pub fn invalid(message: impl Into<String>) -> Self {
    Self::ValidationFailed(vec![message.into()])
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
