//! Error type for `caseload-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A write was rejected; each entry is a user-facing message.
  #[error("validation failed: {}", .0.join(". "))]
  Validation(Vec<String>),

  #[error("assignment not found: {0}")]
  AssignmentNotFound(uuid::Uuid),
}

impl From<Error> for caseload_core::Error {
  fn from(err: Error) -> Self {
    match err {
      Error::Validation(messages) => Self::ValidationFailed(messages),
      Error::AssignmentNotFound(id) => Self::NotFound(format!("assignment {id}")),
      other => Self::Store(Box::new(other)),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
