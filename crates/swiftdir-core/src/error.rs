//! Error types for `swiftdir-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Malformed input: bad code length, missing required field.
  #[error("{0}")]
  Validation(String),

  #[error("{0}")]
  NotFound(String),

  /// A record with the same unique key already exists.
  #[error("{0}")]
  Conflict(String),

  /// A foreign key pointed at a record that does not exist.
  #[error("related record not found: {0}")]
  RelatedNotFound(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
