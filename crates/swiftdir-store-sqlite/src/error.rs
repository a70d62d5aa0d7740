//! Error type for `swiftdir-store-sqlite`, and the mapping of SQLite failures
//! onto the core error taxonomy.

use rusqlite::ffi;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<Error> for swiftdir_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::Database(tokio_rusqlite::Error::Rusqlite(e)) => classify(e),
      other => swiftdir_core::Error::store(other),
    }
  }
}

/// Map constraint violations to `Conflict` / `RelatedNotFound`; everything
/// else is a plain store failure.
pub(crate) fn classify(e: rusqlite::Error) -> swiftdir_core::Error {
  if let rusqlite::Error::SqliteFailure(ref failure, ref detail) = e {
    let detail = detail.clone().unwrap_or_else(|| failure.to_string());
    match failure.extended_code {
      ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
        return swiftdir_core::Error::Conflict(detail);
      }
      ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
        return swiftdir_core::Error::RelatedNotFound(detail);
      }
      _ => {}
    }
  }
  swiftdir_core::Error::store(e)
}
