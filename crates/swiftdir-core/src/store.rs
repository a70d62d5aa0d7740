//! The `DirectoryStore` trait and its transaction scope.
//!
//! The trait is implemented by storage backends (e.g. `swiftdir-store-sqlite`).
//! Every multi-step operation in this crate runs as one closure inside
//! [`DirectoryStore::transaction`], so a partially applied mutation is never
//! observable.

use std::future::Future;

use crate::{
  Result,
  model::{Branch, Country, DirectoryStats, Headquarter},
};

// ─── Transaction scope ───────────────────────────────────────────────────────

/// Operations available inside a single store transaction.
///
/// Implementations are synchronous; they run on the backend's own thread.
/// Unique-key violations surface as [`crate::Error::Conflict`] and dangling
/// foreign keys as [`crate::Error::RelatedNotFound`].
pub trait DirectoryTx {
  // ── Countries ─────────────────────────────────────────────────────────

  fn country(&self, iso2: &str) -> Result<Option<Country>>;

  /// Insert the country if its ISO2 code is unseen; otherwise do nothing.
  fn upsert_country(&self, country: &Country) -> Result<()>;

  // ── Headquarters ──────────────────────────────────────────────────────

  fn headquarter(&self, swift_code: &str) -> Result<Option<Headquarter>>;

  /// Insert, or update every mutable field on conflict.
  fn upsert_headquarter(&self, hq: &Headquarter) -> Result<()>;

  /// Insert; fails with `Conflict` if the code already exists.
  fn insert_headquarter(&self, hq: &Headquarter) -> Result<()>;

  /// Returns `false` if no headquarter had that code.
  fn delete_headquarter(&self, swift_code: &str) -> Result<bool>;

  fn headquarters_in_country(&self, iso2: &str) -> Result<Vec<Headquarter>>;

  // ── Branches ──────────────────────────────────────────────────────────

  fn branch(&self, swift_code: &str) -> Result<Option<Branch>>;

  /// Insert, or update every mutable field (including the link) on conflict.
  fn upsert_branch(&self, branch: &Branch) -> Result<()>;

  /// Insert; fails with `Conflict` if the code already exists.
  fn insert_branch(&self, branch: &Branch) -> Result<()>;

  fn delete_branch(&self, swift_code: &str) -> Result<bool>;

  fn branches_in_country(&self, iso2: &str) -> Result<Vec<Branch>>;

  /// Branches currently linked to `hq_code`.
  fn branches_of(&self, hq_code: &str) -> Result<Vec<Branch>>;

  /// Branches with no headquarter link whose code starts with `prefix`.
  fn unlinked_branches(&self, prefix: &str) -> Result<Vec<Branch>>;

  fn link_branch(&self, branch_code: &str, hq_code: &str) -> Result<()>;

  // ── Misc ──────────────────────────────────────────────────────────────

  fn stats(&self) -> Result<DirectoryStats>;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a directory store backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait DirectoryStore: Send + Sync {
  /// Run `f` inside one transaction. The transaction commits when `f` returns
  /// `Ok` and rolls back when it returns `Err`.
  fn transaction<T, F>(&self, f: F) -> impl Future<Output = Result<T>> + Send + '_
  where
    T: Send + 'static,
    F: FnOnce(&dyn DirectoryTx) -> Result<T> + Send + 'static;

  /// Entity counts, read in their own transaction.
  fn stats(&self) -> impl Future<Output = Result<DirectoryStats>> + Send + '_ {
    self.transaction(|tx| tx.stats())
  }
}
