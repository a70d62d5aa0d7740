//! Stored entities: countries, headquarters and branches.
//!
//! These mirror the relational rows one-to-one. The nested response shapes
//! served over HTTP are assembled from them in [`crate::view`].

use serde::{Deserialize, Serialize};

/// A country, keyed by its ISO2 code.
///
/// Created on first reference and never overwritten afterwards: a later row
/// with a different name or time zone leaves the stored values untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
  pub iso2:      String,
  pub name:      String,
  pub time_zone: Option<String>,
}

/// A bank's primary office. Its code always ends in `XXX`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headquarter {
  pub swift_code:   String,
  pub code_type:    String,
  pub bank_name:    String,
  pub address:      String,
  pub town_name:    String,
  pub country_iso2: String,
}

/// A non-primary office.
///
/// `headquarter` is derived by [`crate::code::headquarter_code_of`] and is
/// `None` when no matching headquarter exists in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
  pub swift_code:   String,
  pub code_type:    String,
  pub bank_name:    String,
  pub address:      String,
  pub town_name:    String,
  pub country_iso2: String,
  pub headquarter:  Option<String>,
}

/// Entity counts, used for ingestion summaries and idempotency checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryStats {
  pub countries:    u64,
  pub headquarters: u64,
  pub branches:     u64,
}
