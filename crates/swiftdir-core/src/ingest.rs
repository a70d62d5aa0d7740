//! Bulk ingestion of parsed sheet rows.
//!
//! Each row is committed in its own transaction, and a failing row never
//! stops the batch. Rows are dispatched concurrently within a group, but the
//! headquarter group is fully committed before any branch row starts, so every
//! branch sees the headquarters it may link to.

use chrono::{DateTime, Utc};
use futures::{StreamExt as _, stream};
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  code::{headquarter_code_of, validate_iso2, validate_swift_code},
  row::{SwiftRow, partition_headquarters_first},
  store::{DirectoryStore, DirectoryTx},
};

// ─── Report ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
  Headquarter,
  Branch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RowStatus {
  Ok,
  Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowOutcome {
  pub swift_code: String,
  pub kind:       RowKind,
  #[serde(flatten)]
  pub status:     RowStatus,
}

impl RowOutcome {
  pub fn is_ok(&self) -> bool { matches!(self.status, RowStatus::Ok) }
}

/// Per-row results of one ingestion run. Partial success is a normal outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
  pub processed:   usize,
  pub succeeded:   usize,
  pub failed:      usize,
  /// Outcomes in processing order: headquarters, then branches.
  pub outcomes:    Vec<RowOutcome>,
  pub finished_at: DateTime<Utc>,
}

impl IngestReport {
  fn from_outcomes(outcomes: Vec<RowOutcome>) -> Self {
    let succeeded = outcomes.iter().filter(|o| o.is_ok()).count();
    Self {
      processed: outcomes.len(),
      succeeded,
      failed: outcomes.len() - succeeded,
      outcomes,
      finished_at: Utc::now(),
    }
  }

  pub fn failures(&self) -> impl Iterator<Item = &RowOutcome> {
    self.outcomes.iter().filter(|o| !o.is_ok())
  }
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// Ingest `rows` into `store` with up to `concurrency` rows in flight.
pub async fn ingest<S: DirectoryStore>(
  store: &S,
  rows: Vec<SwiftRow>,
  concurrency: usize,
) -> IngestReport {
  let concurrency = concurrency.max(1);
  let mut headquarters = partition_headquarters_first(rows);
  let split = headquarters.partition_point(SwiftRow::is_headquarter);
  let branches = headquarters.split_off(split);

  let mut outcomes = run_group(store, headquarters, concurrency).await;
  outcomes.extend(run_group(store, branches, concurrency).await);

  let report = IngestReport::from_outcomes(outcomes);
  match store.stats().await {
    Ok(stats) => tracing::info!(
      processed = report.processed,
      failed = report.failed,
      countries = stats.countries,
      headquarters = stats.headquarters,
      branches = stats.branches,
      "ingestion finished"
    ),
    Err(e) => tracing::warn!(
      processed = report.processed,
      failed = report.failed,
      "ingestion finished; stats unavailable: {e}"
    ),
  }
  report
}

async fn run_group<S: DirectoryStore>(
  store: &S,
  rows: Vec<SwiftRow>,
  concurrency: usize,
) -> Vec<RowOutcome> {
  stream::iter(rows)
    .map(|row| ingest_one(store, row))
    .buffered(concurrency)
    .collect()
    .await
}

async fn ingest_one<S: DirectoryStore>(store: &S, row: SwiftRow) -> RowOutcome {
  let swift_code = row.swift_code.clone();
  let kind = if row.is_headquarter() {
    RowKind::Headquarter
  } else {
    RowKind::Branch
  };

  let result = match validate_row(&row) {
    Ok(()) => store.transaction(move |tx| apply_row(tx, &row)).await,
    Err(e) => Err(e),
  };

  let status = match result {
    Ok(()) => RowStatus::Ok,
    Err(e) => {
      tracing::warn!(%swift_code, "row not ingested: {e}");
      RowStatus::Failed { reason: e.to_string() }
    }
  };
  RowOutcome { swift_code, kind, status }
}

fn validate_row(row: &SwiftRow) -> Result<()> {
  validate_swift_code(&row.swift_code)?;
  validate_iso2(&row.country_iso2)?;
  Ok(())
}

/// Upsert the row's country, then the row itself as a headquarter or a
/// linked branch.
fn apply_row(tx: &dyn DirectoryTx, row: &SwiftRow) -> Result<()> {
  tx.upsert_country(&row.country())?;

  if row.is_headquarter() {
    return tx.upsert_headquarter(&row.to_headquarter());
  }

  let candidate = headquarter_code_of(&row.swift_code);
  let link = tx.headquarter(&candidate)?.map(|hq| hq.swift_code);
  tx.upsert_branch(&row.to_branch(link))
}
