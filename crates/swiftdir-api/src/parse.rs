//! Handler for `POST /v1/swift-codes/parse?filePath=<path>`.
//!
//! Reads the sheet on the blocking pool, then runs bulk ingestion. Row-level
//! failures are reported in the body; only an unreadable source fails the
//! request.

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
};
use serde::{Deserialize, Serialize};
use swiftdir_core::{ingest::{IngestReport, ingest}, store::DirectoryStore};

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ParseParams {
  #[serde(rename = "filePath")]
  pub file_path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
  pub message: String,
  #[serde(flatten)]
  pub report:  IngestReport,
}

/// `POST /v1/swift-codes/parse?filePath=<path>`
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  query: Result<Query<ParseParams>, QueryRejection>,
) -> Result<Json<ParseResponse>, ApiError>
where
  S: DirectoryStore + 'static,
{
  let Query(params) = query?;
  let path = params
    .file_path
    .filter(|p| !p.trim().is_empty())
    .ok_or_else(|| {
      ApiError::BadRequest("filePath parameter is required in the query".to_owned())
    })?;

  tracing::info!(%path, "ingesting source file");
  let rows = tokio::task::spawn_blocking(move || swiftdir_sheet::read_rows(path))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))??;

  let report = ingest(&*state.store, rows, state.ingest_concurrency).await;
  Ok(Json(ParseResponse {
    message: "Data inserted successfully".to_owned(),
    report,
  }))
}
