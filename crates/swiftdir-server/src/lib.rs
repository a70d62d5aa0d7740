//! Server wiring for the SWIFT code directory: configuration, the layered
//! application router, and file import.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use axum::Router;
use serde::Deserialize;
use swiftdir_api::{AppState, api_router};
use swiftdir_core::{
  ingest::{IngestReport, ingest},
  store::DirectoryStore,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `SWIFTDIR_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:               String,
  pub port:               u16,
  pub database_path:      PathBuf,
  /// Rows in flight at once during bulk ingestion.
  pub ingest_concurrency: usize,
  /// Source file ingested before the listener is bound.
  pub import_on_start:    Option<PathBuf>,
  /// Attach a permissive CORS layer.
  pub cors:               bool,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:               "0.0.0.0".to_string(),
      port:               8080,
      database_path:      PathBuf::from("swift.db"),
      ingest_concurrency: 8,
      import_on_start:    None,
      cors:               true,
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Application ──────────────────────────────────────────────────────────────

/// Build the full application: the API router plus tracing and CORS layers.
pub fn app<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: DirectoryStore + 'static,
{
  let state = AppState::new(store, config.ingest_concurrency.max(1));
  let router = api_router(state).layer(TraceLayer::new_for_http());
  if config.cors {
    router.layer(CorsLayer::permissive())
  } else {
    router
  }
}

/// Read `path` on the blocking pool and ingest every row into `store`.
pub async fn import_file<S>(
  store:       &S,
  path:        PathBuf,
  concurrency: usize,
) -> anyhow::Result<IngestReport>
where
  S: DirectoryStore,
{
  let source_name = path.display().to_string();
  let rows = tokio::task::spawn_blocking(move || swiftdir_sheet::read_rows(path))
    .await
    .context("reader task panicked")?
    .with_context(|| format!("failed to read {source_name}"))?;

  tracing::info!(rows = rows.len(), source = %source_name, "importing");
  Ok(ingest(store, rows, concurrency.max(1)).await)
}

#[cfg(test)]
mod tests {
  use std::io::Write as _;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use swiftdir_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  use super::*;

  #[test]
  fn empty_sources_yield_defaults() {
    let cfg: ServerConfig = config::Config::builder()
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap();
    assert_eq!(cfg.address(), "0.0.0.0:8080");
    assert_eq!(cfg.database_path, PathBuf::from("swift.db"));
    assert_eq!(cfg.ingest_concurrency, 8);
    assert!(cfg.import_on_start.is_none());
    assert!(cfg.cors);
  }

  #[test]
  fn overrides_replace_defaults() {
    let cfg: ServerConfig = config::Config::builder()
      .set_override("port", 9090)
      .unwrap()
      .set_override("cors", false)
      .unwrap()
      .set_override("import_on_start", "~/swift.xlsx")
      .unwrap()
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap();
    assert_eq!(cfg.port, 9090);
    assert!(!cfg.cors);
    assert_eq!(cfg.import_on_start, Some(PathBuf::from("~/swift.xlsx")));
    assert_eq!(cfg.host, "0.0.0.0");
  }

  #[tokio::test]
  async fn cors_layer_answers_preflight() {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let resp = app(store, &ServerConfig::default())
      .oneshot(
        Request::builder()
          .method("OPTIONS")
          .uri("/v1/swift-codes/TESTUS33XXX")
          .header(header::ORIGIN, "http://example.com")
          .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
          .body(Body::empty())
          .unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
  }

  #[tokio::test]
  async fn import_of_missing_file_fails() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let err = import_file(&store, PathBuf::from("/nonexistent/swift.xlsx"), 4)
      .await
      .unwrap_err();
    assert!(err.to_string().contains("failed to read"));
  }

  #[tokio::test]
  async fn import_reads_file_and_ingests_rows() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(
      file,
      "COUNTRY ISO2 CODE,SWIFT CODE,CODE TYPE,NAME,ADDRESS,TOWN NAME,COUNTRY NAME,TIME ZONE"
    )
    .unwrap();
    writeln!(file, "PL,AAAABBCC123,BIC11,ALPHA,Street 1,WARSAW,POLAND,Europe/Warsaw").unwrap();
    writeln!(file, "PL,AAAABBCCXXX,BIC11,ALPHA,Street 2,WARSAW,POLAND,Europe/Warsaw").unwrap();
    file.flush().unwrap();

    let report = import_file(&store, file.path().to_path_buf(), 0).await.unwrap();
    assert_eq!(report.processed, 2);
    assert_eq!(report.failed, 0);

    let stats = store.stats().await.unwrap();
    assert_eq!(stats.headquarters, 1);
    assert_eq!(stats.branches, 1);
  }
}
