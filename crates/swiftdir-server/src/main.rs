//! swiftdir server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! directory, and serves the REST API over HTTP.
//!
//! # One-shot import
//!
//! ```text
//! cargo run -p swiftdir-server -- --import swift_codes.xlsx
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use swiftdir_server::{ServerConfig, app, import_file};
use swiftdir_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "SWIFT code directory server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Ingest this spreadsheet, print the report as JSON and exit.
  #[arg(long, value_name = "PATH")]
  import: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("SWIFTDIR").try_parsing(true))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let database_path = expand_tilde(&server_cfg.database_path);
  let store = SqliteStore::open(&database_path)
    .await
    .with_context(|| format!("failed to open store at {database_path:?}"))?;
  let store = Arc::new(store);

  // Import mode: ingest and exit.
  if let Some(path) = cli.import {
    let report =
      import_file(&*store, expand_tilde(&path), server_cfg.ingest_concurrency).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    return Ok(());
  }

  if let Some(path) = &server_cfg.import_on_start {
    let report =
      import_file(&*store, expand_tilde(path), server_cfg.ingest_concurrency).await?;
    tracing::info!(
      processed = report.processed,
      failed = report.failed,
      "startup import finished"
    );
  }

  let app = app(store, &server_cfg);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
