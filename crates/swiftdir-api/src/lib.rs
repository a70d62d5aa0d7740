//! JSON REST API for the SWIFT code directory.
//!
//! Exposes an axum [`Router`] backed by any
//! [`swiftdir_core::store::DirectoryStore`]. Handlers only translate between
//! HTTP and the core services; TLS, CORS and tracing layers are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = swiftdir_api::api_router(AppState::new(store, 8));
//! ```

pub mod codes;
pub mod countries;
pub mod error;
pub mod parse;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use serde::{Deserialize, Serialize};
use swiftdir_core::store::DirectoryStore;

pub use error::ApiError;

/// Shared state threaded through all handlers.
pub struct AppState<S> {
  pub store:              Arc<S>,
  /// Rows in flight at once during bulk ingestion.
  pub ingest_concurrency: usize,
}

impl<S> AppState<S> {
  pub fn new(store: Arc<S>, ingest_concurrency: usize) -> Self {
    Self { store, ingest_concurrency }
  }
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:              Arc::clone(&self.store),
      ingest_concurrency: self.ingest_concurrency,
    }
  }
}

/// `{"message": "..."}`, the body of every mutation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBody {
  pub message: String,
}

impl MessageBody {
  pub fn new(message: impl Into<String>) -> Self { Self { message: message.into() } }
}

/// Build the `/v1/swift-codes` router for `state`.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: DirectoryStore + 'static,
{
  Router::new()
    .route("/v1/swift-codes", post(codes::create::<S>))
    .route("/v1/swift-codes/", post(codes::create::<S>))
    .route("/v1/swift-codes/parse", post(parse::handler::<S>))
    .route(
      "/v1/swift-codes/{swift_code}",
      get(codes::get_one::<S>).delete(codes::delete_one::<S>),
    )
    .route("/v1/swift-codes/country/{iso2}", get(countries::get_one::<S>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::io::Write as _;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use serde_json::{Value, json};
  use swiftdir_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  use super::*;

  async fn make_state() -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    AppState::new(Arc::new(store), 4)
  }

  async fn send(
    state:  AppState<SqliteStore>,
    method: &str,
    uri:    &str,
    body:   Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = api_router(state)
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
  }

  fn test_bank(code: &str, is_headquarter: bool) -> Value {
    json!({
      "swiftCode": code,
      "bankName": "Test Bank",
      "address": "1 Main St",
      "countryISO2": "US",
      "countryName": "UNITED STATES",
      "isHeadquarter": is_headquarter,
    })
  }

  // ── GET /:swiftCode ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn invalid_code_length_returns_400() {
    let state = make_state().await;
    for code in ["SHORT", "3029302930923092"] {
      let (status, body) =
        send(state.clone(), "GET", &format!("/v1/swift-codes/{code}"), None).await;
      assert_eq!(status, StatusCode::BAD_REQUEST);
      assert_eq!(
        body["message"],
        "Invalid SWIFT code. Please provide a valid 8 or 11 character SWIFT code."
      );
    }
  }

  #[tokio::test]
  async fn unknown_code_returns_404() {
    let state = make_state().await;
    let (status, body) = send(state, "GET", "/v1/swift-codes/NOPENOPEXXX", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "SWIFT code NOPENOPEXXX not found.");
  }

  // ── POST / ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_headquarter_then_get_returns_empty_branches() {
    let state = make_state().await;

    let (status, body) = send(
      state.clone(),
      "POST",
      "/v1/swift-codes/",
      Some(test_bank("TESTUS33XXX", true)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Bank headquarter created successfully.");

    let (status, body) = send(state, "GET", "/v1/swift-codes/TESTUS33XXX", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isHeadquarter"], json!(true));
    assert_eq!(body["branches"], json!([]));
    assert_eq!(body["countryISO2"], "US");
    assert_eq!(body["countryName"], "UNITED STATES");
    assert_eq!(body["bankName"], "Test Bank");
  }

  #[tokio::test]
  async fn create_branch_then_get_has_no_branches_field() {
    let state = make_state().await;
    let (status, _) = send(
      state.clone(),
      "POST",
      "/v1/swift-codes",
      Some(test_bank("TESTUS33NYC", false)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(state, "GET", "/v1/swift-codes/TESTUS33NYC", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isHeadquarter"], json!(false));
    assert!(body.get("branches").is_none());
  }

  #[tokio::test]
  async fn headquarter_created_after_branch_lists_it() {
    let state = make_state().await;
    send(state.clone(), "POST", "/v1/swift-codes/", Some(test_bank("TESTUS33NYC", false))).await;
    send(state.clone(), "POST", "/v1/swift-codes/", Some(test_bank("TESTUS33XXX", true))).await;

    let (status, body) = send(state, "GET", "/v1/swift-codes/TESTUS33XXX", None).await;
    assert_eq!(status, StatusCode::OK);
    let branches = body["branches"].as_array().unwrap();
    assert_eq!(branches.len(), 1);
    assert_eq!(branches[0]["swiftCode"], "TESTUS33NYC");
    assert_eq!(branches[0]["isHeadquarter"], json!(false));
    assert_eq!(branches[0]["countryName"], "UNITED STATES");
  }

  #[tokio::test]
  async fn duplicate_create_returns_409() {
    let state = make_state().await;
    let (status, _) = send(
      state.clone(),
      "POST",
      "/v1/swift-codes/",
      Some(test_bank("TESTUS33XXX", true)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
      state,
      "POST",
      "/v1/swift-codes/",
      Some(test_bank("TESTUS33XXX", true)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().contains("already exists"));
  }

  #[tokio::test]
  async fn malformed_body_returns_400() {
    let state = make_state().await;
    let (status, _) = send(
      state.clone(),
      "POST",
      "/v1/swift-codes/",
      Some(json!({ "swiftCode": "TESTUS33XXX" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
      state,
      "POST",
      "/v1/swift-codes/",
      Some(test_bank("TEST", true)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  // ── DELETE /:swiftCode ──────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_existing_then_get_returns_404() {
    let state = make_state().await;
    send(state.clone(), "POST", "/v1/swift-codes/", Some(test_bank("TESTUS33XXX", true))).await;

    let (status, body) =
      send(state.clone(), "DELETE", "/v1/swift-codes/TESTUS33XXX", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
      body["message"],
      "Headquarter with swiftCode TESTUS33XXX has been deleted."
    );

    let (status, _) = send(state, "GET", "/v1/swift-codes/TESTUS33XXX", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn delete_unknown_returns_404() {
    let state = make_state().await;
    let (status, _) = send(state, "DELETE", "/v1/swift-codes/NOPENOPEXXX", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── GET /country/:iso2 ──────────────────────────────────────────────────────

  #[tokio::test]
  async fn country_lookup_validates_and_404s() {
    let state = make_state().await;
    let (status, body) = send(state.clone(), "GET", "/v1/swift-codes/country/US1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
      body["message"],
      "Invalid country ISO2 code. Please provide a valid 2-character ISO2 country code."
    );

    let (status, _) = send(state, "GET", "/v1/swift-codes/country/ZZ", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn country_lookup_lists_codes() {
    let state = make_state().await;
    send(state.clone(), "POST", "/v1/swift-codes/", Some(test_bank("TESTUS33XXX", true))).await;
    send(state.clone(), "POST", "/v1/swift-codes/", Some(test_bank("TESTUS33NYC", false))).await;

    let (status, body) = send(state, "GET", "/v1/swift-codes/country/us", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["countryISO2"], "US");
    assert_eq!(body["countryName"], "UNITED STATES");
    let codes = body["swiftCodes"].as_array().unwrap();
    assert_eq!(codes.len(), 2);
    for entry in codes {
      for key in ["address", "bankName", "countryISO2", "isHeadquarter", "swiftCode"] {
        assert!(entry.get(key).is_some(), "missing {key}: {entry}");
      }
      assert!(entry.get("countryName").is_none());
    }
  }

  // ── POST /parse ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn parse_without_file_path_returns_400() {
    let state = make_state().await;
    let (status, body) = send(state, "POST", "/v1/swift-codes/parse", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "filePath parameter is required in the query");
  }

  #[tokio::test]
  async fn parse_missing_file_returns_500() {
    let state = make_state().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.xlsx");
    let (status, body) = send(
      state,
      "POST",
      &format!("/v1/swift-codes/parse?filePath={}", path.display()),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("not found"));
  }

  #[tokio::test]
  async fn parse_ingests_csv_and_links_branches() {
    let state = make_state().await;
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(
      file,
      "COUNTRY ISO2 CODE,SWIFT CODE,CODE TYPE,NAME,ADDRESS,TOWN NAME,COUNTRY NAME,TIME ZONE"
    )
    .unwrap();
    writeln!(file, "PL,AAAABBCC123,BIC11,ALPHA,Street 1,WARSAW,POLAND,Europe/Warsaw").unwrap();
    writeln!(file, "PL,AAAABBCCXXX,BIC11,ALPHA,Street 2,WARSAW,POLAND,Europe/Warsaw").unwrap();
    writeln!(file, "PL,BAD,BIC11,BROKEN,,WARSAW,POLAND,Europe/Warsaw").unwrap();
    file.flush().unwrap();

    let (status, body) = send(
      state.clone(),
      "POST",
      &format!("/v1/swift-codes/parse?filePath={}", file.path().display()),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Data inserted successfully");
    assert_eq!(body["processed"], json!(3));
    assert_eq!(body["failed"], json!(1));

    let (status, body) = send(state, "GET", "/v1/swift-codes/AAAABBCCXXX", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["branches"][0]["swiftCode"], "AAAABBCC123");
  }

  #[tokio::test]
  async fn parse_ingests_workbook() {
    let state = make_state().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("swift_codes.xlsx");

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    let header = [
      "COUNTRY ISO2 CODE", "SWIFT CODE", "CODE TYPE", "NAME", "ADDRESS", "TOWN NAME",
      "COUNTRY NAME", "TIME ZONE",
    ];
    let records = [
      ["AL", "AAISALTRAML", "BIC11", "UNITED BANK", "", "TIRANA", "ALBANIA", "Europe/Tirane"],
      ["AL", "AAISALTRXXX", "BIC11", "UNITED BANK", "HQ ST", "TIRANA", "ALBANIA", "Europe/Tirane"],
    ];
    for (col, title) in header.iter().enumerate() {
      sheet.write_string(0, col as u16, *title).unwrap();
    }
    for (row, record) in records.iter().enumerate() {
      for (col, value) in record.iter().enumerate() {
        if !value.is_empty() {
          sheet.write_string(row as u32 + 1, col as u16, *value).unwrap();
        }
      }
    }
    workbook.save(&path).unwrap();

    let (status, body) = send(
      state.clone(),
      "POST",
      &format!("/v1/swift-codes/parse?filePath={}", path.display()),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["processed"], json!(2));
    assert_eq!(body["failed"], json!(0));

    let (status, body) = send(state, "GET", "/v1/swift-codes/AAISALTRXXX", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["countryName"], "ALBANIA");
    assert_eq!(body["branches"][0]["swiftCode"], "AAISALTRAML");
    assert_eq!(body["branches"][0]["address"], "");
  }

  // ── Extractor rejections ────────────────────────────────────────────────────

  #[tokio::test]
  async fn bad_query_string_is_json_400() {
    let state = make_state().await;
    let (status, body) = send(
      state,
      "POST",
      "/v1/swift-codes/parse?filePath=a.xlsx&filePath=b.xlsx",
      None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("filePath"));
  }

  #[tokio::test]
  async fn undecodable_path_segment_is_json_400() {
    let state = make_state().await;
    for (method, uri) in [
      ("GET", "/v1/swift-codes/%FF%FE%FD%FC%FB%FA%F9%F8"),
      ("DELETE", "/v1/swift-codes/%FF%FE%FD%FC%FB%FA%F9%F8"),
      ("GET", "/v1/swift-codes/country/%FF%FE"),
    ] {
      let (status, body) = send(state.clone(), method, uri, None).await;
      assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
      assert!(body["message"].is_string(), "{method} {uri}: {body}");
    }
  }
}
