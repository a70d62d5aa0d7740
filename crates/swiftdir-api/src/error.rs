//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

const GENERIC_MESSAGE: &str = "An unexpected error occurred";

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  /// The ingestion source could not be opened or parsed.
  #[error("source error: {0}")]
  Source(#[from] swiftdir_sheet::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<swiftdir_core::Error> for ApiError {
  fn from(e: swiftdir_core::Error) -> Self {
    use swiftdir_core::Error as E;
    match e {
      E::Validation(m) => ApiError::BadRequest(m),
      E::NotFound(m) => ApiError::NotFound(m),
      E::RelatedNotFound(_) => ApiError::NotFound("Related record not found.".to_owned()),
      E::Conflict(m) => ApiError::Conflict(m),
      E::Store(e) => ApiError::Store(e),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, json!({ "message": m })),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, json!({ "message": m })),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, json!({ "message": m })),
      ApiError::Source(e) => {
        tracing::error!("ingestion source failed: {e}");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          json!({
            "message": "Error inserting data into database. Check your file path.",
            "error": e.to_string(),
          }),
        )
      }
      ApiError::Store(e) => {
        tracing::error!("store failure: {e}");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          json!({ "message": GENERIC_MESSAGE }),
        )
      }
    };
    (status, Json(body)).into_response()
  }
}
