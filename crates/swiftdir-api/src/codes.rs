//! Handlers for single SWIFT code endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/v1/swift-codes/:swiftCode` | 400 unless 8–11 characters; 404 if unknown |
//! | `POST`   | `/v1/swift-codes` | Body: [`NewRecord`]; returns 201 |
//! | `DELETE` | `/v1/swift-codes/:swiftCode` | 404 if unknown |

use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use swiftdir_core::{
  lookup, mutation::{self, NewRecord}, store::DirectoryStore, view::SwiftCodeView,
};

use crate::{AppState, MessageBody, error::ApiError};

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /v1/swift-codes/:swiftCode`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  path: Result<Path<String>, PathRejection>,
) -> Result<Json<SwiftCodeView>, ApiError>
where
  S: DirectoryStore + 'static,
{
  let Path(swift_code) = path?;
  let view = lookup::get_by_code(&*state.store, &swift_code).await?;
  Ok(Json(view))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /v1/swift-codes`: returns 201 + `{"message": ...}`.
///
/// A malformed or incomplete body is a 400, not axum's default 422.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  body: Result<Json<NewRecord>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore + 'static,
{
  let Json(record) = body?;
  let created = mutation::add_record(&*state.store, record).await?;
  Ok((StatusCode::CREATED, Json(MessageBody::new(created.message()))))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /v1/swift-codes/:swiftCode`
pub async fn delete_one<S>(
  State(state): State<AppState<S>>,
  path: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageBody>, ApiError>
where
  S: DirectoryStore + 'static,
{
  let Path(swift_code) = path?;
  let deleted = mutation::delete_record(&*state.store, &swift_code).await?;
  Ok(Json(MessageBody::new(deleted.message())))
}
