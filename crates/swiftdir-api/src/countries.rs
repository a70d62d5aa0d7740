//! Handler for `GET /v1/swift-codes/country/:iso2`.

use axum::{
  Json,
  extract::{Path, State, rejection::PathRejection},
};
use swiftdir_core::{lookup, store::DirectoryStore, view::CountryView};

use crate::{AppState, error::ApiError};

/// `GET /v1/swift-codes/country/:iso2`. 400 unless exactly two characters.
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  path: Result<Path<String>, PathRejection>,
) -> Result<Json<CountryView>, ApiError>
where
  S: DirectoryStore + 'static,
{
  let Path(iso2) = path?;
  let view = lookup::get_by_country(&*state.store, &iso2).await?;
  Ok(Json(view))
}
