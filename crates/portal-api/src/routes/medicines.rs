//! # Medicine Routes
//!
//! Medicines offered under programs, created one at a time from a JSON body.

use std::collections::BTreeMap;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use portal_core::AttributeMap;
use portal_schema::Medicine;

use super::CreatedRecord;
use crate::auth::BearerToken;
use crate::error::{AppError, ErrorBody};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/v1/medicines", get(list_medicines).post(create_medicine))
}

/// POST /v1/medicines — Create a medicine.
#[utoipa::path(
    post,
    path = "/v1/medicines",
    request_body = Medicine,
    responses(
        (status = 201, description = "Medicine created", body = CreatedRecord),
        (status = 400, description = "Malformed JSON", body = ErrorBody),
        (status = 401, description = "Missing bearer token", body = ErrorBody),
        (status = 422, description = "Medicine invalid", body = ErrorBody),
        (status = 502, description = "Registry error", body = ErrorBody),
        (status = 503, description = "Registry not configured", body = ErrorBody),
    ),
    tag = "medicines"
)]
pub async fn create_medicine(
    State(state): State<AppState>,
    token: BearerToken,
    body: Bytes,
) -> Result<(StatusCode, Json<CreatedRecord>), AppError> {
    super::create::<Medicine>(&state, &token, &body).await
}

/// GET /v1/medicines — Search medicines.
#[utoipa::path(
    get,
    path = "/v1/medicines",
    responses(
        (status = 200, description = "Matching medicines"),
        (status = 401, description = "Missing bearer token", body = ErrorBody),
        (status = 502, description = "Registry error", body = ErrorBody),
        (status = 503, description = "Registry not configured", body = ErrorBody),
    ),
    tag = "medicines"
)]
pub async fn list_medicines(
    State(state): State<AppState>,
    token: BearerToken,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<Json<Vec<AttributeMap>>, AppError> {
    super::search::<Medicine>(&state, &token, params).await
}
