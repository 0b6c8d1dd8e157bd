//! # Program Routes
//!
//! Vaccination programs, created one at a time from a JSON body.

use std::collections::BTreeMap;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use portal_core::AttributeMap;
use portal_schema::Program;

use super::CreatedRecord;
use crate::auth::BearerToken;
use crate::error::{AppError, ErrorBody};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/v1/programs", get(list_programs).post(create_program))
}

/// POST /v1/programs — Create a program.
#[utoipa::path(
    post,
    path = "/v1/programs",
    request_body = Program,
    responses(
        (status = 201, description = "Program created", body = CreatedRecord),
        (status = 400, description = "Malformed JSON", body = ErrorBody),
        (status = 401, description = "Missing bearer token", body = ErrorBody),
        (status = 422, description = "Program invalid", body = ErrorBody),
        (status = 502, description = "Registry error", body = ErrorBody),
        (status = 503, description = "Registry not configured", body = ErrorBody),
    ),
    tag = "programs"
)]
pub async fn create_program(
    State(state): State<AppState>,
    token: BearerToken,
    body: Bytes,
) -> Result<(StatusCode, Json<CreatedRecord>), AppError> {
    super::create::<Program>(&state, &token, &body).await
}

/// GET /v1/programs — Search programs.
#[utoipa::path(
    get,
    path = "/v1/programs",
    responses(
        (status = 200, description = "Matching programs"),
        (status = 401, description = "Missing bearer token", body = ErrorBody),
        (status = 502, description = "Registry error", body = ErrorBody),
        (status = 503, description = "Registry not configured", body = ErrorBody),
    ),
    tag = "programs"
)]
pub async fn list_programs(
    State(state): State<AppState>,
    token: BearerToken,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<Json<Vec<AttributeMap>>, AppError> {
    super::search::<Program>(&state, &token, params).await
}
