//! # Vaccinator Routes
//!
//! Vaccinators are registered in bulk from CSV. A row may carry one
//! program association (`programId`, `programStatus`, `certified`).

use std::collections::BTreeMap;

use axum::extract::{Multipart, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use portal_core::AttributeMap;
use portal_schema::Vaccinator;

use crate::auth::BearerToken;
use crate::error::{AppError, ErrorBody};
use crate::state::AppState;
use crate::upload::UploadSummary;

pub fn router() -> Router<AppState> {
    Router::new().route("/v1/vaccinators", get(list_vaccinators).post(upload_vaccinators))
}

/// POST /v1/vaccinators — Register vaccinators from a CSV upload.
#[utoipa::path(
    post,
    path = "/v1/vaccinators",
    request_body(content = String, content_type = "multipart/form-data", description = "CSV file in field `file`"),
    responses(
        (status = 200, description = "Upload processed", body = UploadSummary),
        (status = 400, description = "Malformed upload", body = ErrorBody),
        (status = 401, description = "Missing bearer token", body = ErrorBody),
        (status = 503, description = "Registry not configured", body = ErrorBody),
    ),
    tag = "vaccinators"
)]
pub async fn upload_vaccinators(
    State(state): State<AppState>,
    token: BearerToken,
    multipart: Multipart,
) -> Result<Json<UploadSummary>, AppError> {
    super::bulk_create::<Vaccinator>(&state, &token, multipart).await
}

/// GET /v1/vaccinators — Search vaccinators.
#[utoipa::path(
    get,
    path = "/v1/vaccinators",
    responses(
        (status = 200, description = "Matching vaccinators"),
        (status = 401, description = "Missing bearer token", body = ErrorBody),
        (status = 502, description = "Registry error", body = ErrorBody),
        (status = 503, description = "Registry not configured", body = ErrorBody),
    ),
    tag = "vaccinators"
)]
pub async fn list_vaccinators(
    State(state): State<AppState>,
    token: BearerToken,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<Json<Vec<AttributeMap>>, AppError> {
    super::search::<Vaccinator>(&state, &token, params).await
}
