//! Enrollment routes: CSV registration and search of pre-enrolled recipients.

use std::collections::BTreeMap;

use axum::extract::{Multipart, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use portal_core::AttributeMap;
use portal_schema::Enrollment;

use crate::auth::BearerToken;
use crate::error::{AppError, ErrorBody};
use crate::state::AppState;
use crate::upload::UploadSummary;

pub fn router() -> Router<AppState> {
    Router::new().route("/v1/enrollments", get(list_enrollments).post(upload_enrollments))
}

/// POST /v1/enrollments — Register enrollments from a CSV upload.
#[utoipa::path(
    post,
    path = "/v1/enrollments",
    request_body(content = String, content_type = "multipart/form-data", description = "CSV file in field `file`"),
    responses(
        (status = 200, description = "Upload processed", body = UploadSummary),
        (status = 400, description = "Malformed upload", body = ErrorBody),
        (status = 401, description = "Missing bearer token", body = ErrorBody),
        (status = 503, description = "Registry not configured", body = ErrorBody),
    ),
    tag = "enrollments"
)]
pub async fn upload_enrollments(
    State(state): State<AppState>,
    token: BearerToken,
    multipart: Multipart,
) -> Result<Json<UploadSummary>, AppError> {
    super::bulk_create::<Enrollment>(&state, &token, multipart).await
}

#[utoipa::path(
    get,
    path = "/v1/enrollments",
    responses(
        (status = 200, description = "Matching enrollments"),
        (status = 401, description = "Missing bearer token", body = ErrorBody),
        (status = 502, description = "Registry error", body = ErrorBody),
        (status = 503, description = "Registry not configured", body = ErrorBody),
    ),
    tag = "enrollments"
)]
pub async fn list_enrollments(
    State(state): State<AppState>,
    token: BearerToken,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<Json<Vec<AttributeMap>>, AppError> {
    super::search::<Enrollment>(&state, &token, params).await
}
