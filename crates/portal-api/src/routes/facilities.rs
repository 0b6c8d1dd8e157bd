//! # Facility Routes
//!
//! Facilities are registered in bulk from CSV and updated in bulk from a
//! JSON array. An update batch is validated as a whole before anything is
//! forwarded: one invalid element rejects the batch with every violation,
//! pathed by array index (`1.status`).

use std::collections::BTreeMap;

use axum::body::Bytes;
use axum::extract::{Multipart, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use portal_core::{AttributeMap, RegistryRecord};
use portal_schema::{Facility, FacilityUpdate, FieldPath, Schema, Validate, ValidationViolations};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::BearerToken;
use crate::error::{AppError, ErrorBody};
use crate::state::AppState;
use crate::upload::UploadSummary;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/v1/facilities",
        get(list_facilities)
            .post(upload_facilities)
            .put(update_facilities),
    )
}

/// Outcome of a facility update batch.
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct UpdateSummary {
    pub updated: usize,
    /// Updates the registry did not apply.
    pub failed: Vec<FailedUpdate>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FailedUpdate {
    /// Position in the request array.
    pub index: usize,
    pub osid: String,
}

/// POST /v1/facilities — Register facilities from a CSV upload.
#[utoipa::path(
    post,
    path = "/v1/facilities",
    request_body(content = String, content_type = "multipart/form-data", description = "CSV file in field `file`"),
    responses(
        (status = 200, description = "Upload processed", body = UploadSummary),
        (status = 400, description = "Malformed upload", body = ErrorBody),
        (status = 401, description = "Missing bearer token", body = ErrorBody),
        (status = 503, description = "Registry not configured", body = ErrorBody),
    ),
    tag = "facilities"
)]
pub async fn upload_facilities(
    State(state): State<AppState>,
    token: BearerToken,
    multipart: Multipart,
) -> Result<Json<UploadSummary>, AppError> {
    super::bulk_create::<Facility>(&state, &token, multipart).await
}

/// PUT /v1/facilities — Update existing facilities.
#[utoipa::path(
    put,
    path = "/v1/facilities",
    request_body = Vec<FacilityUpdate>,
    responses(
        (status = 200, description = "Batch forwarded", body = UpdateSummary),
        (status = 400, description = "Malformed JSON", body = ErrorBody),
        (status = 401, description = "Missing bearer token", body = ErrorBody),
        (status = 422, description = "One or more facilities invalid", body = ErrorBody),
        (status = 503, description = "Registry not configured", body = ErrorBody),
    ),
    tag = "facilities"
)]
pub async fn update_facilities(
    State(state): State<AppState>,
    token: BearerToken,
    body: Bytes,
) -> Result<Json<UpdateSummary>, AppError> {
    let updates: Vec<FacilityUpdate> = portal_core::decode(&body)?;

    let mut violations = ValidationViolations::new();
    for (i, update) in updates.iter().enumerate() {
        violations.absorb(&FieldPath::index(i), update.facility.violations());
    }
    violations.into_result(<Facility as Schema>::ENTITY)?;

    let attributes = updates
        .iter()
        .map(portal_core::to_attributes)
        .collect::<Result<Vec<AttributeMap>, _>>()?;

    let registry = super::require_registry(&state)?;
    let mut summary = UpdateSummary::default();
    for (i, (update, attrs)) in updates.iter().zip(&attributes).enumerate() {
        match registry
            .update_record(Facility::ENTITY_TYPE, attrs, token.as_str())
            .await
        {
            Ok(_) => summary.updated += 1,
            Err(e) => {
                tracing::error!(index = i, osid = %update.osid, error = %e, "facility update failed");
                summary.failed.push(FailedUpdate {
                    index: i,
                    osid: update.osid.clone(),
                });
            }
        }
    }

    state.metrics.record_rejected(summary.failed.len());
    tracing::info!(
        updated = summary.updated,
        failed = summary.failed.len(),
        "facility updates forwarded"
    );
    Ok(Json(summary))
}

/// GET /v1/facilities — Search facilities. Query parameters filter by
/// exact field value.
#[utoipa::path(
    get,
    path = "/v1/facilities",
    responses(
        (status = 200, description = "Matching facilities"),
        (status = 401, description = "Missing bearer token", body = ErrorBody),
        (status = 502, description = "Registry error", body = ErrorBody),
        (status = 503, description = "Registry not configured", body = ErrorBody),
    ),
    tag = "facilities"
)]
pub async fn list_facilities(
    State(state): State<AppState>,
    token: BearerToken,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<Json<Vec<AttributeMap>>, AppError> {
    super::search::<Facility>(&state, &token, params).await
}
