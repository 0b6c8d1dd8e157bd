//! # Route Modules
//!
//! Every route follows the same pipeline: decode the request, validate the
//! record, then forward it to the registry with the caller's token.
//!
//! | Prefix | Module | Create | Read |
//! |--------|--------|--------|------|
//! | `/v1/facilities` | [`facilities`] | CSV upload, JSON update | search |
//! | `/v1/vaccinators` | [`vaccinators`] | CSV upload | search |
//! | `/v1/enrollments` | [`enrollments`] | CSV upload | search |
//! | `/v1/programs` | [`programs`] | JSON | search |
//! | `/v1/medicines` | [`medicines`] | JSON | search |

pub mod enrollments;
pub mod facilities;
pub mod medicines;
pub mod programs;
pub mod vaccinators;

use std::collections::BTreeMap;

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::{Json, Router};
use portal_core::{AttributeMap, RegistryRecord};
use portal_registry_client::RegistryClient;
use portal_schema::{FromRow, Schema, Validate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::BearerToken;
use crate::error::AppError;
use crate::state::AppState;
use crate::upload::{self, UploadSummary};

/// Build the router for every record route.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(facilities::router())
        .merge(vaccinators::router())
        .merge(enrollments::router())
        .merge(programs::router())
        .merge(medicines::router())
}

/// Response to a successful create.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRecord {
    pub entity_type: String,
    /// Registry identifier of the new record, when the registry returns one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osid: Option<String>,
}

/// Helper: extract the registry client from AppState or return 503.
pub(crate) fn require_registry(state: &AppState) -> Result<&RegistryClient, AppError> {
    state.registry.as_ref().ok_or_else(|| {
        AppError::service_unavailable("Registry client not configured. Set REGISTRY_URL.")
    })
}

/// Query-string parameters become registry equality filters:
/// `?status=Active` → `{"status": {"eq": "Active"}}`.
pub(crate) fn equality_filters(params: BTreeMap<String, String>) -> AttributeMap {
    params
        .into_iter()
        .map(|(field, value)| (field, serde_json::json!({ "eq": value })))
        .collect()
}

/// Search the registry for records of type `R`.
pub(crate) async fn search<R: RegistryRecord>(
    state: &AppState,
    token: &BearerToken,
    params: BTreeMap<String, String>,
) -> Result<Json<Vec<AttributeMap>>, AppError> {
    let registry = require_registry(state)?;
    let records = registry
        .search(R::ENTITY_TYPE, equality_filters(params), token.as_str())
        .await?;
    Ok(Json(records))
}

/// Decode a JSON record, validate it, and create it in the registry.
pub(crate) async fn create<R>(
    state: &AppState,
    token: &BearerToken,
    body: &[u8],
) -> Result<(StatusCode, Json<CreatedRecord>), AppError>
where
    R: Schema + RegistryRecord,
{
    let record: R = portal_core::decode(body)?;
    record.validate()?;
    let attributes = portal_core::to_attributes(&record)?;

    let registry = require_registry(state)?;
    let resp = registry
        .create_record(R::ENTITY_TYPE, &attributes, token.as_str())
        .await?;

    let osid = resp.osid(R::ENTITY_TYPE).map(str::to_string);
    tracing::info!(entity = R::ENTITY_TYPE, osid = ?osid, "record created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedRecord {
            entity_type: R::ENTITY_TYPE.to_string(),
            osid,
        }),
    ))
}

/// Register every row of an uploaded CSV file as an `R`.
pub(crate) async fn bulk_create<R>(
    state: &AppState,
    token: &BearerToken,
    multipart: Multipart,
) -> Result<Json<UploadSummary>, AppError>
where
    R: FromRow + Schema + RegistryRecord,
{
    let bytes = upload::read_file(multipart).await?;
    let rows = upload::parse_rows(&bytes)?;
    let registry = require_registry(state)?;
    let summary = upload::register_rows::<R>(registry, token, &state.metrics, rows).await;
    Ok(Json(summary))
}
