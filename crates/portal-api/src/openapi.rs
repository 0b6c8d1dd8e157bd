//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec, served
//! at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Health Registry Portal API",
        version = "0.1.0",
        description = "Registration and search of facilities, vaccinators, enrollments, programs, and medicines. Every record is validated before it is forwarded to the registry.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::facilities::upload_facilities,
        crate::routes::facilities::update_facilities,
        crate::routes::facilities::list_facilities,
        crate::routes::vaccinators::upload_vaccinators,
        crate::routes::vaccinators::list_vaccinators,
        crate::routes::enrollments::upload_enrollments,
        crate::routes::enrollments::list_enrollments,
        crate::routes::programs::create_program,
        crate::routes::programs::list_programs,
        crate::routes::medicines::create_medicine,
        crate::routes::medicines::list_medicines,
    ),
    components(schemas(
        // Records
        portal_schema::Facility,
        portal_schema::FacilityAdmin,
        portal_schema::FacilityProgram,
        portal_schema::FacilityUpdate,
        portal_schema::Address,
        portal_schema::Vaccinator,
        portal_schema::VaccinatorProgram,
        portal_schema::Enrollment,
        portal_schema::Program,
        portal_schema::Medicine,
        portal_schema::Schedule,
        // Responses
        crate::routes::CreatedRecord,
        crate::routes::facilities::UpdateSummary,
        crate::routes::facilities::FailedUpdate,
        crate::upload::UploadSummary,
        crate::upload::RejectedRow,
        // Error types
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "facilities", description = "Vaccination facilities"),
        (name = "vaccinators", description = "Certified vaccinators"),
        (name = "enrollments", description = "Pre-enrolled recipients"),
        (name = "programs", description = "Vaccination programs"),
        (name = "medicines", description = "Medicines and dose schedules"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
