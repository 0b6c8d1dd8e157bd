//! # portal-api — Axum API for the Health Registry Portal
//!
//! A thin dispatch layer: every route decodes its request, validates the
//! record with `portal-schema`, and forwards it to the registry through
//! `portal-registry-client` with the caller's bearer token.
//!
//! ## API Surface
//!
//! | Prefix | Module | Records |
//! |--------|--------|---------|
//! | `/v1/facilities` | [`routes::facilities`] | Facility (CSV upload, JSON update, search) |
//! | `/v1/vaccinators` | [`routes::vaccinators`] | Vaccinator (CSV upload, search) |
//! | `/v1/enrollments` | [`routes::enrollments`] | Enrollment (CSV upload, search) |
//! | `/v1/programs` | [`routes::programs`] | Program (JSON create, search) |
//! | `/v1/medicines` | [`routes::medicines`] | Medicine (JSON create, search) |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler (BearerToken extractor)
//! ```

pub mod auth;
pub mod error;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod upload;

use axum::middleware::from_fn;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`) are mounted outside the middleware stack and
/// need no token.
pub fn app(state: AppState) -> Router {
    let metrics = state.metrics.clone();

    let api = Router::new()
        .merge(routes::router())
        .merge(openapi::router())
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(axum::Extension(metrics))
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — returns 200 when the application is ready to serve.
async fn readiness() -> &'static str {
    "ready"
}
