//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps codec, validation, and registry errors to HTTP status codes with a
//! JSON body of error code, message, and optional details.
//!
//! | Source | Status | Code |
//! |--------|--------|------|
//! | Malformed request bytes | 400 | `BAD_REQUEST` |
//! | Missing bearer token | 401 | `UNAUTHORIZED` |
//! | Record violations | 422 | `VALIDATION_ERROR` |
//! | Registry failure | 502 | `UPSTREAM_ERROR` |
//! | Registry not configured | 503 | `SERVICE_UNAVAILABLE` |
//!
//! Internal and upstream messages are logged, never returned to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use portal_core::CodecError;
use portal_registry_client::RegistryError;
use portal_schema::CompositeValidationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "BAD_REQUEST", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// For `VALIDATION_ERROR`, the violation list: `[{path, reason, message}]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Missing or malformed bearer token (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The record has one or more violations (422).
    #[error("{0}")]
    InvalidRecord(#[from] CompositeValidationError),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),

    /// Registry call failed (502). Message is logged but not returned to client.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Registry client not configured (503).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::InvalidRecord(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            Self::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
        }
    }

    /// Construct an upstream error (502).
    pub fn upstream(msg: String) -> Self {
        Self::Upstream(msg)
    }

    /// Construct a service unavailable error (503).
    pub fn service_unavailable(msg: &str) -> Self {
        Self::ServiceUnavailable(msg.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            Self::Upstream(_) => "An upstream service error occurred".to_string(),
            Self::InvalidRecord(err) => format!(
                "{} has {} invalid field(s)",
                err.entity(),
                err.violations().len()
            ),
            other => other.to_string(),
        };

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::Upstream(_) => tracing::error!(error = %self, "registry error"),
            Self::ServiceUnavailable(_) => tracing::warn!(error = %self, "service unavailable"),
            _ => {}
        }

        let details = match &self {
            Self::InvalidRecord(err) => serde_json::to_value(err.violations()).ok(),
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Decode failures are the client's fault; encode failures are ours.
impl From<CodecError> for AppError {
    fn from(err: CodecError) -> Self {
        if err.is_decode() {
            Self::BadRequest(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        Self::upstream(err.to_string())
    }
}
