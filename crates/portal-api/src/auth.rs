//! # Bearer Token Pass-Through
//!
//! The portal does not authenticate callers itself. The identity provider
//! issues tokens and the registry checks them; this service only requires
//! that an `Authorization: Bearer <token>` header is present and forwards the
//! token unchanged on every registry call.
//!
//! Handlers take a [`BearerToken`] argument. A request without one is
//! rejected with 401 before the handler runs.

use axum::http::header;
use axum::http::request::Parts;
use zeroize::Zeroizing;

use crate::error::AppError;

/// The caller's bearer token, opaque to this service.
///
/// The backing buffer is zeroed on drop, and `Debug` never prints it.
#[derive(Clone)]
pub struct BearerToken(Zeroizing<String>);

impl BearerToken {
    pub fn new(token: String) -> Self {
        Self(Zeroizing::new(token))
    }

    /// The raw token, for forwarding.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Parse an `Authorization` header value. The scheme is matched
    /// case-insensitively; the token itself is kept verbatim.
    pub fn from_header(value: &str) -> Option<Self> {
        let (scheme, token) = value.split_once(' ')?;
        let token = token.trim();
        if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
            Some(Self::new(token.to_string()))
        } else {
            None
        }
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken([REDACTED])")
    }
}

#[axum::async_trait]
impl<S: Send + Sync> axum::extract::FromRequestParts<S> for BearerToken {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("missing Authorization header".into()))?;
        let value = value
            .to_str()
            .map_err(|_| AppError::Unauthorized("Authorization header is not valid text".into()))?;
        Self::from_header(value)
            .ok_or_else(|| AppError::Unauthorized("expected a Bearer token".into()))
    }
}
