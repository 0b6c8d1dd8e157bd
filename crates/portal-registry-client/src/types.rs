//! Registry wire envelope.
//!
//! Every call is a POST whose body wraps the payload:
//!
//! ```json
//! {"id": "open-saber.registry.create", "ver": "1.0", "ets": "", "request": {...}}
//! ```
//!
//! and every answer carries `params.status` (`SUCCESSFUL` / `UNSUCCESSFUL`),
//! `params.errmsg`, `responseCode`, and `result`.

use portal_core::AttributeMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope version sent with every request.
pub const API_VERSION: &str = "1.0";

/// The registry operations this client issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Search,
}

impl Operation {
    /// Path segment appended to the registry base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::Create => "add",
            Self::Update => "update",
            Self::Search => "search",
        }
    }

    /// Envelope `id`.
    pub fn id(self) -> &'static str {
        match self {
            Self::Create => "open-saber.registry.create",
            Self::Update => "open-saber.registry.update",
            Self::Search => "open-saber.registry.search",
        }
    }

    /// Whether sending the request twice leaves the registry unchanged.
    /// Only search is; a repeated create registers a second record.
    pub fn is_idempotent(self) -> bool {
        matches!(self, Self::Search)
    }

    /// Label used in errors and logs, e.g. `POST /add`.
    pub fn endpoint(self) -> String {
        format!("POST /{}", self.path())
    }
}

/// Outbound request envelope.
#[derive(Debug, Serialize)]
pub struct RegistryRequest<'a, T: Serialize> {
    pub id: &'static str,
    pub ver: &'static str,
    pub ets: &'static str,
    pub request: &'a T,
}

impl<'a, T: Serialize> RegistryRequest<'a, T> {
    pub fn new(op: Operation, request: &'a T) -> Self {
        Self {
            id: op.id(),
            ver: API_VERSION,
            ets: "",
            request,
        }
    }
}

/// Search payload: one entity type plus attribute filters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub entity_type: Vec<String>,
    pub filters: AttributeMap,
}

/// Outcome flag in the response `params`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Successful,
    Unsuccessful,
    /// Forward-compatible catch-all.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseParams {
    #[serde(default)]
    pub status: Option<ResponseStatus>,
    #[serde(default)]
    pub errmsg: Option<String>,
    #[serde(default)]
    pub msgid: Option<String>,
}

/// Inbound response envelope.
///
/// Every field defaults, so older and newer registry builds both parse.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub ver: Option<String>,
    #[serde(default)]
    pub params: Option<ResponseParams>,
    #[serde(default)]
    pub response_code: Option<String>,
    #[serde(default)]
    pub result: Value,
}

impl RegistryResponse {
    /// True unless the registry explicitly reported `UNSUCCESSFUL`.
    pub fn is_successful(&self) -> bool {
        !matches!(
            self.params.as_ref().and_then(|p| p.status),
            Some(ResponseStatus::Unsuccessful)
        )
    }

    /// The registry's error message, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.params
            .as_ref()
            .and_then(|p| p.errmsg.as_deref())
            .filter(|m| !m.is_empty())
    }

    /// Identifier the registry assigned to a created record.
    ///
    /// Create results look like `{"Facility": {"osid": "1-..."}}`.
    pub fn osid(&self, entity_type: &str) -> Option<&str> {
        self.result.get(entity_type)?.get("osid")?.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_envelope_shape() {
        let mut attrs = AttributeMap::new();
        attrs.insert("Facility".into(), serde_json::json!({"facilityName": "PHC"}));
        let body = serde_json::to_value(RegistryRequest::new(Operation::Create, &attrs)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "id": "open-saber.registry.create",
                "ver": "1.0",
                "ets": "",
                "request": {"Facility": {"facilityName": "PHC"}}
            })
        );
    }

    #[test]
    fn only_search_is_idempotent() {
        assert!(Operation::Search.is_idempotent());
        assert!(!Operation::Create.is_idempotent());
        assert!(!Operation::Update.is_idempotent());
    }

    #[test]
    fn search_payload_is_camel_case() {
        let req = SearchRequest {
            entity_type: vec!["Program".into()],
            filters: AttributeMap::new(),
        };
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body, serde_json::json!({"entityType": ["Program"], "filters": {}}));
    }

    #[test]
    fn unsuccessful_status_is_detected() {
        let resp: RegistryResponse = serde_json::from_value(serde_json::json!({
            "params": {"status": "UNSUCCESSFUL", "errmsg": "duplicate"},
            "responseCode": "OK",
            "result": null
        }))
        .unwrap();
        assert!(!resp.is_successful());
        assert_eq!(resp.error_message(), Some("duplicate"));
    }

    #[test]
    fn missing_params_counts_as_success() {
        let resp: RegistryResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(resp.is_successful());
        assert_eq!(resp.error_message(), None);
    }

    #[test]
    fn unknown_status_is_tolerated() {
        let resp: RegistryResponse =
            serde_json::from_value(serde_json::json!({"params": {"status": "PENDING"}})).unwrap();
        assert_eq!(resp.params.unwrap().status, Some(ResponseStatus::Unknown));
    }

    #[test]
    fn osid_is_read_from_result() {
        let resp: RegistryResponse = serde_json::from_value(serde_json::json!({
            "result": {"Facility": {"osid": "1-abc"}}
        }))
        .unwrap();
        assert_eq!(resp.osid("Facility"), Some("1-abc"));
        assert_eq!(resp.osid("Program"), None);
    }
}
