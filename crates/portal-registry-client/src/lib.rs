//! # portal-registry-client — Typed Registry Client
//!
//! Forwards validated records to the upstream health registry and queries
//! it by entity type.
//!
//! | Operation | Path | Envelope `id` |
//! |-----------|------|---------------|
//! | [`RegistryClient::create_record`] | `POST {base}/add` | `open-saber.registry.create` |
//! | [`RegistryClient::update_record`] | `POST {base}/update` | `open-saber.registry.update` |
//! | [`RegistryClient::search`] | `POST {base}/search` | `open-saber.registry.search` |
//!
//! ## Crate Policy
//!
//! - The caller's bearer token is forwarded per request and never inspected
//!   or stored.
//! - Searches are retried with backoff on transport failures. Creates and
//!   updates are retried only when the connection was never established,
//!   so a record is never submitted twice. Registry answers of any status
//!   are returned as-is.
//! - No validation happens here. Callers hand over records that already
//!   passed `portal-schema`.

pub mod config;
pub mod error;
pub(crate) mod retry;
pub mod types;

pub use config::RegistryConfig;
pub use error::RegistryError;
pub use types::{Operation, RegistryResponse};

use std::time::Duration;

use portal_core::AttributeMap;
use serde::Serialize;

use types::{RegistryRequest, SearchRequest};

/// Client for the registry service. Cheap to clone; clones share one
/// connection pool.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
    config: RegistryConfig,
}

impl RegistryClient {
    /// Create a new registry client from configuration.
    pub fn new(config: RegistryConfig) -> Result<Self, RegistryError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RegistryError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;
        Ok(Self { http, config })
    }

    /// Base URL of the registry.
    pub fn base_url(&self) -> &url::Url {
        &self.config.base_url
    }

    /// Create a record of `entity_type`.
    ///
    /// Calls `POST {base}/add` with `request = {entity_type: attributes}`.
    pub async fn create_record(
        &self,
        entity_type: &str,
        attributes: &AttributeMap,
        token: &str,
    ) -> Result<RegistryResponse, RegistryError> {
        let payload = wrap(entity_type, attributes);
        self.call(Operation::Create, &payload, token).await
    }

    /// Update an existing record. `attributes` must carry the record's `osid`.
    ///
    /// Calls `POST {base}/update` with `request = {entity_type: attributes}`.
    pub async fn update_record(
        &self,
        entity_type: &str,
        attributes: &AttributeMap,
        token: &str,
    ) -> Result<RegistryResponse, RegistryError> {
        let payload = wrap(entity_type, attributes);
        self.call(Operation::Update, &payload, token).await
    }

    /// Every record of `entity_type` matching `filters`.
    ///
    /// Calls `POST {base}/search`. The registry answers with
    /// `result = {entity_type: [record, ...]}`; a missing key means no
    /// matches.
    pub async fn search(
        &self,
        entity_type: &str,
        filters: AttributeMap,
        token: &str,
    ) -> Result<Vec<AttributeMap>, RegistryError> {
        let payload = SearchRequest {
            entity_type: vec![entity_type.to_string()],
            filters,
        };
        let resp = self.call(Operation::Search, &payload, token).await?;

        match resp.result.get(entity_type) {
            None => Ok(Vec::new()),
            Some(records) => serde_json::from_value(records.clone()).map_err(|e| {
                RegistryError::Payload {
                    endpoint: Operation::Search.endpoint(),
                    source: e,
                }
            }),
        }
    }

    async fn call<T: Serialize>(
        &self,
        op: Operation,
        payload: &T,
        token: &str,
    ) -> Result<RegistryResponse, RegistryError> {
        let endpoint = op.endpoint();
        let url = self.config.endpoint(op.path());
        let body = RegistryRequest::new(op, payload);

        let resp = retry::retry_send(op, || {
            self.http
                .post(&url)
                .bearer_auth(token)
                .json(&body)
                .send()
        })
        .await
        .map_err(|e| RegistryError::Http {
            endpoint: endpoint.clone(),
            source: e,
        })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(RegistryError::ApiError {
                endpoint,
                status,
                body,
            });
        }

        let envelope: RegistryResponse =
            resp.json().await.map_err(|e| RegistryError::Deserialization {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if !envelope.is_successful() {
            return Err(RegistryError::Rejected {
                endpoint,
                response_code: envelope.response_code.clone().unwrap_or_default(),
                message: envelope.error_message().unwrap_or_default().to_string(),
            });
        }

        tracing::debug!(endpoint = %endpoint, response_code = ?envelope.response_code, "registry call succeeded");
        Ok(envelope)
    }
}

fn wrap(entity_type: &str, attributes: &AttributeMap) -> AttributeMap {
    let mut payload = AttributeMap::new();
    payload.insert(
        entity_type.to_string(),
        serde_json::Value::Object(attributes.clone()),
    );
    payload
}
