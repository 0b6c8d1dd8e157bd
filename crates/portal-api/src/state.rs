//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers via
//! the `State` extractor. The portal keeps no records of its own: every
//! record lives in the registry and is reached through `registry`.

use portal_registry_client::RegistryClient;

use crate::middleware::metrics::ApiMetrics;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// `json` (any case) selects JSON; anything else is text.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PORT` (default: 8080)
    /// - `LOG_FORMAT` (`json` or text, default: text)
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            log_format: std::env::var("LOG_FORMAT")
                .map(|raw| LogFormat::parse(&raw))
                .unwrap_or_default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            log_format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    /// `None` when the registry is not configured; registry-backed routes
    /// then answer 503.
    pub registry: Option<RegistryClient>,
    pub metrics: ApiMetrics,
}

impl AppState {
    /// Create a new application state with default configuration and no registry client.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), None)
    }

    pub fn with_config(config: AppConfig, registry: Option<RegistryClient>) -> Self {
        Self {
            config,
            registry,
            metrics: ApiMetrics::new(),
        }
    }

    /// Create state with a registry client and default configuration.
    pub fn with_registry(registry: RegistryClient) -> Self {
        Self::with_config(AppConfig::default(), Some(registry))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
