//! # portal-api — Binary Entry Point
//!
//! Starts the Axum HTTP server. Binds to `PORT` (default 8080).

use portal_api::state::{AppConfig, AppState, LogFormat};
use portal_registry_client::{RegistryClient, RegistryConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    // An unparseable REGISTRY_URL is a deployment mistake: refuse to start.
    let registry_config = RegistryConfig::from_env().map_err(|e| {
        tracing::error!("Invalid registry configuration: {e}");
        e
    })?;

    let registry = match RegistryClient::new(registry_config) {
        Ok(client) => {
            tracing::info!(registry = %client.base_url(), "registry client configured");
            Some(client)
        }
        Err(e) => {
            tracing::warn!("Registry client unavailable: {e}. Registry-backed endpoints will return 503.");
            None
        }
    };

    let port = config.port;
    let app = portal_api::app(AppState::with_config(config, registry));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("portal API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
