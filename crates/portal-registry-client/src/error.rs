//! Registry client error types.

/// Errors from registry calls.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Registry returned a non-2xx status.
    #[error("registry {endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Registry answered 2xx but reported the operation as unsuccessful.
    #[error("registry {endpoint} rejected the request ({response_code}): {message}")]
    Rejected {
        endpoint: String,
        response_code: String,
        message: String,
    },
    /// Response body was not a registry envelope.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The envelope's `result` did not have the expected shape.
    #[error("unexpected result from {endpoint}: {source}")]
    Payload {
        endpoint: String,
        source: serde_json::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}
