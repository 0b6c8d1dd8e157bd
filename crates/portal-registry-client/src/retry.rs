//! Retry with exponential backoff for registry HTTP calls.
//!
//! Whether a failed send may be repeated depends on the operation:
//!
//! | Failure | Search | Create / Update |
//! |---------|--------|-----------------|
//! | Connection never established | retried | retried |
//! | Timeout or broken connection after sending | retried | returned |
//! | Any HTTP response | returned | returned |
//!
//! Once a create or update may have reached the registry it is sent exactly
//! once: the registry might have stored it before the answer was lost.

use std::time::Duration;

use crate::types::Operation;

/// Maximum number of retry attempts after the initial request.
const MAX_RETRIES: u32 = 3;

/// Base delay between retries (doubles each attempt: 200ms, 400ms, 800ms).
const BASE_DELAY_MS: u64 = 200;

/// Whether `err` from sending `op` can be repeated without side effects.
pub(crate) fn is_retryable(op: Operation, err: &reqwest::Error) -> bool {
    if err.is_connect() {
        return true;
    }
    op.is_idempotent() && (err.is_timeout() || err.is_request())
}

/// Send a request for `op`, retrying retryable failures with exponential
/// backoff.
///
/// `f` is called at most `MAX_RETRIES + 1` times.
pub(crate) async fn retry_send<F, Fut>(
    op: Operation,
    f: F,
) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let mut attempt = 0;
    loop {
        let err = match f().await {
            Ok(resp) => return Ok(resp),
            Err(e) => e,
        };

        if attempt == MAX_RETRIES || !is_retryable(op, &err) {
            return Err(err);
        }

        let delay = Duration::from_millis(BASE_DELAY_MS * 2u64.pow(attempt));
        attempt += 1;
        tracing::warn!(
            endpoint = %op.endpoint(),
            attempt,
            max_retries = MAX_RETRIES,
            "registry request failed, retrying in {delay:?}: {err}"
        );
        tokio::time::sleep(delay).await;
    }
}
