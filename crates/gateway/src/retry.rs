//! Retry with exponential backoff for gateway HTTP calls.
//!
//! Retries only transient transport errors (connection failures,
//! timeouts). Responses with a non-success status are returned to the
//! caller untouched and never retried here.

use std::time::Duration;

/// Base delay between retries (doubles each attempt: 200ms, 400ms, ...).
const BASE_DELAY_MS: u64 = 200;

/// Sends an HTTP request with up to `max_retries` backoff retries on
/// transport errors, then one final attempt.
///
/// The closure `f` builds and sends a fresh request per attempt and is
/// called at most `max_retries + 1` times.
pub(crate) async fn retry_send<F, Fut>(max_retries: u32, f: F) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    for attempt in 0..max_retries {
        match f().await {
            Ok(resp) => return Ok(resp),
            Err(e) => {
                let delay = Duration::from_millis(BASE_DELAY_MS * 2u64.pow(attempt));
                tracing::warn!(
                    attempt = attempt + 1,
                    max_retries,
                    "gateway request failed, retrying in {delay:?}: {e}"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
    // Final attempt, no more retries.
    f().await
}
