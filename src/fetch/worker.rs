//! Fetch worker
//!
//! This module performs one HTTP GET per URL and classifies the outcome into
//! a result record. All failure paths terminate in a record with
//! `status_code = 0`; nothing is ever propagated out of the worker as an
//! error.

use crate::config::FetchConfig;
use crate::fetch::limiter::RateLimiter;
use crate::record::{FailureKind, FetchRecord};
use reqwest::Client;

/// Builds the shared HTTP client
///
/// The per-request deadline is built into the client and covers connection,
/// TLS, and the full response body read.
///
/// # Arguments
///
/// * `config` - The fetch configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.request_timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Runs one complete unit of work: admit, fetch, classify, release
///
/// The admission slot is held for the duration of the HTTP exchange and
/// released before the record is returned, on every exit path.
pub async fn fetch_with_admission(
    limiter: &RateLimiter,
    client: &Client,
    url: String,
    capture_payload: bool,
) -> FetchRecord {
    let slot = limiter.acquire().await;
    let record = fetch_one(client, &url, capture_payload).await;
    drop(slot);
    record
}

/// Fetches a single URL and classifies the outcome
///
/// # Classification
///
/// | Condition | Record |
/// |-----------|--------|
/// | Deadline exceeded | `status_code = 0` |
/// | Connection failure (refused, DNS, reset, TLS) | `status_code = 0` |
/// | Structurally unusable URL | `status_code = 0` |
/// | Response received | the server's status code |
/// | 200 + capture + body decodes as JSON | status 200 with payload |
/// | 200 + capture + decode failure | status 200, no payload |
/// | Any other error | `status_code = 0` |
///
/// Every non-200 classification emits one warn-level diagnostic event.
pub async fn fetch_one(client: &Client, url: &str, capture_payload: bool) -> FetchRecord {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status().as_u16();

            if status != 200 {
                tracing::warn!("{} for {}", FailureKind::ServerError(status), url);
                return FetchRecord::with_status(url, status);
            }

            if !capture_payload {
                return FetchRecord::with_status(url, status);
            }

            // Body read and decode happen under the same client deadline.
            // A body that fails to decode downgrades to "no payload" without
            // downgrading the status: the HTTP exchange itself succeeded.
            match response.json::<serde_json::Value>().await {
                Ok(value) => FetchRecord::with_payload(url, value),
                Err(e) => {
                    tracing::warn!("{} for {}: {}", FailureKind::PayloadDecode, url, e);
                    FetchRecord::with_status(url, status)
                }
            }
        }
        Err(e) => {
            let kind = classify_error(&e);
            match kind {
                FailureKind::Unclassified => {
                    tracing::warn!("{} for {}: {}", kind, url, e);
                }
                _ => {
                    tracing::warn!("{} for {}", kind, url);
                }
            }
            FetchRecord::no_response(url)
        }
    }
}

/// Maps a transport-level error onto the failure taxonomy
fn classify_error(error: &reqwest::Error) -> FailureKind {
    if error.is_timeout() {
        FailureKind::Timeout
    } else if error.is_connect() {
        FailureKind::Connection
    } else if error.is_builder() {
        FailureKind::InvalidTarget
    } else {
        FailureKind::Unclassified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let config = FetchConfig::default();
        let client = build_http_client(&config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_build_http_client_custom_timeout() {
        let mut config = FetchConfig::default();
        config.request_timeout_secs = 1;
        assert!(build_http_client(&config).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_url_yields_status_zero() {
        let client = build_http_client(&FetchConfig::default()).unwrap();
        let record = fetch_one(&client, "not a url", false).await;

        assert_eq!(record.status_code, 0);
        assert!(record.body.is_none());
    }

    // Response classification against live sockets is covered by the
    // wiremock tests in tests/fetch_tests.rs
}
