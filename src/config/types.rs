use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for urlsweep
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Fetch behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Maximum number of requests in flight at once
    #[serde(rename = "concurrency-limit", default = "default_concurrency_limit")]
    pub concurrency_limit: u32,

    /// Per-request deadline in seconds, covering connect, TLS, and body read
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Whether to decode 200-response bodies as JSON and persist them
    #[serde(rename = "capture-payload", default)]
    pub capture_payload: bool,

    /// User agent sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSONL results file
    #[serde(rename = "results-path", default = "default_results_path")]
    pub results_path: String,

    /// Whether non-success records are written to the sink or only counted.
    /// When unset, defaults to true unless payload capture is enabled.
    #[serde(rename = "persist-failures")]
    pub persist_failures: Option<bool>,
}

fn default_concurrency_limit() -> u32 {
    5
}

fn default_request_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("urlsweep/{}", env!("CARGO_PKG_VERSION"))
}

fn default_results_path() -> String {
    "./results.jsonl".to_string()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: default_concurrency_limit(),
            request_timeout_secs: default_request_timeout(),
            capture_payload: false,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_path: default_results_path(),
            persist_failures: None,
        }
    }
}

impl FetchConfig {
    /// Returns the per-request deadline as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Config {
    /// Resolves the persist-failures policy
    ///
    /// An explicit setting wins. Otherwise the basic variant persists
    /// everything, while the payload-capture variant persists only
    /// successes.
    pub fn persist_failures(&self) -> bool {
        self.output
            .persist_failures
            .unwrap_or(!self.fetch.capture_payload)
    }
}
