//! Result record types
//!
//! This module defines the per-URL result record, the failure taxonomy used
//! for diagnostics, and the aggregate batch summary.

use serde::Serialize;
use std::fmt;

/// The atomic unit of output: one record per fetched URL
///
/// A record is created exactly once per URL by its fetch worker, handed to
/// the sink exactly once, and never mutated after creation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FetchRecord {
    /// The originating URL
    pub url: String,

    /// HTTP status code; 0 means no HTTP status was obtained
    pub status_code: u16,

    /// Decoded payload, present only when payload capture was requested,
    /// the status was 200, and the body decoded as JSON
    #[serde(rename = "content", skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

impl FetchRecord {
    /// Creates a record for a fetch that produced no HTTP status
    /// (timeout, connection failure, malformed URL, unclassified error)
    pub fn no_response(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status_code: 0,
            body: None,
        }
    }

    /// Creates a record for a response received without a captured payload
    pub fn with_status(url: impl Into<String>, status_code: u16) -> Self {
        Self {
            url: url.into(),
            status_code,
            body: None,
        }
    }

    /// Creates a record for a 200 response with a decoded payload
    pub fn with_payload(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            url: url.into(),
            status_code: 200,
            body: Some(body),
        }
    }

    /// Returns true if this record counts as a success
    ///
    /// Success requires status 200, and additionally a decoded payload when
    /// payload capture is enabled.
    pub fn is_success(&self, capture_payload: bool) -> bool {
        self.status_code == 200 && (!capture_payload || self.body.is_some())
    }
}

/// Per-fetch failure taxonomy
///
/// Used only for diagnostic events; every variant is resolved locally into a
/// record and never propagated past the worker boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Request exceeded the per-request deadline
    Timeout,

    /// Transport-level failure (refused, reset, DNS, TLS)
    Connection,

    /// The URL is structurally unusable by the HTTP client
    InvalidTarget,

    /// A response was received; the status code itself carries the meaning
    ServerError(u16),

    /// Response received with success status but the body did not decode
    PayloadDecode,

    /// Any other error, logged with its cause for diagnosis
    Unclassified,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "timeout"),
            Self::Connection => write!(f, "connection error"),
            Self::InvalidTarget => write!(f, "invalid URL"),
            Self::ServerError(code) => write!(f, "HTTP {}", code),
            Self::PayloadDecode => write!(f, "payload decode failure"),
            Self::Unclassified => write!(f, "unclassified error"),
        }
    }
}

/// Aggregate counters produced after all work completes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Count of URLs submitted
    pub total: u64,

    /// Count of successful fetches
    pub succeeded: u64,

    /// Count of everything else (total - succeeded)
    pub failed: u64,
}

impl BatchSummary {
    /// Creates a new empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one completed record
    pub fn record(&mut self, success: bool) {
        self.total += 1;
        if success {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Returns the success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.succeeded as f64 / self.total as f64) * 100.0
    }
}
