//! Fetch module
//!
//! This module contains the concurrency core:
//! - `limiter`: the admission gate bounding in-flight requests
//! - `worker`: one HTTP GET per URL, classified into a result record
//! - `coordinator`: fan-out, streaming collection, and the batch summary

pub mod coordinator;
pub mod limiter;
pub mod worker;

pub use coordinator::{run_batch, run_batch_with_sink};
pub use limiter::{AdmissionSlot, RateLimiter};
pub use worker::{build_http_client, fetch_one, fetch_with_admission};
