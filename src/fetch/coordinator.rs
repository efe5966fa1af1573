//! Batch coordinator - fan-out and streaming collection
//!
//! This module orchestrates fetching an entire URL sequence:
//! - Launches one fetch task per URL (admission is throttled by the rate
//!   limiter, not by delaying launch)
//! - Streams completed records to the sink in completion order
//! - Produces the aggregate batch summary

use crate::config::Config;
use crate::fetch::limiter::RateLimiter;
use crate::fetch::worker::{build_http_client, fetch_with_admission};
use crate::record::{BatchSummary, FetchRecord};
use crate::sink::{JsonlSink, ResultSink, SinkError};
use crate::{Result, SweepError};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// Completed-count milestone for progress logging
const PROGRESS_INTERVAL: u64 = 100;

/// Fetches every URL in the sequence and writes results to the configured
/// JSONL destination
///
/// An empty sequence short-circuits: no sink is opened, no file is created,
/// and the summary is all zeroes.
///
/// # Arguments
///
/// * `config` - The sweep configuration
/// * `urls` - The URLs to fetch (blank entries already filtered by the caller)
///
/// # Returns
///
/// * `Ok(BatchSummary)` - All work completed and all records were forwarded
/// * `Err(SweepError)` - The sink could not be opened or a write failed
pub async fn run_batch(config: &Config, urls: Vec<String>) -> Result<BatchSummary> {
    if urls.is_empty() {
        tracing::info!("No URLs to fetch");
        return Ok(BatchSummary::new());
    }

    let mut sink = JsonlSink::create(
        Path::new(&config.output.results_path),
        config.persist_failures(),
        config.fetch.capture_payload,
    )?;

    let summary = run_batch_with_sink(config, urls, &mut sink).await?;

    tracing::info!(
        "Results saved to {} ({} records written)",
        config.output.results_path,
        sink.records_written()
    );

    Ok(summary)
}

/// Fetches every URL in the sequence, streaming records into the given sink
///
/// Workers send completed records over a channel; this function is the
/// channel's only consumer and the sink's only writer. Individual fetch
/// failures never abort the batch - a `status_code = 0` record is treated
/// exactly like any other completed record. A sink write failure is fatal:
/// in-flight workers are drained but no further writes are attempted.
pub async fn run_batch_with_sink<S: ResultSink>(
    config: &Config,
    urls: Vec<String>,
    sink: &mut S,
) -> Result<BatchSummary> {
    if urls.is_empty() {
        return Ok(BatchSummary::new());
    }

    let total = urls.len() as u64;
    let capture_payload = config.fetch.capture_payload;

    let client = build_http_client(&config.fetch)?;
    let limiter = Arc::new(RateLimiter::new(config.fetch.concurrency_limit));

    tracing::info!(
        "Fetching {} URLs with concurrency limit {}",
        total,
        limiter.capacity()
    );

    // Launch everything up front; the limiter gates actual admission.
    // Senders never hold an admission slot while blocked on a full channel.
    let (tx, mut rx) = mpsc::channel::<FetchRecord>(config.fetch.concurrency_limit as usize);
    let mut tasks = JoinSet::new();

    for url in urls {
        let client = client.clone();
        let limiter = Arc::clone(&limiter);
        let tx = tx.clone();

        tasks.spawn(async move {
            let record = fetch_with_admission(&limiter, &client, url, capture_payload).await;
            // The receiver only disappears if the coordinator is gone
            let _ = tx.send(record).await;
        });
    }
    drop(tx);

    let mut summary = BatchSummary::new();
    let mut write_error: Option<SinkError> = None;

    while let Some(record) = rx.recv().await {
        summary.record(record.is_success(capture_payload));

        if write_error.is_none() {
            if let Err(e) = sink.write(&record) {
                tracing::error!("Sink write failed, draining in-flight fetches: {}", e);
                write_error = Some(e);
            }
        }

        if summary.total % PROGRESS_INTERVAL == 0 {
            tracing::info!(
                "Processed {}/{} URLs, {} successful",
                summary.total,
                total,
                summary.succeeded
            );
        }
    }

    // All senders are gone; reap the tasks themselves
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            tracing::error!("Fetch task failed to join: {}", e);
        }
    }

    if let Some(e) = write_error {
        return Err(SweepError::Sink(e));
    }

    sink.finish()?;

    tracing::info!(
        "Processed {} URLs, {} successful, {} failed",
        summary.total,
        summary.succeeded,
        summary.failed
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::SinkResult;

    /// Records every write; used to observe coordinator behavior without a
    /// filesystem destination
    struct MemorySink {
        records: Vec<FetchRecord>,
        finished: bool,
    }

    impl MemorySink {
        fn new() -> Self {
            Self {
                records: Vec::new(),
                finished: false,
            }
        }
    }

    impl ResultSink for MemorySink {
        fn write(&mut self, record: &FetchRecord) -> SinkResult<()> {
            self.records.push(record.clone());
            Ok(())
        }

        fn finish(&mut self) -> SinkResult<()> {
            self.finished = true;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_empty_input_yields_zero_summary() {
        let config = Config::default();
        let mut sink = MemorySink::new();

        let summary = run_batch_with_sink(&config, vec![], &mut sink)
            .await
            .unwrap();

        assert_eq!(summary, BatchSummary::new());
        assert!(sink.records.is_empty());
        assert!(!sink.finished, "sink should not be touched for empty input");
    }

    #[tokio::test]
    async fn test_empty_input_does_not_create_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.jsonl");

        let mut config = Config::default();
        config.output.results_path = path.to_string_lossy().into_owned();

        let summary = run_batch(&config, vec![]).await.unwrap();

        assert_eq!(summary.total, 0);
        assert!(!path.exists());
    }

    // Fetch behavior against live sockets (success/error/timeout scenarios,
    // concurrency bound, sink write failure) is covered by the wiremock
    // tests in tests/fetch_tests.rs
}
