//! JSONL file sink
//!
//! Appends one self-describing JSON object per line, UTF-8, no enclosing
//! array, so a reader can stream the file without loading it whole.

use crate::record::FetchRecord;
use crate::sink::traits::{ResultSink, SinkError, SinkResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Streaming JSONL sink over a buffered file handle
///
/// The file is created in truncate mode per run. Buffered output is flushed
/// on `finish`; the handle itself is released when the sink drops, on every
/// exit path.
pub struct JsonlSink {
    writer: BufWriter<File>,
    persist_failures: bool,
    capture_payload: bool,
    records_written: u64,
}

impl JsonlSink {
    /// Opens the destination file
    ///
    /// # Arguments
    ///
    /// * `path` - Destination file path (truncated if it exists)
    /// * `persist_failures` - Whether non-success records are written
    /// * `capture_payload` - Whether success requires a decoded payload
    ///
    /// # Returns
    ///
    /// * `Ok(JsonlSink)` - Destination opened
    /// * `Err(SinkError)` - Destination could not be opened
    pub fn create(
        path: &Path,
        persist_failures: bool,
        capture_payload: bool,
    ) -> SinkResult<Self> {
        let file = File::create(path).map_err(SinkError::Open)?;

        Ok(Self {
            writer: BufWriter::new(file),
            persist_failures,
            capture_payload,
            records_written: 0,
        })
    }

    /// Returns the number of records actually written (not skipped)
    pub fn records_written(&self) -> u64 {
        self.records_written
    }
}

impl ResultSink for JsonlSink {
    fn write(&mut self, record: &FetchRecord) -> SinkResult<()> {
        if !self.persist_failures && !record.is_success(self.capture_payload) {
            return Ok(());
        }

        let line = serde_json::to_string(record)?;
        self.writer
            .write_all(line.as_bytes())
            .map_err(SinkError::Write)?;
        self.writer.write_all(b"\n").map_err(SinkError::Write)?;

        self.records_written += 1;
        Ok(())
    }

    fn finish(&mut self) -> SinkResult<()> {
        self.writer.flush().map_err(SinkError::Write)
    }
}
