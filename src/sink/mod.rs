//! Result sink module
//!
//! This module handles streaming persistence of result records:
//! - The `ResultSink` trait that the batch coordinator writes through
//! - The JSONL file sink (one self-contained record per line)

mod jsonl;
mod traits;

pub use jsonl::JsonlSink;
pub use traits::{ResultSink, SinkError, SinkResult};
