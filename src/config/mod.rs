//! Configuration module
//!
//! Handles loading, parsing, and validating the TOML configuration file,
//! including computing a content hash for change detection.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{Config, FetchConfig, OutputConfig};
pub use validation::validate;
