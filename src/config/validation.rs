use crate::config::types::{Config, FetchConfig, OutputConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetch_config(&config.fetch)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.concurrency_limit < 1 || config.concurrency_limit > 100 {
        return Err(ConfigError::Validation(format!(
            "concurrency_limit must be between 1 and 100, got {}",
            config.concurrency_limit
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.results_path.is_empty() {
        return Err(ConfigError::Validation(
            "results_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
