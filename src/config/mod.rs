pub mod types;

use std::path::Path;

use crate::error::{HotelError, Result};
use types::{Config, RetryConfig};

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        HotelError::Config(format!(
            "failed to read config file {}: {e}",
            path.display()
        ))
    })?;
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yml::from_str(&content)?;
    validate_urls(&config)?;
    validate_retry(&config.retry)?;
    Ok(config)
}

fn validate_retry(retry: &RetryConfig) -> Result<()> {
    if !retry.backoff_base.is_finite() || retry.backoff_base <= 0.0 {
        return Err(HotelError::Config(format!(
            "retry.backoff_base must be a positive number, got {}",
            retry.backoff_base
        )));
    }
    Ok(())
}

/// Both endpoints must be absolute URLs.
fn validate_urls(config: &Config) -> Result<()> {
    url::Url::parse(&config.api.base_url)?;
    url::Url::parse(&config.api.auth_url)?;
    Ok(())
}
