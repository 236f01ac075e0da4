//! Client configuration from the environment.
//!
//! Only the service URL is required; everything else has a default.
//! The status re-fetch delay exists because status changes propagate
//! through an external pipeline with eventual-consistency lag; it is
//! deliberately configuration, not business logic.

use std::env;
use std::time::Duration;

use thiserror::Error;

pub const API_URL_VAR: &str = "MEDREV_API_URL";
pub const TIMEOUT_MS_VAR: &str = "MEDREV_TIMEOUT_MS";
pub const STATUS_REFETCH_MS_VAR: &str = "MEDREV_STATUS_REFETCH_MS";

const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_STATUS_REFETCH_MS: u64 = 2_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{var} must be a number of milliseconds, got {value}")]
    InvalidDuration { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the pharmacy administration service.
    pub api_url: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Wait before re-fetching a medicine after a status change.
    pub status_refetch_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            status_refetch_delay: Duration::from_millis(DEFAULT_STATUS_REFETCH_MS),
        }
    }
}

impl ClientConfig {
    /// Read configuration from the environment. `MEDREV_API_URL` is
    /// required; durations fall back to their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: env::var(API_URL_VAR).map_err(|_| ConfigError::Missing(API_URL_VAR))?,
            request_timeout: duration_var(TIMEOUT_MS_VAR, DEFAULT_TIMEOUT_MS)?,
            status_refetch_delay: duration_var(STATUS_REFETCH_MS_VAR, DEFAULT_STATUS_REFETCH_MS)?,
        })
    }

    /// Same as `from_env`, but an explicit URL (a CLI flag) takes
    /// precedence over the environment.
    pub fn from_env_with_url(url: Option<String>) -> Result<Self, ConfigError> {
        match url {
            Some(api_url) => Ok(Self {
                api_url,
                request_timeout: duration_var(TIMEOUT_MS_VAR, DEFAULT_TIMEOUT_MS)?,
                status_refetch_delay: duration_var(
                    STATUS_REFETCH_MS_VAR,
                    DEFAULT_STATUS_REFETCH_MS,
                )?,
            }),
            None => Self::from_env(),
        }
    }
}

fn duration_var(var: &'static str, default_ms: u64) -> Result<Duration, ConfigError> {
    match env::var(var) {
        Err(_) => Ok(Duration::from_millis(default_ms)),
        Ok(value) => value
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| ConfigError::InvalidDuration { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = ClientConfig::default();
        assert_eq!(config.status_refetch_delay, Duration::from_secs(2));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn explicit_url_bypasses_the_environment_requirement() {
        let config =
            ClientConfig::from_env_with_url(Some("http://api.example:9000".to_string())).unwrap();
        assert_eq!(config.api_url, "http://api.example:9000");
    }
}
