//! Configuration management.
//!
//! Configuration comes from environment variables (with `.env` support via
//! `dotenvy`); every value has a default so the binary runs against a local
//! gateway with no setup.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Default gateway endpoint: the companion mobile app on the local network.
const DEFAULT_GATEWAY_URL: &str = "http://localhost:8080";

/// Runtime configuration for the dispatch pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// SMS gateway base URL
    pub gateway_base_url: String,

    /// HTTP request timeout in seconds; the batch path uses double this
    pub request_timeout: u64,

    /// Log level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `GATEWAY_BASE_URL`: Gateway base URL (default: `http://localhost:8080`)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 30)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // Load .env if present; missing files are fine
        let _ = dotenvy::dotenv();

        let gateway_base_url =
            env::var("GATEWAY_BASE_URL").unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string());

        if !gateway_base_url.starts_with("http://") && !gateway_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "GATEWAY_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 30)?;
        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            gateway_base_url,
            request_timeout,
            log_level,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}
