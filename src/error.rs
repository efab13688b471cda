//! Error types for the SMS dispatch pipeline.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Only two error kinds ever escape a pipeline run: a structural fault in the tabular
//! source ([`ResolveError`]) and a failed gateway health probe
//! ([`DispatchError::GatewayUnavailable`]). Everything else is recorded as data on the
//! batch report.

use thiserror::Error;

/// Errors that can occur when talking to the SMS gateway.
///
/// These are internal to the client request plumbing; the public send operations
/// convert them into failed [`crate::models::DispatchOutcome`]s instead of
/// propagating them.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Gateway returned a non-success status code
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Failed to parse the gateway's JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,
}

/// Structural faults in the tabular source.
///
/// A missing required column makes the whole file unprocessable; this is the only
/// fault that aborts resolution rather than producing a rejected row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The required column is absent from the source entirely
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

/// Run-level failures of the dispatch pipeline.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The tabular source is structurally unusable
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The gateway health probe failed; no dispatch was attempted
    #[error("SMS gateway is not available")]
    GatewayUnavailable,
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Convenience type alias for Results with GatewayError
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Convenience type alias for Results with ResolveError
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Convenience type alias for Results with DispatchError
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ResolveError::MissingColumn("paciente".to_string());
        assert_eq!(err.to_string(), "Missing required column: paciente");

        let err = DispatchError::GatewayUnavailable;
        assert_eq!(err.to_string(), "SMS gateway is not available");

        let err = GatewayError::Status {
            status: 503,
            body: "overloaded".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503: overloaded");

        let err = ConfigError::InvalidValue {
            var: "REQUEST_TIMEOUT".to_string(),
            reason: "Must be a positive number".to_string(),
        };
        assert!(err.to_string().contains("REQUEST_TIMEOUT"));
    }

    #[test]
    fn test_resolve_error_converts_to_dispatch_error() {
        let err: DispatchError = ResolveError::MissingColumn("paciente".to_string()).into();
        assert_eq!(err.to_string(), "Missing required column: paciente");
    }
}
