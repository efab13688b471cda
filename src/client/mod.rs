//! HTTP client for the SMS gateway.
//!
//! The gateway exposes three endpoints: a health probe, a single send, and a
//! batch send. Send operations never propagate errors; a transport fault, a
//! non-success status, or an unparseable body is converted into failed
//! outcomes for the contacts involved. Batch responses are reconciled onto the
//! submitted contact list strictly by position, and a response that cannot be
//! trusted fails the whole batch rather than being partially believed.

use crate::config::Config;
use crate::error::{GatewayError, GatewayResult};
use crate::models::{Contact, DispatchOutcome, DispatchStatus};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Health probes use a short timeout regardless of the configured request
/// timeout; a slow gateway is an unavailable gateway.
const HEALTH_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// The gateway operations the dispatcher depends on.
///
/// [`GatewayClient`] is the production implementation; tests substitute
/// call-counting doubles.
pub trait SmsGateway: Send + Sync {
    /// Liveness check. Any failure means `false`; this never errors.
    fn health_probe(&self) -> bool;

    /// Send one message. Faults become a failed outcome.
    fn send_single(&self, contact: &Contact) -> DispatchOutcome;

    /// Send a batch. Returns exactly one outcome per submitted contact, in
    /// submission order.
    fn send_batch(&self, contacts: &[Contact]) -> Vec<DispatchOutcome>;
}

/// Per-contact entry in the gateway's batch response.
#[derive(Debug, Deserialize, Default)]
struct BatchEntry {
    #[serde(default)]
    status: Option<String>,

    #[serde(default)]
    error: Option<String>,
}

/// Body of a 200 batch response. Results are positionally aligned to the
/// request's contact list.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BatchResponse {
    results: Vec<BatchEntry>,
    total: usize,
    successful: usize,
    failed: usize,
    batch_id: Option<String>,
}

/// Synchronous `ureq` client for the SMS gateway.
#[derive(Clone)]
pub struct GatewayClient {
    base_url: String,
    timeout: Duration,
    agent: ureq::Agent,
}

impl GatewayClient {
    /// Create a client from configuration.
    pub fn new(config: &Config) -> Self {
        Self::with_timeout(config.gateway_base_url.clone(), config.request_timeout)
    }

    /// Create a client with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url.into(), 10)
    }

    fn with_timeout(base_url: String, timeout_secs: u64) -> Self {
        let timeout = Duration::from_secs(timeout_secs);
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            base_url,
            timeout,
            agent,
        }
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Execute a POST with a JSON body, mapping transport and status faults.
    fn post(
        &self,
        path: &str,
        body: serde_json::Value,
        timeout: Duration,
    ) -> GatewayResult<ureq::Response> {
        let url = self.build_url(path);
        debug!("POST {}", url);

        self.agent
            .post(&url)
            .timeout(timeout)
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(map_error)
    }

    fn probe(&self) -> bool {
        let url = self.build_url("/health");
        match self
            .agent
            .get(&url)
            .timeout(HEALTH_PROBE_TIMEOUT)
            .call()
        {
            Ok(response) => response.status() == 200,
            Err(e) => {
                debug!("health probe failed: {}", e);
                false
            }
        }
    }

    fn single(&self, contact: &Contact) -> DispatchOutcome {
        let body = serde_json::json!({
            "phone": contact.phone,
            "message": contact.message,
            "name": contact.name,
        });

        match self.post("/api/sms/send", body, self.timeout) {
            Ok(_) => DispatchOutcome::sent(contact.clone()),
            Err(e) => {
                warn!(name = %contact.name, "single send failed: {}", e);
                DispatchOutcome::failed(contact.clone(), e.to_string())
            }
        }
    }

    fn batch(&self, contacts: &[Contact]) -> Vec<DispatchOutcome> {
        let body = serde_json::json!({
            "contacts": contacts
                .iter()
                .map(|c| serde_json::json!({
                    "name": c.name,
                    "phone": c.phone,
                    "message": c.message,
                }))
                .collect::<Vec<_>>(),
        });

        // Batches get double the single-send timeout
        let response = match self.post("/api/sms/batch", body, self.timeout * 2) {
            Ok(response) => response,
            Err(GatewayError::Status { status, .. }) => {
                warn!("batch rejected by gateway: HTTP {}", status);
                return all_failed(contacts, format!("Batch failed: HTTP {status}"));
            }
            Err(e) => {
                warn!("batch send failed: {}", e);
                return all_failed(contacts, e.to_string());
            }
        };

        let parsed: BatchResponse = match response
            .into_string()
            .map_err(|e| GatewayError::HttpError(e.to_string()))
            .and_then(|text| serde_json::from_str(&text).map_err(GatewayError::from))
        {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("batch response unusable: {}", e);
                return all_failed(contacts, format!("Invalid batch response: {e}"));
            }
        };

        debug!(
            batch_id = parsed.batch_id.as_deref().unwrap_or("-"),
            total = parsed.total,
            successful = parsed.successful,
            failed = parsed.failed,
            "gateway batch response"
        );

        reconcile(contacts, parsed)
    }
}

impl SmsGateway for GatewayClient {
    fn health_probe(&self) -> bool {
        self.probe()
    }

    fn send_single(&self, contact: &Contact) -> DispatchOutcome {
        self.single(contact)
    }

    fn send_batch(&self, contacts: &[Contact]) -> Vec<DispatchOutcome> {
        self.batch(contacts)
    }
}

/// Align the response onto the submitted contacts by position. A response
/// shorter than the batch pads the tail with `unknown` outcomes instead of
/// dropping contacts.
fn reconcile(contacts: &[Contact], response: BatchResponse) -> Vec<DispatchOutcome> {
    contacts
        .iter()
        .enumerate()
        .map(|(i, contact)| match response.results.get(i) {
            Some(entry) => DispatchOutcome::with_status(
                contact.clone(),
                parse_status(entry.status.as_deref()),
                entry.error.clone(),
            ),
            None => DispatchOutcome::with_status(contact.clone(), DispatchStatus::Unknown, None),
        })
        .collect()
}

fn parse_status(status: Option<&str>) -> DispatchStatus {
    match status {
        Some("sent") => DispatchStatus::Sent,
        Some("failed") => DispatchStatus::Failed,
        _ => DispatchStatus::Unknown,
    }
}

fn all_failed(contacts: &[Contact], detail: String) -> Vec<DispatchOutcome> {
    contacts
        .iter()
        .map(|contact| DispatchOutcome::failed(contact.clone(), detail.clone()))
        .collect()
}

/// Map a ureq error to a GatewayError.
fn map_error(error: ureq::Error) -> GatewayError {
    match error {
        ureq::Error::Status(code, response) => {
            let body = response
                .into_string()
                .unwrap_or_else(|_| "Unknown error".to_string());
            GatewayError::Status { status: code, body }
        }
        ureq::Error::Transport(transport) => {
            if transport.kind() == ureq::ErrorKind::Io {
                GatewayError::Timeout
            } else {
                GatewayError::HttpError(transport.to_string())
            }
        }
    }
}
