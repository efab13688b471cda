use sms_dispatch::{Contact, DispatchOutcome, DispatchStatus, SmsGateway};
use std::collections::HashMap;
use std::sync::Mutex;

/// Mock SMS gateway for testing.
///
/// Scriptable health and per-position batch statuses, with call tracking so
/// tests can assert which operations ran.
pub struct MockGateway {
    healthy: bool,
    batch_statuses: Mutex<Vec<DispatchStatus>>,
    call_counts: Mutex<HashMap<String, usize>>,
}

#[allow(dead_code)]
impl MockGateway {
    /// A healthy gateway that reports every contact as sent.
    pub fn healthy() -> Self {
        Self::new(true)
    }

    /// A gateway whose health probe fails.
    pub fn unavailable() -> Self {
        Self::new(false)
    }

    fn new(healthy: bool) -> Self {
        Self {
            healthy,
            batch_statuses: Mutex::new(Vec::new()),
            call_counts: Mutex::new(HashMap::new()),
        }
    }

    /// Script the statuses returned for the next batch, applied positionally.
    /// Contacts past the scripted list are reported as sent.
    pub fn script_batch(self, statuses: Vec<DispatchStatus>) -> Self {
        *self.batch_statuses.lock().unwrap() = statuses;
        self
    }

    /// Get the number of times a method was called.
    pub fn call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl SmsGateway for MockGateway {
    fn health_probe(&self) -> bool {
        self.track_call("health_probe");
        self.healthy
    }

    fn send_single(&self, contact: &Contact) -> DispatchOutcome {
        self.track_call("send_single");
        DispatchOutcome::sent(contact.clone())
    }

    fn send_batch(&self, contacts: &[Contact]) -> Vec<DispatchOutcome> {
        self.track_call("send_batch");
        let statuses = self.batch_statuses.lock().unwrap();
        contacts
            .iter()
            .enumerate()
            .map(|(i, contact)| {
                let status = statuses.get(i).copied().unwrap_or(DispatchStatus::Sent);
                let error = match status {
                    DispatchStatus::Failed => Some("scripted failure".to_string()),
                    _ => None,
                };
                DispatchOutcome::with_status(contact.clone(), status, error)
            })
            .collect()
    }
}
