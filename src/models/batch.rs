//! Batch-level entities: rejected rows, dispatch outcomes, and the aggregated
//! batch result.

use crate::models::Contact;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// Rendered in place of the attempts list when a row had no phone data at all.
pub const NO_PHONE_DATA: &str = "No phone data";

/// A row excluded before any network dispatch.
///
/// Created by the resolver when name or phone resolution fails; consumed only
/// for reporting.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RejectedRow {
    /// 1-based position in the original tabular source, header included
    pub row_index: usize,

    /// Resolved name, or a placeholder when the name itself was the problem
    pub name: String,

    /// Every non-empty raw phone value seen for the row, labeled by column
    pub phone_attempts: Vec<String>,

    /// Why the row was rejected
    pub reason: String,
}

impl RejectedRow {
    /// The attempts list as one display string, with a fixed sentinel when the
    /// row carried no phone data.
    pub fn phone_attempted(&self) -> String {
        if self.phone_attempts.is_empty() {
            NO_PHONE_DATA.to_string()
        } else {
            self.phone_attempts.join(", ")
        }
    }
}

/// Delivery status of one submitted contact.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DispatchStatus {
    Sent,
    Failed,
    /// The gateway response said nothing about this contact
    Unknown,
}

/// The reconciled result for one contact submitted to the gateway.
///
/// Exactly one outcome exists per submitted contact, in submission order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub contact: Contact,
    pub status: DispatchStatus,
    /// Failure detail, when the gateway reported (or the client synthesized) one
    pub error: Option<String>,
    pub completed_at: DateTime<Utc>,
}

impl DispatchOutcome {
    /// Outcome for a contact the gateway confirmed as sent.
    pub fn sent(contact: Contact) -> Self {
        Self::with_status(contact, DispatchStatus::Sent, None)
    }

    /// Outcome for a contact that was submitted but not delivered.
    pub fn failed(contact: Contact, detail: impl Into<String>) -> Self {
        Self::with_status(contact, DispatchStatus::Failed, Some(detail.into()))
    }

    pub fn with_status(contact: Contact, status: DispatchStatus, error: Option<String>) -> Self {
        Self {
            contact,
            status,
            error,
            completed_at: Utc::now(),
        }
    }
}

/// Aggregated result of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub batch_id: String,

    /// Count of valid contacts submitted (zero when dispatch was skipped)
    pub total_contacts: usize,

    /// Outcomes with status `sent`
    pub successful: usize,

    /// Outcomes with status `failed`; `unknown` outcomes count in neither bucket
    pub failed: usize,

    /// One outcome per submitted contact, in submission order
    pub outcomes: Vec<DispatchOutcome>,

    /// Wall-clock elapsed time across resolution, probe, and dispatch
    pub processing_time: Duration,
}
