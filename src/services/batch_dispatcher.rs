//! Batch dispatch orchestration.

use crate::client::SmsGateway;
use crate::error::{DispatchError, DispatchResult};
use crate::models::{BatchResult, DispatchStatus, RejectedRow};
use crate::resolver::ContactResolver;
use crate::rows::RowSource;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// The full report of one pipeline run: what was dispatched and what never
/// made it to the gateway. The two lists are distinct failure categories and
/// are reported separately.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchReport {
    pub batch: BatchResult,
    pub rejected: Vec<RejectedRow>,
}

/// Orchestrates one batch run: resolve, gate on gateway health, submit,
/// reconcile, count.
pub struct BatchDispatcher {
    resolver: ContactResolver,
    gateway: Arc<dyn SmsGateway>,
}

impl BatchDispatcher {
    pub fn new(resolver: ContactResolver, gateway: Arc<dyn SmsGateway>) -> Self {
        Self { resolver, gateway }
    }

    /// Run the whole pipeline over a row source.
    ///
    /// Only two faults abort the run: a structurally unusable source and a
    /// failed health probe. Row rejections and per-contact dispatch failures
    /// are data on the returned report.
    pub fn run(&self, source: &dyn RowSource) -> DispatchResult<DispatchReport> {
        let started = Instant::now();
        let batch_id = generate_batch_id();
        info!(%batch_id, "starting batch");

        let resolved = self.resolver.resolve(source)?;
        info!(
            %batch_id,
            valid = resolved.valid.len(),
            rejected = resolved.rejected.len(),
            "rows resolved"
        );

        // Never submit a batch the gateway cannot take
        if !self.gateway.health_probe() {
            warn!(%batch_id, "gateway health probe failed, aborting");
            return Err(DispatchError::GatewayUnavailable);
        }

        // An empty batch is a completed run, not a gateway call
        let outcomes = if resolved.valid.is_empty() {
            Vec::new()
        } else {
            self.gateway.send_batch(&resolved.valid)
        };
        debug_assert_eq!(outcomes.len(), resolved.valid.len());

        let successful = outcomes
            .iter()
            .filter(|o| o.status == DispatchStatus::Sent)
            .count();
        let failed = outcomes
            .iter()
            .filter(|o| o.status == DispatchStatus::Failed)
            .count();

        let batch = BatchResult {
            batch_id: batch_id.clone(),
            total_contacts: resolved.valid.len(),
            successful,
            failed,
            outcomes,
            processing_time: started.elapsed(),
        };
        info!(%batch_id, successful, failed, "batch completed");

        Ok(DispatchReport {
            batch,
            rejected: resolved.rejected,
        })
    }
}

/// Time-based id, unique enough for human-readable batch reports. No
/// uniqueness guarantee under rapid repeated runs in the same second.
fn generate_batch_id() -> String {
    format!("batch_{}", Utc::now().timestamp())
}
