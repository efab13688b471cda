//! SMS Dispatch - Main entry point.
//!
//! Reads recipient rows from a JSON file, runs the batch dispatch pipeline,
//! and prints the reconciled report. Exits 0 only when every submitted
//! contact was sent.

use anyhow::{Context, Result};
use sms_dispatch::{
    BatchDispatcher, Config, ContactResolver, DispatchStatus, GatewayClient, JsonRowSource,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Log to stderr so the report on stdout stays clean
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let rows_path = std::env::args()
        .nth(1)
        .context("usage: sms-dispatch <rows.json>")?;

    info!(gateway = %config.gateway_base_url, file = %rows_path, "starting");

    let text = std::fs::read_to_string(&rows_path)
        .with_context(|| format!("failed to read {rows_path}"))?;
    let source = JsonRowSource::from_str(&text).context("rows file is not a JSON array of objects")?;

    let gateway = Arc::new(GatewayClient::new(&config));
    let dispatcher = BatchDispatcher::new(ContactResolver::default(), gateway);

    let report = match dispatcher.run(&source) {
        Ok(report) => report,
        Err(e) => {
            error!("batch run failed: {e}");
            return Err(e.into());
        }
    };

    println!("\n=== BATCH PROCESSING COMPLETED ===");
    println!("Batch ID: {}", report.batch.batch_id);
    println!("Total Contacts: {}", report.batch.total_contacts);
    println!("Successful: {}", report.batch.successful);
    println!("Failed: {}", report.batch.failed);
    println!(
        "Processing Time: {:.2} seconds",
        report.batch.processing_time.as_secs_f64()
    );

    if report.batch.failed > 0 {
        println!("\nFailed contacts:");
        for outcome in report
            .batch
            .outcomes
            .iter()
            .filter(|o| o.status == DispatchStatus::Failed)
        {
            println!(
                "  - {}: {}",
                outcome.contact.name,
                outcome.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    if !report.rejected.is_empty() {
        println!("\nRejected rows (never dispatched):");
        for row in &report.rejected {
            println!(
                "  - row {} ({}): {} [{}]",
                row.row_index,
                row.name,
                row.reason,
                row.phone_attempted()
            );
        }
    }

    if report.batch.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
