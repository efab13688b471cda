//! Application service layer.
//!
//! The dispatcher orchestrates resolution, health gating, batch submission,
//! and reconciliation into a single report.

mod batch_dispatcher;

pub use batch_dispatcher::{BatchDispatcher, DispatchReport};
