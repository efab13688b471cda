//! Data models for the dispatch pipeline.
//!
//! This module contains the entities flowing through a batch run: validated
//! contacts, rows rejected before dispatch, per-contact dispatch outcomes, and
//! the aggregated batch result.

pub mod batch;
pub mod contact;

pub use batch::{BatchResult, DispatchOutcome, DispatchStatus, RejectedRow};
pub use contact::{Contact, MessageType};
