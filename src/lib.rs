//! SMS Dispatch - contact resolution and batch dispatch pipeline.
//!
//! The pipeline ingests tabular recipient records, resolves each into a valid
//! contact (name + phone + message) or a rejected row with a reason, and
//! submits the valid set to the SMS gateway as one batch, reconciling the
//! gateway's positional response back onto the submitted contacts.
//!
//! # Architecture
//!
//! - **models**: Contacts, rejected rows, dispatch outcomes, batch results
//! - **validation**: Strict phone-number validation (shape, digit count, DDD)
//! - **rows**: Typed boundary over the tabular row source
//! - **resolver**: Per-row fallback column resolution into the valid/rejected partition
//! - **client**: HTTP client for the gateway (health probe, single send, batch send)
//! - **services**: The batch dispatcher orchestrating the whole run
//! - **error**: Custom error types for the few faults that abort a run
//! - **config**: Configuration from environment variables

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod resolver;
pub mod rows;
pub mod services;
pub mod validation;

pub use client::{GatewayClient, SmsGateway};
pub use config::Config;
pub use error::{ConfigError, DispatchError, GatewayError, ResolveError};
pub use models::{
    BatchResult, Contact, DispatchOutcome, DispatchStatus, MessageType, RejectedRow,
};
pub use resolver::{ContactResolver, ResolvedRows, ResolverColumns, HEADER_ROW_OFFSET};
pub use rows::{JsonRowSource, RawRow, RowSource};
pub use services::{BatchDispatcher, DispatchReport};
pub use validation::{validate_phone, PhoneError};
