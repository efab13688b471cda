//! Input validation utilities.
//!
//! Currently this is phone-number validation only; everything else a row can
//! carry (name, message, message type) is handled inline by the resolver.

pub mod phone;

pub use phone::{validate_phone, PhoneError};
