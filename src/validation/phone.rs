//! Strict phone-number validation.
//!
//! A phone number is accepted only when it has the exact shape
//! `XX - XXXX - XXXX` (after whitespace runs are collapsed), carries exactly
//! ten digits, and starts with a known Brazilian DDD area code. The accepted
//! value is stored as given; validation never reformats.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use thiserror::Error;

/// Expected shape after collapsing whitespace runs: two digits, literal " - ",
/// four digits, literal " - ", four digits.
static PHONE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2} - \d{4} - \d{4}$").expect("phone shape regex is valid"));

/// DDD area codes accepted by the gateway, grouped by region.
const VALID_DDDS: &[&str] = &[
    // São Paulo
    "11", "12", "13", "14", "15", "16", "17", "18", "19",
    // Rio de Janeiro / Espírito Santo
    "21", "22", "24", "27", "28",
    // Minas Gerais
    "31", "32", "33", "34", "35", "37", "38",
    // Paraná / Santa Catarina
    "41", "42", "43", "44", "45", "46", "47", "48", "49",
    // Rio Grande do Sul
    "51", "53", "54", "55",
    // Centro-Oeste / Norte
    "61", "62", "63", "64", "65", "66", "67", "68", "69",
    // Bahia / Sergipe
    "71", "73", "74", "75", "77", "79",
    // Nordeste
    "81", "82", "83", "84", "85", "86", "87", "88", "89",
    // Norte
    "91", "92", "93", "94", "95", "96", "97", "98",
];

static DDD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| VALID_DDDS.iter().copied().collect());

/// Reasons a raw phone value is rejected.
///
/// The `Display` strings are part of the reporting contract and must stay
/// stable; rejected-row reasons are built directly from them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The collapsed value does not match the `XX - XXXX - XXXX` shape
    #[error("Invalid format. Expected 'XX - XXXX - XXXX', got '{0}'")]
    InvalidFormat(String),

    /// The raw value does not carry exactly ten digits
    #[error("Should have exactly {0} digits")]
    WrongDigitCount(usize),

    /// The two-digit area code is not a known DDD
    #[error("Invalid DDD: {0}")]
    InvalidDdd(String),
}

/// Validate a raw phone value, returning the literal that passed.
///
/// The checks run in a fixed order (shape, digit count, DDD) so that a value
/// failing several of them always reports the same reason. The returned
/// string is the trimmed input, not a reformatted one.
pub fn validate_phone(raw: &str) -> Result<String, PhoneError> {
    let trimmed = raw.trim();
    let collapsed = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");

    if !PHONE_SHAPE.is_match(&collapsed) {
        return Err(PhoneError::InvalidFormat(raw.to_string()));
    }

    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 10 {
        return Err(PhoneError::WrongDigitCount(digits.len()));
    }

    let ddd = &digits[..2];
    if !DDD_SET.contains(ddd) {
        return Err(PhoneError::InvalidDdd(ddd.to_string()));
    }

    Ok(trimmed.to_string())
}
