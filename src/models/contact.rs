//! Contact model: a resolved, dispatchable recipient.

use crate::validation::phone::{validate_phone, PhoneError};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The kind of message a contact should receive.
///
/// Anything the source carries outside the known set falls back to SMS, the
/// only channel the gateway currently implements.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageType {
    #[default]
    Sms,
    Whatsapp,
    Call,
}

impl MessageType {
    /// Parse a raw cell value, upper-casing it first. Unknown labels fall back
    /// to [`MessageType::Sms`].
    pub fn from_label(label: &str) -> Self {
        label.trim().parse().unwrap_or_default()
    }
}

impl FromStr for MessageType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SMS" => Ok(MessageType::Sms),
            "WHATSAPP" => Ok(MessageType::Whatsapp),
            "CALL" => Ok(MessageType::Call),
            _ => Err(()),
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MessageType::Sms => "SMS",
            MessageType::Whatsapp => "WHATSAPP",
            MessageType::Call => "CALL",
        };
        write!(f, "{label}")
    }
}

/// A recipient ready for dispatch.
///
/// A `Contact` is only built through [`Contact::new`], which runs the phone
/// through [`validate_phone`]; a contact with an unvalidated phone cannot
/// exist. Contacts are created by the resolver, travel with their batch, and
/// are never mutated.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct Contact {
    /// Recipient name (non-empty)
    pub name: String,

    /// Phone number, exactly as it passed validation
    pub phone: String,

    /// Message body to deliver
    pub message: String,

    /// Delivery channel tag
    pub message_type: MessageType,
}

impl Contact {
    /// Build a contact, validating the phone number.
    pub fn new(
        name: impl Into<String>,
        phone: &str,
        message: impl Into<String>,
        message_type: MessageType,
    ) -> Result<Self, PhoneError> {
        let phone = validate_phone(phone)?;
        Ok(Self {
            name: name.into(),
            phone,
            message: message.into(),
            message_type,
        })
    }
}
