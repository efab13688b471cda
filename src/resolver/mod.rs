//! Contact resolution: raw rows into {valid contacts, rejected rows}.
//!
//! Every input row yields exactly one of the two, in row order. Rejections are
//! data, never errors; the only fault that aborts resolution is the required
//! name column being absent from the source entirely.

use crate::error::{ResolveError, ResolveResult};
use crate::models::{Contact, MessageType, RejectedRow};
use crate::rows::{RawRow, RowSource};
use crate::validation::phone::validate_phone;
use tracing::debug;

/// Reported row indices are 1-based and skip the header row.
pub const HEADER_ROW_OFFSET: usize = 2;

/// Placeholder name on rows rejected for a missing name.
const UNKNOWN_NAME: &str = "Unknown";

/// Default message when the message column is absent or blank.
const DEFAULT_MESSAGE: &str = "Hello from automated system";

/// Column labels the resolver reads.
///
/// Phone columns are tried in order; the first value that validates wins.
#[derive(Debug, Clone)]
pub struct ResolverColumns {
    /// Required name column; its absence from the source is fatal
    pub name: String,

    /// Phone columns in priority order
    pub phone_priority: Vec<String>,

    /// Optional message column
    pub message: String,

    /// Optional message-type column
    pub message_type: String,
}

impl Default for ResolverColumns {
    fn default() -> Self {
        Self {
            name: "paciente".to_string(),
            phone_priority: vec!["tel.celular".to_string(), "tel.residencial".to_string()],
            message: "mensagem".to_string(),
            message_type: "tipo".to_string(),
        }
    }
}

/// The partition produced by one resolution pass.
#[derive(Debug, Clone, Default)]
pub struct ResolvedRows {
    /// Contacts ready for dispatch, in row order
    pub valid: Vec<Contact>,

    /// Rows excluded before dispatch, in row order
    pub rejected: Vec<RejectedRow>,
}

/// Per-row classification; each row produces exactly one variant.
enum RowOutcome {
    Valid(Contact),
    Rejected(RejectedRow),
}

/// Resolves raw rows into dispatchable contacts.
#[derive(Debug, Clone, Default)]
pub struct ContactResolver {
    columns: ResolverColumns,
}

impl ContactResolver {
    pub fn new(columns: ResolverColumns) -> Self {
        Self { columns }
    }

    /// Resolve every row of the source, preserving row order in both output
    /// lists.
    pub fn resolve(&self, source: &dyn RowSource) -> ResolveResult<ResolvedRows> {
        if !source.has_column(&self.columns.name) {
            return Err(ResolveError::MissingColumn(self.columns.name.clone()));
        }

        let mut resolved = ResolvedRows::default();
        for (position, row) in source.rows().enumerate() {
            let row_index = position + HEADER_ROW_OFFSET;
            match self.resolve_row(row, source, row_index) {
                RowOutcome::Valid(contact) => resolved.valid.push(contact),
                RowOutcome::Rejected(rejected) => {
                    debug!(row_index, reason = %rejected.reason, "row rejected");
                    resolved.rejected.push(rejected);
                }
            }
        }

        Ok(resolved)
    }

    fn resolve_row(&self, row: &dyn RawRow, source: &dyn RowSource, row_index: usize) -> RowOutcome {
        // Attempts are every non-empty raw candidate, labeled by column,
        // independent of which one (if any) ends up validating. Reported even
        // when the rejection is about the name.
        let phone_attempts = self.phone_attempts(row, source);

        if row.is_empty(&self.columns.name) {
            return RowOutcome::Rejected(RejectedRow {
                row_index,
                name: UNKNOWN_NAME.to_string(),
                phone_attempts,
                reason: "Empty or missing patient name".to_string(),
            });
        }
        let name = row
            .get(&self.columns.name)
            .unwrap_or_default()
            .trim()
            .to_string();

        let phone = match self.resolve_phone(row, source) {
            Some(phone) => phone,
            None => {
                let available = self.present_phone_columns(source).join(", ");
                return RowOutcome::Rejected(RejectedRow {
                    row_index,
                    name,
                    phone_attempts,
                    reason: format!("No valid phone number found. Available columns: {available}"),
                });
            }
        };

        let message = match row.get(&self.columns.message) {
            Some(value) if !row.is_empty(&self.columns.message) => value.trim().to_string(),
            _ => DEFAULT_MESSAGE.to_string(),
        };
        let message_type = match row.get(&self.columns.message_type) {
            Some(value) if !row.is_empty(&self.columns.message_type) => {
                MessageType::from_label(value)
            }
            _ => MessageType::default(),
        };

        // Contact construction re-runs phone validation; a failure here means
        // something upstream broke, so the row is kept as data instead of
        // aborting the batch.
        match Contact::new(name.clone(), &phone, message, message_type) {
            Ok(contact) => RowOutcome::Valid(contact),
            Err(e) => RowOutcome::Rejected(RejectedRow {
                row_index,
                name,
                phone_attempts,
                reason: format!("Unexpected error: {e}"),
            }),
        }
    }

    /// First phone candidate, in priority order, that passes validation.
    fn resolve_phone(&self, row: &dyn RawRow, source: &dyn RowSource) -> Option<String> {
        for column in &self.columns.phone_priority {
            if !source.has_column(column) || row.is_empty(column) {
                continue;
            }
            let raw = row.get(column)?;
            if let Ok(phone) = validate_phone(raw) {
                return Some(phone);
            }
        }
        None
    }

    fn phone_attempts(&self, row: &dyn RawRow, source: &dyn RowSource) -> Vec<String> {
        self.columns
            .phone_priority
            .iter()
            .filter(|column| source.has_column(column) && !row.is_empty(column))
            .filter_map(|column| {
                row.get(column)
                    .map(|value| format!("{column}: '{value}'"))
            })
            .collect()
    }

    fn present_phone_columns(&self, source: &dyn RowSource) -> Vec<String> {
        self.columns
            .phone_priority
            .iter()
            .filter(|column| source.has_column(column))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::JsonRowSource;
    use serde_json::json;

    fn resolve(rows: serde_json::Value) -> ResolvedRows {
        let source = JsonRowSource::from_value(rows).unwrap();
        ContactResolver::default().resolve(&source).unwrap()
    }

    #[test]
    fn test_every_row_classified_exactly_once() {
        let resolved = resolve(json!([
            {"paciente": "Ana", "tel.celular": "11 - 9999 - 9999"},
            {"paciente": "", "tel.celular": "11 - 8888 - 8888"},
            {"paciente": "Bia", "tel.celular": "99 - 1234 - 5678"},
            {"paciente": "Caio", "tel.celular": "nan"}
        ]));

        assert_eq!(resolved.valid.len() + resolved.rejected.len(), 4);
        assert_eq!(resolved.valid.len(), 1);
        assert_eq!(resolved.valid[0].name, "Ana");
        assert_eq!(resolved.valid[0].phone, "11 - 9999 - 9999");
    }

    #[test]
    fn test_missing_name_rejection() {
        let resolved = resolve(json!([
            {"paciente": "   ", "tel.celular": "11 - 8888 - 8888"}
        ]));

        let rejected = &resolved.rejected[0];
        assert_eq!(rejected.row_index, 2);
        assert_eq!(rejected.name, "Unknown");
        assert_eq!(rejected.reason, "Empty or missing patient name");
        // Phone attempts are still reported on name failures
        assert_eq!(
            rejected.phone_attempts,
            vec!["tel.celular: '11 - 8888 - 8888'"]
        );
    }

    #[test]
    fn test_row_indices_are_one_based_past_header() {
        let resolved = resolve(json!([
            {"paciente": "Ana", "tel.celular": "11 - 9999 - 9999"},
            {"paciente": "", "tel.celular": "11 - 8888 - 8888"},
            {"paciente": "Bia", "tel.celular": "99 - 1234 - 5678"}
        ]));

        let indices: Vec<_> = resolved.rejected.iter().map(|r| r.row_index).collect();
        assert_eq!(indices, [3, 4]);
    }

    #[test]
    fn test_phone_fallback_priority_order() {
        // Invalid value in the priority column, valid in the fallback
        let resolved = resolve(json!([
            {"paciente": "Ana", "tel.celular": "99 - 1234 - 5678", "tel.residencial": "21 - 3333 - 4444"}
        ]));
        assert_eq!(resolved.valid[0].phone, "21 - 3333 - 4444");

        // Both valid: the priority column wins
        let resolved = resolve(json!([
            {"paciente": "Ana", "tel.celular": "11 - 1111 - 1111", "tel.residencial": "21 - 3333 - 4444"}
        ]));
        assert_eq!(resolved.valid[0].phone, "11 - 1111 - 1111");
    }

    #[test]
    fn test_no_valid_phone_lists_available_columns_and_attempts() {
        let resolved = resolve(json!([
            {"paciente": "Ana", "tel.celular": "99 - 1234 - 5678", "tel.residencial": "nan"}
        ]));

        let rejected = &resolved.rejected[0];
        assert_eq!(
            rejected.reason,
            "No valid phone number found. Available columns: tel.celular, tel.residencial"
        );
        // Blank cells never show up in the attempts list
        assert_eq!(
            rejected.phone_attempts,
            vec!["tel.celular: '99 - 1234 - 5678'"]
        );
    }

    #[test]
    fn test_no_phone_data_renders_sentinel() {
        let resolved = resolve(json!([
            {"paciente": "Ana", "tel.celular": ""}
        ]));

        let rejected = &resolved.rejected[0];
        assert!(rejected.phone_attempts.is_empty());
        assert_eq!(rejected.phone_attempted(), "No phone data");
    }

    #[test]
    fn test_message_defaults() {
        let resolved = resolve(json!([
            {"paciente": "Ana", "tel.celular": "11 - 9999 - 9999"},
            {"paciente": "Bia", "tel.celular": "11 - 7777 - 7777",
             "mensagem": "Consulta amanhã", "tipo": "whatsapp"}
        ]));

        assert_eq!(resolved.valid[0].message, "Hello from automated system");
        assert_eq!(resolved.valid[0].message_type, MessageType::Sms);
        assert_eq!(resolved.valid[1].message, "Consulta amanhã");
        assert_eq!(resolved.valid[1].message_type, MessageType::Whatsapp);
    }

    #[test]
    fn test_missing_name_column_is_fatal() {
        let source = JsonRowSource::from_value(json!([
            {"tel.celular": "11 - 9999 - 9999"}
        ]))
        .unwrap();

        let err = ContactResolver::default().resolve(&source).unwrap_err();
        assert_eq!(err, ResolveError::MissingColumn("paciente".to_string()));
    }

    #[test]
    fn test_custom_columns() {
        let columns = ResolverColumns {
            name: "nome".to_string(),
            phone_priority: vec!["fone".to_string()],
            message: "msg".to_string(),
            message_type: "canal".to_string(),
        };
        let source = JsonRowSource::from_value(json!([
            {"nome": "Ana", "fone": "11 - 9999 - 9999"}
        ]))
        .unwrap();

        let resolved = ContactResolver::new(columns).resolve(&source).unwrap();
        assert_eq!(resolved.valid.len(), 1);
    }
}
