//! Typed boundary over the tabular row source.
//!
//! The resolver never sees the concrete reader; it works against [`RowSource`]
//! and [`RawRow`], which only require stable-order iteration, column presence
//! testing, and blank-cell detection. [`JsonRowSource`] is the bundled adapter:
//! a JSON array of objects, one object per row. A spreadsheet reader would
//! implement the same pair of traits.

use serde_json::Value;
use std::collections::BTreeMap;

/// True when a cell holds no usable value: blank, whitespace-only, or the
/// `nan` placeholder a dataframe-style reader stringifies missing cells to.
pub fn is_blank_cell(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan")
}

/// One row of the tabular source.
pub trait RawRow {
    /// Raw cell text for a column, if the row carries that column.
    fn get(&self, column: &str) -> Option<&str>;

    /// True when the cell is missing or blank.
    fn is_empty(&self, column: &str) -> bool {
        match self.get(column) {
            None => true,
            Some(value) => is_blank_cell(value),
        }
    }
}

/// An ordered sequence of rows plus the set of columns actually present.
///
/// Iteration order is a contract: reported row indices and submission order
/// both derive from it.
pub trait RowSource {
    /// Column labels present in the source, in source order.
    fn columns(&self) -> &[String];

    /// Rows in stable source order.
    fn rows(&self) -> Box<dyn Iterator<Item = &dyn RawRow> + '_>;

    fn has_column(&self, label: &str) -> bool {
        self.columns().iter().any(|c| c == label)
    }
}

/// A row backed by a map of rendered cell strings.
#[derive(Debug, Clone, Default)]
pub struct JsonRow {
    cells: BTreeMap<String, String>,
}

impl RawRow for JsonRow {
    fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }
}

/// Row source reading a JSON array of objects.
///
/// Cell values are rendered to text the way a spreadsheet reader would:
/// strings as-is, numbers and booleans via their JSON form, `null` as an
/// empty cell. The column set is the union across rows, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct JsonRowSource {
    columns: Vec<String>,
    rows: Vec<JsonRow>,
}

impl JsonRowSource {
    /// Parse a source from JSON text.
    pub fn from_str(text: &str) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Build a source from an already-parsed JSON value.
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        let records: Vec<serde_json::Map<String, Value>> = serde_json::from_value(value)?;

        let mut columns: Vec<String> = Vec::new();
        let mut rows = Vec::with_capacity(records.len());

        for record in records {
            let mut cells = BTreeMap::new();
            for (label, cell) in record {
                if !columns.contains(&label) {
                    columns.push(label.clone());
                }
                cells.insert(label, render_cell(&cell));
            }
            rows.push(JsonRow { cells });
        }

        Ok(Self { columns, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl RowSource for JsonRowSource {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn rows(&self) -> Box<dyn Iterator<Item = &dyn RawRow> + '_> {
        Box::new(self.rows.iter().map(|r| r as &dyn RawRow))
    }
}

fn render_cell(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
