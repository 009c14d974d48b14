//! Column-named record tables handed to the presentation layer

use serde::Serialize;
use serde_json::{Map, Value};

/// A table of records, each a mapping from column name to value
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Map<String, Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from serializable row structs.
    ///
    /// Rows that do not serialize to a JSON object are skipped. Columns are
    /// collected in first-seen order.
    pub fn from_rows<T: Serialize>(rows: &[T]) -> Self {
        let mut table = Table::default();
        for row in rows {
            if let Ok(Value::Object(record)) = serde_json::to_value(row) {
                table.push(record);
            }
        }
        table
    }

    /// Append a record, registering any new columns
    pub fn push(&mut self, record: Map<String, Value>) {
        for key in record.keys() {
            if !self.has_column(key) {
                self.columns.push(key.clone());
            }
        }
        self.rows.push(record);
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Numeric value of a cell; `None` when absent or not a number
    pub fn number(&self, row: usize, column: &str) -> Option<f64> {
        self.rows.get(row)?.get(column)?.as_f64()
    }

    /// Keep only the named columns, in the given order
    pub fn select(&self, columns: &[&str]) -> Table {
        let mut projected = Table::new(columns.iter().map(|c| c.to_string()).collect());
        projected.rows = self
            .rows
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .filter_map(|&c| record.get(c).map(|v| (c.to_string(), v.clone())))
                    .collect()
            })
            .collect();
        projected
    }
}
