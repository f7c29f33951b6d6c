//! CSV serialization adapter for record sets.

use std::collections::HashMap;

use crate::{Error, Result};

/// An in-memory tabular record set destined for one CSV file.
///
/// Every row of a set shares the same column list; fields a row does not
/// carry serialize as empty strings.
#[derive(Debug)]
pub(crate) struct RecordSet {
    file_name: &'static str,
    columns: Vec<String>,
    rows: Vec<HashMap<String, String>>,
}

impl RecordSet {
    pub(crate) fn new(file_name: &'static str, columns: Vec<String>) -> Self {
        RecordSet {
            file_name,
            columns,
            rows: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, row: HashMap<String, String>) {
        self.rows.push(row);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn file_name(&self) -> &'static str {
        self.file_name
    }

    /// Serialize to CSV text: header row first, then one row per record in
    /// insertion order.
    pub(crate) fn to_csv(&self) -> Result<String> {
        let mut writer = ::csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.columns)?;

        for row in &self.rows {
            writer.write_record(
                self.columns
                    .iter()
                    .map(|column| row.get(column).map(String::as_str).unwrap_or("")),
            )?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| Error::Csv(e.into_error().into()))?;
        Ok(String::from_utf8(bytes)?)
    }
}
