//! In-memory tabular input.
//!
//! Inference works one column at a time, so rows read from a delimited file
//! are pivoted into [`ColumnValues`]. Rows shorter than the header are not an
//! error: the missing cells become empty strings (a null token) and are
//! counted so the report can mention them.

use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use log::debug;

use crate::io_utils;

/// Primary-key column the catalog adds to every datastore table.
pub const CKAN_ID_COLUMN: &str = "_id";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnValues {
    pub name: String,
    pub values: Vec<String>,
    pub missing_cells: usize,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Reads a delimited file, keeping at most `sample_rows` data rows
    /// (0 keeps all of them).
    pub fn read(
        path: &Path,
        delimiter: u8,
        encoding: &'static Encoding,
        sample_rows: usize,
    ) -> Result<Self> {
        let mut reader = io_utils::open_csv_reader_from_path(path, delimiter, true)?;
        let headers = io_utils::reader_headers(&mut reader, encoding)
            .with_context(|| format!("Reading headers from {path:?}"))?;
        let mut rows = Vec::new();
        for (idx, record) in reader.byte_records().enumerate() {
            if sample_rows > 0 && idx >= sample_rows {
                debug!("Stopping after {sample_rows} sampled row(s)");
                break;
            }
            let record = record.with_context(|| format!("Reading row {}", idx + 2))?;
            let decoded = io_utils::decode_record(&record, encoding)
                .with_context(|| format!("Decoding row {}", idx + 2))?;
            rows.push(decoded);
        }
        Ok(Self { headers, rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn without_column(mut self, name: &str) -> Self {
        let Some(position) = self.headers.iter().position(|header| header == name) else {
            return self;
        };
        self.headers.remove(position);
        for row in &mut self.rows {
            if position < row.len() {
                row.remove(position);
            }
        }
        self
    }

    /// Pivots rows into one value sequence per header, in header order.
    pub fn columns(&self) -> Vec<ColumnValues> {
        self.headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let mut missing_cells = 0usize;
                let values = self
                    .rows
                    .iter()
                    .map(|row| match row.get(idx) {
                        Some(value) => value.clone(),
                        None => {
                            missing_cells += 1;
                            String::new()
                        }
                    })
                    .collect();
                ColumnValues {
                    name: name.clone(),
                    values,
                    missing_cells,
                }
            })
            .collect()
    }
}
