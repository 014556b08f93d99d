//! Data dictionary files.
//!
//! A data dictionary is a CSV with one row per documented column. `infer`
//! writes one from a report; the catalog import/export commands translate
//! between this CSV and the catalog's `fields` JSON, where each field looks
//! like `{"id": .., "info": {"label": .., "notes": ..}}`. The catalog adds a
//! `type` on download; uploads leave it out.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
    sync::OnceLock,
};

use anyhow::{Context, Result};
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{error::DictionaryError, field_type::FieldType, io_utils, report::InferenceReport};

pub const NAME_COLUMN: &str = "column";
pub const LEGACY_NAME_COLUMN: &str = "field_name";
const CATALOG_COLUMNS: [&str; 4] = ["column", "type", "label", "description"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryRow {
    #[serde(alias = "field_name")]
    pub column: String,
    #[serde(rename = "type", default)]
    pub field_type: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing)]
    pub type_override: String,
}

impl DictionaryRow {
    pub fn from_report(report: &InferenceReport) -> Vec<DictionaryRow> {
        report
            .rows()
            .into_iter()
            .map(|row| DictionaryRow {
                column: row.name,
                field_type: row.field_type.to_string(),
                example: row.example,
                ..DictionaryRow::default()
            })
            .collect()
    }

    /// The row's `type_override`, when it names a known type.
    pub fn requested_override(&self) -> Option<FieldType> {
        let value = self.type_override.trim();
        if value.is_empty() {
            return None;
        }
        value.parse().ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFieldInfo {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_override: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogField {
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub field_type: String,
    #[serde(default)]
    pub info: CatalogFieldInfo,
}

/// `<stem><suffix>` next to `input`, e.g. `parcels.csv` -> `parcels-data-dictionary.csv`.
pub fn sibling_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{stem}{suffix}"))
}

pub fn write_dictionary(path: &Path, rows: &[DictionaryRow]) -> Result<()> {
    let mut writer = io_utils::open_csv_writer(Some(path), b',')?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Writing dictionary row for '{}'", row.column))?;
    }
    writer.flush().context("Flushing data dictionary")
}

pub fn read_dictionary(path: &Path, delimiter: u8) -> Result<Vec<DictionaryRow>> {
    let mut reader = io_utils::open_csv_reader_from_path(path, delimiter, true)?;
    let headers = reader
        .headers()
        .with_context(|| format!("Reading dictionary headers from {path:?}"))?
        .clone();
    if !headers
        .iter()
        .any(|header| header == NAME_COLUMN || header == LEGACY_NAME_COLUMN)
    {
        return Err(DictionaryError::MissingColumn {
            column: NAME_COLUMN.to_string(),
        }
        .into());
    }
    let mut rows = Vec::new();
    for (idx, record) in reader.deserialize::<DictionaryRow>().enumerate() {
        let row = record.with_context(|| format!("Parsing dictionary row {}", idx + 2))?;
        rows.push(row);
    }
    debug!("Read {} dictionary row(s) from {path:?}", rows.len());
    Ok(rows)
}

/// Writes a header-only CSV whose headers are the dictionary's column names.
pub fn write_template(path: &Path, rows: &[DictionaryRow]) -> Result<()> {
    if rows.is_empty() {
        return Err(DictionaryError::Empty.into());
    }
    let mut writer = io_utils::open_csv_writer(Some(path), b',')?;
    writer
        .write_record(rows.iter().map(|row| row.column.as_str()))
        .context("Writing template headers")?;
    writer.flush().context("Flushing template")
}

/// Converts dictionary rows into catalog fields, returning how many rows
/// asked for a type override.
pub fn to_catalog_fields(rows: &[DictionaryRow]) -> (Vec<CatalogField>, usize) {
    let mut override_attempts = 0usize;
    let fields = rows
        .iter()
        .map(|row| {
            let type_override = row.requested_override().map(|ty| {
                override_attempts += 1;
                ty.catalog_name().to_string()
            });
            CatalogField {
                id: row.column.clone(),
                field_type: String::new(),
                info: CatalogFieldInfo {
                    label: row.label.clone(),
                    notes: row.description.clone(),
                    type_override,
                },
            }
        })
        .collect();
    (fields, override_attempts)
}

pub fn from_catalog_fields(fields: &[CatalogField]) -> Vec<DictionaryRow> {
    fields
        .iter()
        .map(|field| DictionaryRow {
            column: field.id.clone(),
            field_type: field.field_type.clone(),
            label: clean(&field.info.label),
            description: clean(&field.info.notes),
            ..DictionaryRow::default()
        })
        .collect()
}

static TRAILING_CONTROLS: OnceLock<[(Regex, &'static str); 3]> = OnceLock::new();

/// A tab, newline or carriage return at the end of the text, or just before
/// a final newline, applied in that order.
fn trailing_controls() -> &'static [(Regex, &'static str); 3] {
    TRAILING_CONTROLS.get_or_init(|| {
        [
            (Regex::new(r"\t(\n?)\z").expect("valid tab pattern"), "${1}"),
            (Regex::new(r"\n?\n\z").expect("valid newline pattern"), ""),
            (Regex::new(r"\r(\n?)\z").expect("valid carriage return pattern"), "${1}"),
        ]
    })
}

/// Strips the trailing whitespace spreadsheet edits leave in labels and notes.
pub fn clean(value: &str) -> String {
    trailing_controls()
        .iter()
        .fold(value.to_string(), |cleaned, (pattern, replacement)| {
            pattern.replace(&cleaned, *replacement).into_owned()
        })
}

pub fn write_catalog_dictionary(path: &Path, rows: &[DictionaryRow]) -> Result<()> {
    let mut writer = io_utils::open_csv_writer(Some(path), b',')?;
    writer
        .write_record(CATALOG_COLUMNS)
        .context("Writing dictionary headers")?;
    for row in rows {
        writer
            .write_record([
                row.column.as_str(),
                row.field_type.as_str(),
                row.label.as_str(),
                row.description.as_str(),
            ])
            .with_context(|| format!("Writing dictionary row for '{}'", row.column))?;
    }
    writer.flush().context("Flushing data dictionary")
}

pub fn load_catalog_fields(path: &Path) -> Result<Vec<CatalogField>> {
    let file = File::open(path).with_context(|| format!("Opening fields file {path:?}"))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).context("Parsing catalog fields JSON")
}

pub fn save_catalog_fields(path: &Path, fields: &[CatalogField]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Creating fields file {path:?}"))?;
    serde_json::to_writer_pretty(BufWriter::new(file), fields).context("Writing catalog fields JSON")
}
