//! Aggregate view over a set of inferred columns.
//!
//! Besides the per-column rows that end up in a data dictionary, the report
//! lists the columns worth a second look (empty, single-valued, unique) and
//! the non-fatal findings gathered while reading and naming them.

use std::fmt;

use itertools::Itertools;
use log::{info, warn};
use serde::Serialize;

use crate::{
    field_type::FieldType,
    infer::ColumnProfile,
    naming::{self, CaseStyle},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// Rows ended before reaching this column.
    MissingCells { column: String, count: usize },
    /// Every value was a null token.
    NoValues { column: String },
    /// The header's casing matched no known style.
    UnclassifiedCase { column: String },
    /// `NA`/`NULL` placeholders need replacing before a typed load.
    NullPlaceholders { column: String, tokens: Vec<String> },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::MissingCells { column, count } => {
                write!(f, "Column '{column}' is missing from {count} row(s)")
            }
            Finding::NoValues { column } => {
                write!(f, "Column '{column}' has no values; defaulting to text")
            }
            Finding::UnclassifiedCase { column } => {
                write!(f, "Column '{column}' has unrecognized casing")
            }
            Finding::NullPlaceholders { column, tokens } => write!(
                f,
                "Column '{column}' contains null placeholders {}",
                tokens.iter().map(|t| format!("'{t}'")).join(", ")
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub name: String,
    pub field_type: FieldType,
    pub example: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InferenceReport {
    pub columns: Vec<ColumnProfile>,
    pub findings: Vec<Finding>,
}

impl InferenceReport {
    pub fn new(columns: Vec<ColumnProfile>) -> Self {
        let findings = collect_findings(&columns);
        Self { columns, findings }
    }

    pub fn rows(&self) -> Vec<ReportRow> {
        self.columns
            .iter()
            .map(|column| ReportRow {
                name: column.name.clone(),
                field_type: column.field_type,
                example: column.example.clone().unwrap_or_default(),
            })
            .collect()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn empty_columns(&self) -> Vec<&str> {
        self.names_where(ColumnProfile::is_empty)
    }

    pub fn single_valued_columns(&self) -> Vec<&str> {
        self.names_where(ColumnProfile::is_single_valued)
    }

    /// Columns whose raw values are all distinct; primary key candidates.
    pub fn unique_columns(&self) -> Vec<&str> {
        self.names_where(|column| column.is_unique)
    }

    pub fn null_substitution_columns(&self) -> Vec<&str> {
        self.names_where(ColumnProfile::needs_null_substitution)
    }

    fn names_where<F>(&self, predicate: F) -> Vec<&str>
    where
        F: Fn(&ColumnProfile) -> bool,
    {
        self.columns
            .iter()
            .filter(|column| predicate(column))
            .map(|column| column.name.as_str())
            .collect()
    }

    pub fn log_summary(&self) {
        for finding in &self.findings {
            warn!("{finding}");
        }
        for column in self.columns.iter().filter(|column| column.was_overridden()) {
            info!(
                "Column '{}' looks like {} but is kept as {} because of its name",
                column.name, column.eliminated_type, column.field_type
            );
        }
        info!("Empty columns: {}", format_names(&self.empty_columns()));
        for column in self.columns.iter() {
            if let Some(value) = column.single_value.as_deref() {
                info!("Column '{}' only ever holds '{}'", column.name, value);
            }
        }
        info!(
            "Single-valued columns: {}",
            format_names(&self.single_valued_columns())
        );
        info!(
            "Unique columns (primary key candidates): {}",
            format_names(&self.unique_columns())
        );
    }
}

fn format_names(names: &[&str]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.iter().join(", ")
    }
}

fn collect_findings(columns: &[ColumnProfile]) -> Vec<Finding> {
    let mut findings = Vec::new();
    for column in columns {
        if column.missing_cells > 0 {
            findings.push(Finding::MissingCells {
                column: column.name.clone(),
                count: column.missing_cells,
            });
        }
        if column.is_empty() {
            findings.push(Finding::NoValues {
                column: column.name.clone(),
            });
        }
        if naming::classify(&naming::prepare(&column.name)) == CaseStyle::Unknown {
            findings.push(Finding::UnclassifiedCase {
                column: column.name.clone(),
            });
        }
        if column.needs_null_substitution() {
            findings.push(Finding::NullPlaceholders {
                column: column.name.clone(),
                tokens: column.null_tokens.iter().cloned().collect(),
            });
        }
    }
    findings
}
