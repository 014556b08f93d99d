//! YAML schema rendering of inference results.
//!
//! The schema is one possible rendering of a report: each column keeps the
//! raw header as `name` (the key a loader reads with), adds the canonical
//! identifier as `name_mapping` when it differs, and lists the null
//! placeholders a loader must blank out before typed ingestion.
//!
//! Type names here (`String`, `Integer`, ...) belong to the schema format
//! only; inference itself speaks [`FieldType`].

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    error::NamingError,
    field_type::FieldType,
    naming::{self, NameStrategy},
    report::InferenceReport,
};

const CURRENT_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    String,
    Boolean,
    Integer,
    Float,
    Date,
    DateTime,
}

impl From<FieldType> for ColumnType {
    fn from(value: FieldType) -> Self {
        match value {
            FieldType::Text => ColumnType::String,
            FieldType::Bool => ColumnType::Boolean,
            FieldType::Int => ColumnType::Integer,
            FieldType::Float => ColumnType::Float,
            FieldType::Date => ColumnType::Date,
            FieldType::DateTime => ColumnType::DateTime,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValueReplacement {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnMeta {
    pub name: String,
    pub datatype: ColumnType,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        rename = "name_mapping"
    )]
    pub rename: Option<String>,
    #[serde(default, rename = "replace", skip_serializing_if = "Vec::is_empty")]
    pub value_replacements: Vec<ValueReplacement>,
}

impl ColumnMeta {
    pub fn output_name(&self) -> &str {
        self.rename
            .as_deref()
            .filter(|value| !value.is_empty())
            .unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Schema {
    pub columns: Vec<ColumnMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    #[serde(default = "Schema::default_has_headers")]
    pub has_headers: bool,
}

impl Schema {
    pub const fn default_has_headers() -> bool {
        true
    }

    /// Builds a schema from `report`, failing when two headers share a
    /// canonical name.
    pub fn from_report(
        report: &InferenceReport,
        strategy: NameStrategy,
        maintain_case: bool,
    ) -> Result<Self, NamingError> {
        let headers = report
            .columns
            .iter()
            .map(|column| column.name.as_str())
            .collect::<Vec<_>>();
        let names = naming::derive_all(&headers, strategy, maintain_case);
        naming::ensure_unique_dump_names(&names)?;

        let columns = report
            .columns
            .iter()
            .zip(names)
            .map(|(column, names)| ColumnMeta {
                name: names.load,
                datatype: column.field_type.into(),
                rename: (names.dump != names.raw).then_some(names.dump),
                value_replacements: column
                    .null_tokens
                    .iter()
                    .map(|token| ValueReplacement {
                        from: token.clone(),
                        to: String::new(),
                    })
                    .collect(),
            })
            .collect();

        Ok(Schema {
            columns,
            schema_version: Some(CURRENT_SCHEMA_VERSION.to_string()),
            has_headers: true,
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).with_context(|| format!("Creating schema file {path:?}"))?;
        serde_yaml::to_writer(file, self).context("Writing schema YAML")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Opening schema file {path:?}"))?;
        let reader = BufReader::new(file);
        serde_yaml::from_reader(reader).context("Parsing schema YAML")
    }
}
