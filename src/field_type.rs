//! The finite catalog of column types a data dictionary can declare.
//!
//! [`FieldType`] is the only representation of a type inside the crate.
//! Names used by other systems (the catalog's datastore, the YAML schema)
//! are produced at the edges through [`FieldType::catalog_name`] and
//! [`crate::schema::ColumnType`].

use std::{fmt, str::FromStr};

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Bool,
    Int,
    Float,
    Date,
    #[serde(rename = "datetime")]
    DateTime,
}

impl FieldType {
    /// Every type in catalog order.
    pub const ALL: [FieldType; 6] = [
        FieldType::Text,
        FieldType::Bool,
        FieldType::Int,
        FieldType::Float,
        FieldType::Date,
        FieldType::DateTime,
    ];

    /// Specificity rank. Date and datetime share the top rank and are
    /// told apart by a separate pass over the column.
    pub const fn rank(self) -> u8 {
        match self {
            FieldType::Text => 0,
            FieldType::Bool => 1,
            FieldType::Int => 2,
            FieldType::Float => 3,
            FieldType::Date | FieldType::DateTime => 4,
        }
    }

    pub const fn is_temporal(self) -> bool {
        matches!(self, FieldType::Date | FieldType::DateTime)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Bool => "bool",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Date => "date",
            FieldType::DateTime => "datetime",
        }
    }

    /// Name understood by the catalog's datastore when overriding a field type.
    pub const fn catalog_name(self) -> &'static str {
        match self {
            FieldType::DateTime => "timestamp",
            other => other.as_str(),
        }
    }

    pub(crate) const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "text" | "string" => Ok(FieldType::Text),
            "bool" | "boolean" => Ok(FieldType::Bool),
            "int" | "integer" => Ok(FieldType::Int),
            "float" | "numeric" => Ok(FieldType::Float),
            "date" => Ok(FieldType::Date),
            "datetime" | "timestamp" => Ok(FieldType::DateTime),
            _ => Err(anyhow!("Unknown field type '{value}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_follow_specificity() {
        assert!(FieldType::Text.rank() < FieldType::Bool.rank());
        assert!(FieldType::Bool.rank() < FieldType::Int.rank());
        assert!(FieldType::Int.rank() < FieldType::Float.rank());
        assert_eq!(FieldType::Date.rank(), FieldType::DateTime.rank());
    }

    #[test]
    fn parses_catalog_names_and_aliases() {
        assert_eq!("timestamp".parse::<FieldType>().unwrap(), FieldType::DateTime);
        assert_eq!("Integer".parse::<FieldType>().unwrap(), FieldType::Int);
        assert_eq!(" numeric ".parse::<FieldType>().unwrap(), FieldType::Float);
        assert_eq!("string".parse::<FieldType>().unwrap(), FieldType::Text);
        assert!("json".parse::<FieldType>().is_err());
    }

    #[test]
    fn display_and_catalog_names_differ_only_for_datetime() {
        for field_type in FieldType::ALL {
            if field_type == FieldType::DateTime {
                assert_eq!(field_type.catalog_name(), "timestamp");
            } else {
                assert_eq!(field_type.catalog_name(), field_type.to_string());
            }
        }
    }

    #[test]
    fn serializes_lowercase_names() {
        let json = serde_json::to_string(&FieldType::DateTime).unwrap();
        assert_eq!(json, "\"datetime\"");
        let parsed: FieldType = serde_json::from_str("\"bool\"").unwrap();
        assert_eq!(parsed, FieldType::Bool);
    }
}
