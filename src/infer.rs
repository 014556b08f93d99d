//! Column type inference by elimination.
//!
//! Every column starts with the full type catalog. Each non-null value
//! removes the candidates it disproves (see [`crate::admit::admits`]); the
//! highest-ranked survivor wins, a second pass separates dates from
//! date-times, and finally the name-based [`OverrideRules`] get a say.
//! Columns are independent of one another.

use std::collections::{BTreeSet, HashSet};

use log::debug;
use serde::Serialize;

use crate::{
    admit::{self, is_null_token, parse_iso_timestamp},
    candidates::CandidateSet,
    error::InferError,
    field_type::FieldType,
    frame::{CKAN_ID_COLUMN, ColumnValues, Table},
    overrides::OverrideRules,
};

/// Longest textual form of a date-only ISO value (`YYYY-MM-DD`).
const ISO_DATE_LEN: usize = 10;

#[derive(Debug, Clone)]
pub struct InferOptions {
    /// Data rows to read before inferring; 0 reads everything.
    pub sample_rows: usize,
    /// Drop the catalog's synthetic `_id` column before inference.
    pub drop_ckan_id: bool,
    pub overrides: OverrideRules,
}

impl Default for InferOptions {
    fn default() -> Self {
        Self {
            sample_rows: 0,
            drop_ckan_id: true,
            overrides: OverrideRules::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub field_type: FieldType,
    /// Type chosen by elimination before override rules ran.
    pub eliminated_type: FieldType,
    #[serde(skip)]
    pub candidates: CandidateSet,
    pub value_count: usize,
    pub null_count: usize,
    pub missing_cells: usize,
    pub example: Option<String>,
    pub is_unique: bool,
    pub single_value: Option<String>,
    /// Non-empty null tokens seen in the column.
    pub null_tokens: BTreeSet<String>,
}

impl ColumnProfile {
    pub fn is_empty(&self) -> bool {
        self.null_count == self.value_count
    }

    pub fn is_single_valued(&self) -> bool {
        self.single_value.is_some()
    }

    pub fn was_overridden(&self) -> bool {
        self.field_type != self.eliminated_type
    }

    /// True when the column holds `NA`/`NULL` placeholders that a typed
    /// loader has to replace first.
    pub fn needs_null_substitution(&self) -> bool {
        self.null_tokens
            .iter()
            .any(|token| admit::needs_substitution(token))
    }
}

pub fn infer_column<S: AsRef<str>>(
    name: &str,
    values: &[S],
    overrides: &OverrideRules,
) -> ColumnProfile {
    let mut candidates = CandidateSet::full();
    let mut null_count = 0usize;
    let mut example: Option<String> = None;
    let mut distinct_raw: HashSet<&str> = HashSet::with_capacity(values.len());
    let mut distinct_present: BTreeSet<&str> = BTreeSet::new();
    let mut null_tokens = BTreeSet::new();

    for value in values {
        let value = value.as_ref();
        distinct_raw.insert(value);
        if is_null_token(value) {
            null_count += 1;
            if !value.is_empty() {
                null_tokens.insert(value.to_string());
            }
            continue;
        }
        if example.is_none() {
            example = Some(value.to_string());
        }
        if distinct_present.len() < 2 {
            distinct_present.insert(value);
        }
        candidates.narrow(value);
    }

    let present = || {
        values
            .iter()
            .map(|value| value.as_ref())
            .filter(|value: &&str| !is_null_token(value))
    };

    let eliminated_type = match candidates.best() {
        None => FieldType::Text,
        Some(_) if example.is_none() => FieldType::Text,
        Some(best) if best.is_temporal() => {
            let date_shaped = present().all(|value| value.chars().count() <= ISO_DATE_LEN)
                || present().all(|value| {
                    parse_iso_timestamp(value).is_some_and(|stamp| stamp.is_midnight)
                });
            if date_shaped {
                FieldType::Date
            } else {
                FieldType::DateTime
            }
        }
        Some(best) => best,
    };

    let field_type = overrides.apply(name, eliminated_type);
    if field_type != eliminated_type {
        debug!("Column '{name}': {eliminated_type} overridden to {field_type} by name rule");
    }
    debug!("Column '{name}': candidates {candidates:?}, resolved {field_type}");

    let single_value = if distinct_present.len() == 1 {
        distinct_present.first().map(|value| value.to_string())
    } else {
        None
    };

    ColumnProfile {
        name: name.to_string(),
        field_type,
        eliminated_type,
        candidates,
        value_count: values.len(),
        null_count,
        missing_cells: 0,
        example,
        is_unique: distinct_raw.len() == values.len(),
        single_value,
        null_tokens,
    }
}

/// Infers every column independently, preserving input order.
pub fn infer(
    columns: &[ColumnValues],
    overrides: &OverrideRules,
) -> Result<Vec<ColumnProfile>, InferError> {
    if columns.is_empty() {
        return Err(InferError::NoColumns);
    }
    if columns.iter().all(|column| column.values.is_empty()) {
        return Err(InferError::NoRows);
    }
    Ok(columns
        .iter()
        .map(|column| {
            let mut profile = infer_column(&column.name, &column.values, overrides);
            profile.missing_cells = column.missing_cells;
            profile
        })
        .collect())
}

pub fn infer_table(table: Table, options: &InferOptions) -> Result<Vec<ColumnProfile>, InferError> {
    let table = if options.drop_ckan_id {
        table.without_column(CKAN_ID_COLUMN)
    } else {
        table
    };
    infer(&table.columns(), &options.overrides)
}
