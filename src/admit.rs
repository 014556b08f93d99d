//! Per-value elimination tests.
//!
//! [`admits`] answers "could this value still belong to a column of type T?".
//! It returns `false` only when the value proves the column is not of that
//! type; a single `false` eliminates the type for the whole column.

use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Timelike};
use regex::Regex;

use crate::field_type::FieldType;

/// Cell values that stand for "no value".
pub const NULL_TOKENS: &[&str] = &["", "NA", "N/A", "NULL"];

/// Null tokens that downstream loaders must substitute before typed ingestion.
pub const SUBSTITUTION_TOKENS: &[&str] = &["NA", "NULL"];

const BOOL_TOKENS: &[&str] = &["0", "false", "False", "1", "true", "True"];

const ISO_DATE: &str = "%Y-%m-%d";
const ISO_DATETIME: &str = "%Y-%m-%dT%H:%M:%S";
const ISO_DATETIME_MICROS: &str = "%Y-%m-%dT%H:%M:%S%.6f";

static INTEGER_PATTERN: OnceLock<Regex> = OnceLock::new();
static FLOAT_PATTERN: OnceLock<Regex> = OnceLock::new();

fn integer_pattern() -> &'static Regex {
    INTEGER_PATTERN.get_or_init(|| Regex::new(r"^-?[0-9]+$").expect("valid integer pattern"))
}

fn float_pattern() -> &'static Regex {
    FLOAT_PATTERN.get_or_init(|| {
        Regex::new(r"^-?(?:[0-9]+\.[0-9]*|\.[0-9]+)$").expect("valid float pattern")
    })
}

pub fn is_null_token(value: &str) -> bool {
    NULL_TOKENS.contains(&value)
}

pub fn needs_substitution(value: &str) -> bool {
    SUBSTITUTION_TOKENS.contains(&value)
}

pub fn admits(value: &str, candidate: FieldType) -> bool {
    if is_null_token(value) {
        return true;
    }
    match candidate {
        FieldType::Text => true,
        FieldType::Bool => BOOL_TOKENS.contains(&value),
        FieldType::Int => admits_integer(value),
        FieldType::Float => float_pattern().is_match(value),
        FieldType::Date | FieldType::DateTime => parse_iso_timestamp(value).is_some(),
    }
}

fn admits_integer(value: &str) -> bool {
    if !integer_pattern().is_match(value) {
        return false;
    }
    // zero-padded codes such as "007" stay textual
    let digits = value.strip_prefix('-').unwrap_or(value);
    !(digits.len() > 1 && digits.starts_with('0'))
}

/// A value that survived the ISO round-trip guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsoTimestamp {
    pub has_time: bool,
    pub is_midnight: bool,
}

/// Parses `value` as an ISO-8601 date or date-time and accepts it only when
/// re-serializing the parsed value reproduces `value` exactly.
pub fn parse_iso_timestamp(value: &str) -> Option<IsoTimestamp> {
    if let Ok(date) = NaiveDate::parse_from_str(value, ISO_DATE) {
        return (date.format(ISO_DATE).to_string() == value).then_some(IsoTimestamp {
            has_time: false,
            is_midnight: true,
        });
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return (iso_naive_datetime(&datetime) == value).then(|| timestamp_of(&datetime));
    }
    if let Ok(datetime) = DateTime::<FixedOffset>::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%:z")
    {
        return (iso_offset_datetime(&datetime) == value)
            .then(|| timestamp_of(&datetime.naive_local()));
    }
    None
}

fn timestamp_of(datetime: &NaiveDateTime) -> IsoTimestamp {
    IsoTimestamp {
        has_time: true,
        is_midnight: datetime.hour() == 0 && datetime.minute() == 0 && datetime.second() == 0,
    }
}

fn iso_naive_datetime(datetime: &NaiveDateTime) -> String {
    if datetime.nanosecond() == 0 {
        datetime.format(ISO_DATETIME).to_string()
    } else {
        datetime.format(ISO_DATETIME_MICROS).to_string()
    }
}

fn iso_offset_datetime(datetime: &DateTime<FixedOffset>) -> String {
    if datetime.nanosecond() == 0 {
        datetime.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
    } else {
        datetime.format("%Y-%m-%dT%H:%M:%S%.6f%:z").to_string()
    }
}
