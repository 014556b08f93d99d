//! Header name normalization.
//!
//! Raw headers arrive with mixed case, punctuation, whitespace and
//! occasionally a byte-order mark. Two forms are derived from each one:
//!
//! - the *load* form, which must match the raw key the file is read with,
//!   so it keeps the byte-order mark and any `.` characters;
//! - the *dump* form, the canonical lowercase `_`-separated identifier used
//!   as a stable field name.
//!
//! Both are computed from the raw header independently.

use std::{collections::HashMap, fmt, sync::OnceLock};

use heck::ToSnakeCase;
use regex::Regex;

use crate::error::NamingError;

const BYTE_ORDER_MARK: char = '\u{feff}';

static SEPARATOR_RUNS: OnceLock<Regex> = OnceLock::new();

fn separator_runs() -> &'static Regex {
    SEPARATOR_RUNS.get_or_init(|| Regex::new(r"[^A-Za-z0-9]+").expect("valid separator pattern"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseStyle {
    Upper,
    SnakeCase,
    Capitalized,
    CamelCase,
    Unknown,
}

impl CaseStyle {
    pub const fn as_str(self) -> &'static str {
        match self {
            CaseStyle::Upper => "upper",
            CaseStyle::SnakeCase => "snake_case",
            CaseStyle::Capitalized => "capitalized",
            CaseStyle::CamelCase => "camelCase",
            CaseStyle::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CaseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How camelCase headers become canonical identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameStrategy {
    /// Every casing class goes through the same separator replacement, so
    /// `firstName` becomes `firstname`.
    #[default]
    Fold,
    /// camelCase headers are split into words first, so `firstName`
    /// becomes `first_name`.
    SplitCamel,
}

/// Replaces every run of non-alphanumeric characters with `_`.
fn replace_separators(value: &str) -> String {
    separator_runs().replace_all(value, "_").into_owned()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// A lower-to-upper step anywhere in `word`, or an upper-to-lower step
/// after its first character (`HTTPServer`).
fn has_case_transition(word: &str) -> bool {
    let chars = word.chars().collect::<Vec<_>>();
    chars.windows(2).enumerate().any(|(idx, pair)| {
        let (left, right) = (pair[0], pair[1]);
        (left.is_lowercase() && right.is_uppercase())
            || (idx > 0 && left.is_uppercase() && right.is_lowercase())
    })
}

type CaseCheck = fn(value: &str, replaced: &str) -> bool;

fn is_upper(value: &str, _replaced: &str) -> bool {
    value == value.to_uppercase()
}

fn is_snake_case(value: &str, replaced: &str) -> bool {
    replaced.to_lowercase() == value
}

fn is_capitalized(_value: &str, replaced: &str) -> bool {
    replaced.split('_').all(|word| word == capitalize(word))
}

fn is_camel_case(_value: &str, replaced: &str) -> bool {
    replaced.split('_').any(has_case_transition)
}

/// Checked in order; the first row that holds decides.
const CASE_TABLE: [(CaseStyle, CaseCheck); 4] = [
    (CaseStyle::Upper, is_upper),
    (CaseStyle::SnakeCase, is_snake_case),
    (CaseStyle::Capitalized, is_capitalized),
    (CaseStyle::CamelCase, is_camel_case),
];

/// Classifies the casing of `value`, falling back to `Unknown`.
pub fn classify(value: &str) -> CaseStyle {
    let replaced = replace_separators(value);
    CASE_TABLE
        .iter()
        .find(|(_, check)| check(value, &replaced))
        .map(|(style, _)| *style)
        .unwrap_or(CaseStyle::Unknown)
}

fn strip_byte_order_mark(value: &str) -> &str {
    value.trim_start_matches(BYTE_ORDER_MARK)
}

/// `/` and `:` count as word separators before casing is examined.
pub(crate) fn prepare(raw: &str) -> String {
    strip_byte_order_mark(raw)
        .trim()
        .replace(['/', ':'], "_")
}

/// Canonical lowercase identifier for `raw`.
pub fn canonical_name(raw: &str, strategy: NameStrategy) -> String {
    let prepared = prepare(raw);
    match (classify(&prepared), strategy) {
        (CaseStyle::CamelCase, NameStrategy::SplitCamel) => {
            replace_separators(&prepared.to_snake_case()).to_lowercase()
        }
        _ => replace_separators(&prepared).to_lowercase(),
    }
}

/// Replaces forbidden characters with `_` but keeps the original casing.
pub fn maintain_case_name(raw: &str) -> String {
    replace_separators(&prepare(raw))
}

/// Key used to read the column back from the raw file.
pub fn load_name(raw: &str) -> String {
    raw.to_string()
}

/// Field name written to schemas and dictionaries.
pub fn dump_name(raw: &str, strategy: NameStrategy, maintain_case: bool) -> String {
    if maintain_case {
        maintain_case_name(raw)
    } else {
        canonical_name(raw, strategy)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderNames {
    pub raw: String,
    pub style: CaseStyle,
    pub load: String,
    pub dump: String,
}

impl HeaderNames {
    pub fn derive(raw: &str, strategy: NameStrategy, maintain_case: bool) -> Self {
        Self {
            raw: raw.to_string(),
            style: classify(&prepare(raw)),
            load: load_name(raw),
            dump: dump_name(raw, strategy, maintain_case),
        }
    }
}

pub fn derive_all<S: AsRef<str>>(
    headers: &[S],
    strategy: NameStrategy,
    maintain_case: bool,
) -> Vec<HeaderNames> {
    headers
        .iter()
        .map(|raw| HeaderNames::derive(raw.as_ref(), strategy, maintain_case))
        .collect()
}

/// Reports the first pair of headers (in header order) whose dump forms
/// collide.
pub fn ensure_unique_dump_names(names: &[HeaderNames]) -> Result<(), NamingError> {
    let mut seen: HashMap<&str, &str> = HashMap::with_capacity(names.len());
    for entry in names {
        if let Some(first) = seen.insert(entry.dump.as_str(), entry.raw.as_str()) {
            return Err(NamingError::DuplicateTargetName {
                name: entry.dump.clone(),
                first: first.to_string(),
                second: entry.raw.clone(),
            });
        }
    }
    Ok(())
}
