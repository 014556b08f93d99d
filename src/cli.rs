use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::naming::NameStrategy;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Bootstrap and convert data dictionaries for catalog tables",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Infer column types from a CSV file and write a data dictionary
    Infer(InferArgs),
    /// Show how each header of a CSV file normalizes to a field name
    Names(NamesArgs),
    /// Write a header-only CSV template from a data dictionary
    Template(TemplateArgs),
    /// Convert a data dictionary CSV into catalog fields JSON
    ExportFields(ExportFieldsArgs),
    /// Convert catalog fields JSON into a data dictionary CSV
    ImportFields(ImportFieldsArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
#[value(rename_all = "kebab-case")]
pub enum NameStrategyArg {
    /// Fold every header through the same separator replacement
    #[default]
    Fold,
    /// Split camelCase headers into words before folding
    SplitCamel,
}

impl From<NameStrategyArg> for NameStrategy {
    fn from(value: NameStrategyArg) -> Self {
        match value {
            NameStrategyArg::Fold => NameStrategy::Fold,
            NameStrategyArg::SplitCamel => NameStrategy::SplitCamel,
        }
    }
}

#[derive(Debug, Args)]
pub struct InferArgs {
    /// Input CSV file to inspect
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Destination data dictionary (defaults to `<input>-data-dictionary.csv`)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Also write a YAML schema to this path
    #[arg(long = "schema")]
    pub schema: Option<PathBuf>,
    /// Number of rows to sample when inferring types (0 means full scan)
    #[arg(long, default_value_t = 0)]
    pub sample_rows: usize,
    /// Keep the catalog's `_id` column instead of dropping it
    #[arg(long = "keep-id")]
    pub keep_id: bool,
    /// How camelCase headers become schema field names
    #[arg(long = "name-strategy", value_enum, default_value = "fold")]
    pub name_strategy: NameStrategyArg,
    /// Keep header capitalization in schema field names
    #[arg(long = "maintain-case")]
    pub maintain_case: bool,
    /// Print the inferred columns as a table on stdout
    #[arg(long = "table")]
    pub table: bool,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct NamesArgs {
    /// Input CSV file whose headers should be normalized
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// How camelCase headers become field names
    #[arg(long = "name-strategy", value_enum, default_value = "fold")]
    pub name_strategy: NameStrategyArg,
    /// Keep header capitalization in field names
    #[arg(long = "maintain-case")]
    pub maintain_case: bool,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct TemplateArgs {
    /// Data dictionary CSV with a `column` (or `field_name`) column
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Destination template (defaults to `<input>-headers.csv`)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// CSV delimiter character of the dictionary
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
}

#[derive(Debug, Args)]
pub struct ExportFieldsArgs {
    /// Data dictionary CSV to convert
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Destination JSON file (defaults to `<input>-fields.json`)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// CSV delimiter character of the dictionary
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
}

#[derive(Debug, Args)]
pub struct ImportFieldsArgs {
    /// Catalog fields JSON to convert
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Destination data dictionary (defaults to `<input>-data-dictionary.csv`)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
