pub mod admit;
pub mod candidates;
pub mod cli;
pub mod dictionary;
pub mod dictionary_cmd;
pub mod error;
pub mod field_type;
pub mod frame;
pub mod infer;
pub mod io_utils;
pub mod naming;
pub mod overrides;
pub mod report;
pub mod schema;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info, warn};

use crate::{
    cli::{Cli, Commands},
    dictionary::{DictionaryRow, sibling_path},
    frame::Table,
    infer::InferOptions,
    naming::{CaseStyle, NameStrategy},
    overrides::OverrideRules,
    report::InferenceReport,
    schema::Schema,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("lil_lex", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Infer(args) => handle_infer(&args),
        Commands::Names(args) => handle_names(&args),
        Commands::Template(args) => dictionary_cmd::template(&args),
        Commands::ExportFields(args) => dictionary_cmd::export_fields(&args),
        Commands::ImportFields(args) => dictionary_cmd::import_fields(&args),
    }
}

fn handle_infer(args: &cli::InferArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    info!(
        "Inferring column types for '{}' with delimiter '{}'",
        args.input.display(),
        printable_delimiter(delimiter)
    );
    let options = InferOptions {
        sample_rows: args.sample_rows,
        drop_ckan_id: !args.keep_id,
        overrides: OverrideRules::default(),
    };
    let table = Table::read(&args.input, delimiter, encoding, options.sample_rows)
        .with_context(|| format!("Reading {:?}", args.input))?;
    debug!("Headers: {:?}", table.headers);
    let profiles = infer::infer_table(table, &options)
        .with_context(|| format!("Inferring column types for {:?}", args.input))?;
    let report = InferenceReport::new(profiles);
    report.log_summary();

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| sibling_path(&args.input, "-data-dictionary.csv"));
    let rows = DictionaryRow::from_report(&report);
    dictionary::write_dictionary(&output, &rows)
        .with_context(|| format!("Writing data dictionary to {output:?}"))?;
    info!(
        "Data dictionary for {} column(s) written to {:?}",
        rows.len(),
        output
    );

    if let Some(schema_path) = &args.schema {
        let schema = Schema::from_report(
            &report,
            NameStrategy::from(args.name_strategy),
            args.maintain_case,
        )
        .context("Building schema from inferred columns")?;
        schema
            .save(schema_path)
            .with_context(|| format!("Writing schema to {schema_path:?}"))?;
        info!("Schema written to {:?}", schema_path);
    }

    if args.table {
        print!("{}", table::render_report(&report));
    }
    Ok(())
}

fn handle_names(args: &cli::NamesArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let mut reader = io_utils::open_csv_reader_from_path(&args.input, delimiter, true)?;
    let headers = io_utils::reader_headers(&mut reader, encoding)
        .with_context(|| format!("Reading headers from {:?}", args.input))?;
    let names = naming::derive_all(
        &headers,
        NameStrategy::from(args.name_strategy),
        args.maintain_case,
    );

    let table_headers = ["#", "header", "case", "load", "dump"]
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();
    let rows = names
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            if entry.style == CaseStyle::Unknown {
                warn!("Header '{}' has unrecognized casing", entry.raw);
            }
            vec![
                (idx + 1).to_string(),
                entry.raw.clone(),
                entry.style.to_string(),
                entry.load.clone(),
                entry.dump.clone(),
            ]
        })
        .collect::<Vec<_>>();
    table::print_table(&table_headers, &rows);

    naming::ensure_unique_dump_names(&names)
        .with_context(|| format!("Normalizing headers of {:?}", args.input))?;
    info!("Normalized {} header(s) from {:?}", names.len(), args.input);
    Ok(())
}

fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        other => (other as char).to_string(),
    }
}
