//! Handlers for the dictionary conversion commands.

use anyhow::{Context, Result};
use log::{info, warn};

use crate::{
    cli::{ExportFieldsArgs, ImportFieldsArgs, TemplateArgs},
    dictionary::{self, sibling_path},
    io_utils,
};

pub fn template(args: &TemplateArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let rows = dictionary::read_dictionary(&args.input, delimiter)
        .with_context(|| format!("Reading data dictionary {:?}", args.input))?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| sibling_path(&args.input, "-headers.csv"));
    dictionary::write_template(&output, &rows)
        .with_context(|| format!("Writing template to {output:?}"))?;
    info!(
        "Template with {} header(s) generated from {:?} at {:?}",
        rows.len(),
        args.input,
        output
    );
    Ok(())
}

pub fn export_fields(args: &ExportFieldsArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let rows = dictionary::read_dictionary(&args.input, delimiter)
        .with_context(|| format!("Reading data dictionary {:?}", args.input))?;
    let (fields, override_attempts) = dictionary::to_catalog_fields(&rows);
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| sibling_path(&args.input, "-fields.json"));
    dictionary::save_catalog_fields(&output, &fields)
        .with_context(|| format!("Writing catalog fields to {output:?}"))?;
    info!("Wrote {} field(s) to {:?}", fields.len(), output);
    if override_attempts > 0 {
        warn!(
            "{} field(s) request a type override; the catalog only applies them after the resource is re-uploaded to its datastore",
            override_attempts
        );
    }
    Ok(())
}

pub fn import_fields(args: &ImportFieldsArgs) -> Result<()> {
    let fields = dictionary::load_catalog_fields(&args.input)
        .with_context(|| format!("Loading catalog fields from {:?}", args.input))?;
    let rows = dictionary::from_catalog_fields(&fields);
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| sibling_path(&args.input, "-data-dictionary.csv"));
    dictionary::write_catalog_dictionary(&output, &rows)
        .with_context(|| format!("Writing data dictionary to {output:?}"))?;
    info!("Wrote data dictionary with {} column(s) to {:?}", rows.len(), output);
    Ok(())
}
