use thiserror::Error;

/// Structural problems that stop inference outright. Bad individual values
/// never end up here; they only eliminate candidate types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InferError {
    #[error("Input has no columns to infer")]
    NoColumns,
    #[error("Input has a header but no data rows")]
    NoRows,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NamingError {
    #[error("Headers '{first}' and '{second}' both normalize to '{name}'")]
    DuplicateTargetName {
        name: String,
        first: String,
        second: String,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DictionaryError {
    #[error("Data dictionary has no '{column}' column (expected one of: column, field_name)")]
    MissingColumn { column: String },
    #[error("Data dictionary has no rows")]
    Empty,
}
