use polars::prelude::PolarsError;
use slap_lookup::StoreError;
use slap_model::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum DescribeError {
    /// Unknown lookup name, unsupported lookup or unknown clinical table.
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("column '{column}' of {table} has no lookup mapping")]
    UnknownColumn { table: String, column: String },

    #[error("column '{column}' is mapped for {table} but missing from the data")]
    MissingColumn { table: String, column: String },

    #[error("output column '{column}' already exists")]
    DescriptionColumnExists { column: String },

    #[error("morphology and behaviour inputs differ in length: {morphology} vs {behaviour}")]
    LengthMismatch { morphology: usize, behaviour: usize },

    #[error("failed to read file {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid column mapping configuration {origin}: {message}")]
    Config { origin: String, message: String },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl DescribeError {
    pub(crate) fn config(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            origin: origin.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DescribeError>;
