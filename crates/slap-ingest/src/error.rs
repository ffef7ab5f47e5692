use std::path::PathBuf;

use polars::prelude::PolarsError;
use slap_describe::DescribeError;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("the file {path} does not exist")]
    NotFound { path: PathBuf },

    #[error("failed to read CSV {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("failed to write CSV {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("failed to create file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to describe {table}: {source}")]
    Describe {
        table: String,
        #[source]
        source: DescribeError,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
