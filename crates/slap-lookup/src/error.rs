use std::path::PathBuf;

use slap_model::LookupName;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("lookup table '{name}' not found: the file {path} does not exist")]
    NotFound { name: LookupName, path: PathBuf },

    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write file {path}: {source}")]
    WriteIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("failed to write CSV {path}: {message}")]
    Write { path: PathBuf, message: String },

    #[error("lookup file {path} has no key column {column}")]
    MissingKeyColumn { path: PathBuf, column: String },

    #[error("lookup file {path} has neither a SHORTDESC nor a DESCRIPTION column")]
    MissingDescriptionColumn { path: PathBuf },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteIo {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, error: &csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            message: error.to_string(),
        }
    }
}
