use std::path::{Path, PathBuf};

use slap_lookup::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum EtlError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed input in {} at line {line}: {message}", origin(.path.as_deref()))]
    MalformedInput {
        path: Option<PathBuf>,
        line: usize,
        message: String,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn origin(path: Option<&Path>) -> String {
    path.map_or_else(|| "<input>".to_string(), |p| p.display().to_string())
}

impl EtlError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            path: None,
            line,
            message: message.into(),
        }
    }

    /// Attach the source file to a parse failure.
    #[must_use]
    pub(crate) fn in_file(self, file: &Path) -> Self {
        match self {
            Self::MalformedInput { line, message, .. } => Self::MalformedInput {
                path: Some(file.to_path_buf()),
                line,
                message,
            },
            other => other,
        }
    }
}

pub(crate) fn read_input(path: &Path) -> Result<String, EtlError> {
    std::fs::read_to_string(path).map_err(|e| EtlError::io(path, e))
}
