//! Lookup directory and file naming.

use std::path::PathBuf;

/// Environment variable for overriding the lookup directory.
pub const LOOKUP_DIR_ENV_VAR: &str = "SLAP_LOOKUP_DIR";

/// Directory used when neither a flag nor the environment names one.
pub const DEFAULT_LOOKUP_DIR: &str = "lookup_tables";

/// File name prefix of every canonical lookup file (`zsex.csv`).
pub const DEFAULT_LOOKUP_PREFIX: &str = "z";

pub const LOOKUP_EXTENSION: &str = "csv";

/// Get the lookup directory.
///
/// Resolution order:
/// 1. `SLAP_LOOKUP_DIR` environment variable
/// 2. `lookup_tables/` relative to the working directory
pub fn default_lookup_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(LOOKUP_DIR_ENV_VAR) {
        return PathBuf::from(dir);
    }
    PathBuf::from(DEFAULT_LOOKUP_DIR)
}

/// `<prefix><lowercase name>.csv`
pub(crate) fn lookup_file_name(prefix: &str, name: &str) -> String {
    format!("{prefix}{}.{LOOKUP_EXTENSION}", name.to_ascii_lowercase())
}
