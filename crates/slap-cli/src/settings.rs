//! Where lookup tables live.
//!
//! Precedence: `--lookup-dir` > `SLAP_LOOKUP_DIR` > `./lookup_tables`.

use std::path::PathBuf;

use slap_lookup::{DEFAULT_LOOKUP_PREFIX, LookupStore, default_lookup_dir};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupSettings {
    pub dir: PathBuf,
    pub prefix: String,
}

impl LookupSettings {
    pub fn resolve(dir: Option<PathBuf>, prefix: Option<String>) -> Self {
        Self {
            dir: dir.unwrap_or_else(default_lookup_dir),
            prefix: prefix.unwrap_or_else(|| DEFAULT_LOOKUP_PREFIX.to_string()),
        }
    }

    pub fn store(&self) -> LookupStore {
        LookupStore::new(&self.dir).with_prefix(&self.prefix)
    }
}
