//! Loads canonical lookup files into [`LookupTable`]s.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use slap_model::{
    DESCRIPTION_COLUMN, LookupKey, LookupName, LookupRecord, LookupTable,
    SHORT_DESCRIPTION_COLUMN,
};
use tracing::{debug, warn};

use crate::canonical::{CanonicalTable, read_canonical, write_canonical};
use crate::error::StoreError;
use crate::paths::{DEFAULT_LOOKUP_PREFIX, default_lookup_dir, lookup_file_name};

/// A directory of canonical lookup files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupStore {
    dir: PathBuf,
    prefix: String,
}

/// Whether a registered lookup has a file in the store.
#[derive(Debug, Clone)]
pub struct LookupStatus {
    pub name: LookupName,
    pub path: PathBuf,
    pub present: bool,
}

impl Default for LookupStore {
    fn default() -> Self {
        Self::new(default_lookup_dir())
    }
}

impl LookupStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: DEFAULT_LOOKUP_PREFIX.to_string(),
        }
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn path_for(&self, name: LookupName) -> PathBuf {
        self.dir.join(lookup_file_name(&self.prefix, name.as_str()))
    }

    /// Load a registered lookup table.
    ///
    /// A missing file is reported as [`StoreError::NotFound`] with the
    /// expected path, separately from other read failures.
    pub fn load(&self, name: LookupName) -> Result<LookupTable, StoreError> {
        let path = self.path_for(name);
        if !path.is_file() {
            return Err(StoreError::NotFound { name, path });
        }
        let canonical = read_canonical(&path)?;
        let table = build_lookup_table(name, &canonical, &path)?;
        debug!(
            lookup = %name,
            path = %path.display(),
            rows = table.len(),
            "loaded lookup table"
        );
        Ok(table)
    }

    /// Write a canonical table to the file of `name`, overwriting it.
    pub fn write(&self, name: LookupName, table: &CanonicalTable) -> Result<PathBuf, StoreError> {
        let path = self.path_for(name);
        write_canonical(&path, table)?;
        debug!(
            lookup = %name,
            path = %path.display(),
            rows = table.rows.len(),
            "wrote lookup table"
        );
        Ok(path)
    }

    pub fn status(&self) -> Vec<LookupStatus> {
        LookupName::ALL
            .iter()
            .map(|&name| {
                let path = self.path_for(name);
                let present = path.is_file();
                LookupStatus {
                    name,
                    path,
                    present,
                }
            })
            .collect()
    }
}

fn required_index(
    canonical: &CanonicalTable,
    column: &str,
    path: &Path,
) -> Result<usize, StoreError> {
    canonical
        .column_index(column)
        .ok_or_else(|| StoreError::MissingKeyColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })
}

fn non_empty(row: &[String], idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| row.get(i))
        .filter(|value| !value.is_empty())
        .cloned()
}

/// Index a canonical table by the key column(s) of `name`.
pub(crate) fn build_lookup_table(
    name: LookupName,
    canonical: &CanonicalTable,
    path: &Path,
) -> Result<LookupTable, StoreError> {
    let key_indices = name
        .key_columns()
        .iter()
        .map(|column| required_index(canonical, column, path))
        .collect::<Result<Vec<_>, _>>()?;

    let idx_short = canonical.column_index(SHORT_DESCRIPTION_COLUMN);
    let idx_full = canonical.column_index(DESCRIPTION_COLUMN);
    if idx_short.is_none() && idx_full.is_none() {
        return Err(StoreError::MissingDescriptionColumn {
            path: path.to_path_buf(),
        });
    }

    let mut table = LookupTable::new(name, canonical.headers.clone());
    let mut duplicates = 0usize;
    for row in &canonical.rows {
        let cell = |idx: usize| row.get(idx).cloned().unwrap_or_default();
        let key = match key_indices.as_slice() {
            [first, second] => LookupKey::composite(cell(*first), cell(*second)),
            [only] => LookupKey::single(cell(*only)),
            _ => continue,
        };

        let mut fields = BTreeMap::new();
        for (idx, header) in canonical.headers.iter().enumerate() {
            if key_indices.contains(&idx) {
                continue;
            }
            fields.insert(header.clone(), cell(idx));
        }
        let record = LookupRecord {
            short_description: non_empty(row, idx_short),
            full_description: non_empty(row, idx_full),
            fields,
        };

        if !table.insert(key.clone(), record) {
            duplicates += 1;
            warn!(lookup = %name, key = ?key, "duplicate lookup key, keeping first row");
        }
    }

    if duplicates > 0 {
        debug!(lookup = %name, duplicates, "dropped duplicate lookup rows");
    }
    Ok(table)
}
