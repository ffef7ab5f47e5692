use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::lookup::LookupName;

/// Column holding the concise, stop-word-stripped description.
pub const SHORT_DESCRIPTION_COLUMN: &str = "SHORTDESC";

/// Column holding the full description (composite tables).
pub const DESCRIPTION_COLUMN: &str = "DESCRIPTION";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum LookupKey {
    Single(String),
    Composite(String, String),
}

impl LookupKey {
    pub fn single(code: impl Into<String>) -> Self {
        LookupKey::Single(code.into())
    }

    pub fn composite(first: impl Into<String>, second: impl Into<String>) -> Self {
        LookupKey::Composite(first.into(), second.into())
    }
}

/// One row of a lookup table, minus its key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LookupRecord {
    pub short_description: Option<String>,
    pub full_description: Option<String>,
    /// Every non-key column, including the two description columns.
    pub fields: BTreeMap<String, String>,
}

impl LookupRecord {
    /// Description used by direct single-key resolution.
    pub fn flat_description(&self) -> Option<&str> {
        self.short_description
            .as_deref()
            .or(self.full_description.as_deref())
    }

    /// Description used by composite resolution.
    pub fn composite_description(&self) -> Option<&str> {
        self.full_description
            .as_deref()
            .or(self.short_description.as_deref())
    }

    pub fn field(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

/// An immutable code -> description table.
#[derive(Debug, Clone)]
pub struct LookupTable {
    name: LookupName,
    key_columns: Vec<String>,
    columns: Vec<String>,
    rows: HashMap<LookupKey, LookupRecord>,
}

impl LookupTable {
    pub fn new(name: LookupName, columns: Vec<String>) -> Self {
        Self {
            name,
            key_columns: name.key_columns(),
            columns,
            rows: HashMap::new(),
        }
    }

    /// Adds a row; the first row seen for a key is kept.
    ///
    /// Returns `false` when the key was already present.
    pub fn insert(&mut self, key: LookupKey, record: LookupRecord) -> bool {
        if self.rows.contains_key(&key) {
            return false;
        }
        self.rows.insert(key, record);
        true
    }

    pub fn get(&self, key: &LookupKey) -> Option<&LookupRecord> {
        self.rows.get(key)
    }

    pub fn get_code(&self, code: &str) -> Option<&LookupRecord> {
        self.rows.get(&LookupKey::single(code))
    }

    pub fn name(&self) -> LookupName {
        self.name
    }

    pub fn key_columns(&self) -> &[String] {
        &self.key_columns
    }

    /// All columns of the source file, in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &LookupKey> {
        self.rows.keys()
    }
}
