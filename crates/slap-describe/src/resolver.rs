//! Code -> description resolution against the lookup store.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use slap_lookup::LookupStore;
use slap_model::{LookupKey, LookupName, LookupTable, ModelError, Resolution};
use tracing::debug;

use crate::error::{DescribeError, Result};

/// Separator between codes of a multi-valued cell.
pub const MULTI_VALUE_SEPARATOR: char = ',';

/// Separator between the resolved descriptions of a multi-valued cell.
pub const MULTI_DESCRIPTION_SEPARATOR: &str = ";";

/// Width of the morphology part of a combined histology code.
pub const MORPHOLOGY_WIDTH: usize = 4;

/// Resolves sequences of codes, loading each lookup table on first use.
///
/// Every operation is positional: output `i` describes input `i`, and a code
/// with no matching row (or a missing code) yields `None` rather than an
/// error.
#[derive(Debug)]
pub struct Resolver {
    store: LookupStore,
    tables: HashMap<LookupName, LookupTable>,
}

impl Resolver {
    pub fn new(store: LookupStore) -> Self {
        Self {
            store,
            tables: HashMap::new(),
        }
    }

    pub fn store(&self) -> &LookupStore {
        &self.store
    }

    /// Number of lookup tables loaded so far.
    pub fn loaded(&self) -> usize {
        self.tables.len()
    }

    fn table(&mut self, name: LookupName) -> Result<&LookupTable> {
        match self.tables.entry(name) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let table = self.store.load(name)?;
                Ok(entry.insert(table))
            }
        }
    }

    /// Resolve codes through a lookup name or route alias
    /// (`DEATHCAUSE`, `HISTOLOGY`).
    pub fn resolve(&mut self, codes: &[Option<String>], lookup: &str) -> Result<Vec<Option<String>>> {
        let route: Resolution = lookup.parse()?;
        self.resolve_route(codes, route)
    }

    pub fn resolve_route(
        &mut self,
        codes: &[Option<String>],
        route: Resolution,
    ) -> Result<Vec<Option<String>>> {
        match route {
            Resolution::Flat(name) => self.resolve_flat(codes, name),
            Resolution::MultiValued(name) => self.resolve_multi_valued(codes, name),
            Resolution::Histology => self.resolve_composite_combined(codes),
        }
    }

    /// One code per cell, matched exactly against the key column.
    pub fn resolve_flat(
        &mut self,
        codes: &[Option<String>],
        name: LookupName,
    ) -> Result<Vec<Option<String>>> {
        if let Some(alternative) = name.flat_alternative() {
            return Err(ModelError::UnsupportedLookup {
                name: name.as_str().to_string(),
                alternative,
            }
            .into());
        }
        let table = self.table(name)?;
        let resolved: Vec<Option<String>> = codes
            .iter()
            .map(|code| {
                code.as_deref()
                    .and_then(|code| table.get_code(code))
                    .and_then(|record| record.flat_description())
                    .map(str::to_string)
            })
            .collect();
        debug!(
            lookup = %name,
            codes = codes.len(),
            matched = resolved.iter().filter(|d| d.is_some()).count(),
            "resolved flat codes"
        );
        Ok(resolved)
    }

    /// Comma-separated codes per cell. Each piece is trimmed and resolved on
    /// its own; the descriptions found are joined with `;`. The result is
    /// never `None`: a missing or wholly unresolved cell becomes `""`.
    pub fn resolve_multi_valued(
        &mut self,
        codes: &[Option<String>],
        name: LookupName,
    ) -> Result<Vec<Option<String>>> {
        if !name.is_multi_valued_capable() {
            return Err(ModelError::UnsupportedLookup {
                name: name.as_str().to_string(),
                alternative: "single-code resolution",
            }
            .into());
        }
        let table = self.table(name)?;
        Ok(codes
            .iter()
            .map(|cell| {
                let descriptions: Vec<&str> = cell
                    .as_deref()
                    .unwrap_or_default()
                    .split(MULTI_VALUE_SEPARATOR)
                    .map(str::trim)
                    .filter(|piece| !piece.is_empty())
                    .filter_map(|piece| table.get_code(piece))
                    .filter_map(|record| record.flat_description())
                    .collect();
                Some(descriptions.join(MULTI_DESCRIPTION_SEPARATOR))
            })
            .collect())
    }

    /// Parallel morphology and behaviour codes against the histology table.
    pub fn resolve_composite(
        &mut self,
        morphology: &[Option<String>],
        behaviour: &[Option<String>],
    ) -> Result<Vec<Option<String>>> {
        if morphology.len() != behaviour.len() {
            return Err(DescribeError::LengthMismatch {
                morphology: morphology.len(),
                behaviour: behaviour.len(),
            });
        }
        let table = self.table(LookupName::HistologyLookup)?;
        Ok(morphology
            .iter()
            .zip(behaviour)
            .map(|pair| match pair {
                (Some(morphology), Some(behaviour)) => table
                    .get(&LookupKey::composite(morphology.as_str(), behaviour.as_str()))
                    .and_then(|record| record.composite_description())
                    .map(str::to_string),
                _ => None,
            })
            .collect())
    }

    /// Combined histology codes: the first four characters are the
    /// morphology, the rest the behaviour (`81403` -> `8140` + `3`).
    pub fn resolve_composite_combined(
        &mut self,
        codes: &[Option<String>],
    ) -> Result<Vec<Option<String>>> {
        let (morphology, behaviour): (Vec<_>, Vec<_>) = codes
            .iter()
            .map(|code| match code {
                Some(code) => {
                    let split = code
                        .char_indices()
                        .nth(MORPHOLOGY_WIDTH)
                        .map_or(code.len(), |(idx, _)| idx);
                    (
                        Some(code[..split].to_string()),
                        Some(code[split..].to_string()),
                    )
                }
                None => (None, None),
            })
            .unzip();
        self.resolve_composite(&morphology, &behaviour)
    }
}
