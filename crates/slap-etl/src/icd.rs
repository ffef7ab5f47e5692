//! ICD-10 dump -> `zicdfull.csv` and `zicd3char.csv`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use slap_lookup::{CanonicalTable, LookupStore};
use slap_model::{LookupName, SHORT_DESCRIPTION_COLUMN};
use tracing::{debug, info};

use crate::error::{EtlError, read_input};
use crate::hierarchy::walk_records;

const THREE_CHAR_WIDTH: usize = 3;

/// The two tables built from one ICD-10 dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcdTables {
    /// `ZICDFULLID, ICD_GROUP, ICD_GROUP_DESC, ZICD3CHARID, ICD3CHAR_DESC, SHORTDESC`
    pub full: CanonicalTable,
    /// `ZICD3CHARID, SHORTDESC`
    pub three_char: CanonicalTable,
}

struct FullRow {
    code: String,
    group: String,
    group_description: String,
    three_char: String,
    description: String,
}

struct ThreeCharEntry {
    description: String,
    explicit: bool,
}

#[derive(Default)]
struct ThreeCharIndex {
    order: Vec<String>,
    entries: HashMap<String, ThreeCharEntry>,
}

impl ThreeCharIndex {
    fn record_explicit(&mut self, code: &str, description: &str) {
        match self.entries.get_mut(code) {
            Some(entry) if !entry.explicit => {
                entry.description = description.to_string();
                entry.explicit = true;
            }
            Some(_) => debug!(code, "repeated three-character code, keeping first"),
            None => self.push(code, description, true),
        }
    }

    fn record_derived(&mut self, code: &str, description: &str) {
        if !self.entries.contains_key(code) {
            self.push(code, description, false);
        }
    }

    fn push(&mut self, code: &str, description: &str, explicit: bool) {
        self.order.push(code.to_string());
        self.entries.insert(
            code.to_string(),
            ThreeCharEntry {
                description: description.to_string(),
                explicit,
            },
        );
    }

    fn description(&self, code: &str) -> String {
        self.entries
            .get(code)
            .map(|entry| entry.description.clone())
            .unwrap_or_default()
    }
}

/// Build the full-code and three-character tables from an ICD-10 dump.
///
/// A record's code is its first whitespace token with `.` removed and the
/// description is the remaining tokens joined by single spaces. Codes longer
/// than three characters whose prefix has no row yet contribute that prefix
/// to the three-character table; a later explicit three-character record
/// replaces the derived description.
pub fn parse_icd(input: &str) -> Result<IcdTables, EtlError> {
    let mut rows: Vec<FullRow> = Vec::new();
    let mut index = ThreeCharIndex::default();

    walk_records(input, |line_no, category, line| {
        let mut words = line.split_whitespace();
        let Some(raw_code) = words.next() else {
            return Ok(());
        };
        let code: String = raw_code.chars().filter(|&c| c != '.').collect();
        let description = words.collect::<Vec<_>>().join(" ");
        if description.is_empty() {
            return Err(EtlError::malformed(
                line_no,
                format!("code `{raw_code}` has no description"),
            ));
        }

        let prefix: String = code.chars().take(THREE_CHAR_WIDTH).collect();
        if prefix.chars().count() < THREE_CHAR_WIDTH {
            return Err(EtlError::malformed(
                line_no,
                format!("code `{raw_code}` is shorter than {THREE_CHAR_WIDTH} characters"),
            ));
        }
        if code.chars().count() == THREE_CHAR_WIDTH {
            index.record_explicit(&code, &description);
        } else {
            index.record_derived(&prefix, &description);
        }

        rows.push(FullRow {
            code,
            group: category.code.clone(),
            group_description: category.description.clone(),
            three_char: prefix,
            description,
        });
        Ok(())
    })?;

    let mut full = CanonicalTable::new(vec![
        LookupName::IcdFull.key_columns().remove(0),
        "ICD_GROUP".to_string(),
        "ICD_GROUP_DESC".to_string(),
        LookupName::Icd3Char.key_columns().remove(0),
        "ICD3CHAR_DESC".to_string(),
        SHORT_DESCRIPTION_COLUMN.to_string(),
    ]);
    for row in rows {
        let three_char_description = index.description(&row.three_char);
        full.push_row(vec![
            row.code,
            row.group,
            row.group_description,
            row.three_char,
            three_char_description,
            row.description,
        ]);
    }

    let mut three_char = CanonicalTable::new(vec![
        LookupName::Icd3Char.key_columns().remove(0),
        SHORT_DESCRIPTION_COLUMN.to_string(),
    ]);
    for code in &index.order {
        three_char.push_row(vec![code.clone(), index.description(code)]);
    }

    Ok(IcdTables { full, three_char })
}

/// Convert an ICD-10 dump file, writing both the full-code and the
/// three-character lookup files. Returns their paths in that order.
pub fn convert_icd_file(
    input: &Path,
    store: &LookupStore,
) -> Result<(PathBuf, PathBuf), EtlError> {
    let text = read_input(input)?;
    let tables = parse_icd(&text).map_err(|e| e.in_file(input))?;
    let full_path = store.write(LookupName::IcdFull, &tables.full)?;
    let three_char_path = store.write(LookupName::Icd3Char, &tables.three_char)?;
    info!(
        full_rows = tables.full.rows.len(),
        three_char_rows = tables.three_char.rows.len(),
        input = %input.display(),
        "converted ICD-10 dump"
    );
    Ok((full_path, three_char_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_three_char_record_replaces_derived_description() {
        let tables = parse_icd("(C50) Breast\nC50.1 Central portion\nC50 Malignant neoplasm of breast\n").unwrap();
        assert_eq!(
            tables.three_char.rows,
            vec![vec!["C50".to_string(), "Malignant neoplasm of breast".to_string()]]
        );
        assert_eq!(tables.full.rows[0][4], "Malignant neoplasm of breast");
    }

    #[test]
    fn short_code_is_malformed() {
        let err = parse_icd("(A00) Cholera\nA0 Bad\n").unwrap_err();
        assert!(matches!(err, EtlError::MalformedInput { line: 2, .. }));
    }
}
