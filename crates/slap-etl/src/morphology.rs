//! ICD-O-2 morphology dump -> `zmorphology.csv`.
//!
//! Records are fixed width: `M8140/3 Adenocarcinoma, NOS` holds the
//! morphology id in columns 1-4, the behaviour flag in column 6 and the
//! description from column 8 on. One morphology id appears once per
//! behaviour, so the output joins the distinct short descriptions of an id
//! with `/`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use slap_lookup::{CanonicalTable, LookupStore};
use slap_model::{LookupName, SHORT_DESCRIPTION_COLUMN};
use tracing::info;

use crate::error::{EtlError, read_input};
use crate::hierarchy::{short_description, walk_records};

const MIN_RECORD_WIDTH: usize = 8;

#[derive(Debug, Default)]
struct MorphologyEntry {
    group: String,
    group_description: String,
    short_descriptions: Vec<String>,
}

/// Build the morphology lookup table from a classification dump.
///
/// Rows are sorted by morphology id; the group columns come from the first
/// record of each id.
pub fn parse_morphology(input: &str) -> Result<CanonicalTable, EtlError> {
    let mut entries: BTreeMap<String, MorphologyEntry> = BTreeMap::new();

    walk_records(input, |line_no, category, line| {
        let chars: Vec<char> = line.chars().collect();
        if chars.len() < MIN_RECORD_WIDTH {
            return Err(EtlError::malformed(
                line_no,
                format!("record shorter than {MIN_RECORD_WIDTH} characters"),
            ));
        }
        let morphology: String = chars[1..5].iter().collect();
        let description: String = chars[MIN_RECORD_WIDTH..].iter().collect();
        let short = short_description(description.trim());

        let entry = entries
            .entry(morphology)
            .or_insert_with(|| MorphologyEntry {
                group: category.code.clone(),
                group_description: category.description.clone(),
                short_descriptions: Vec::new(),
            });
        if !short.is_empty() && !entry.short_descriptions.contains(&short) {
            entry.short_descriptions.push(short);
        }
        Ok(())
    })?;

    let mut table = CanonicalTable::new(vec![
        LookupName::Morphology.key_columns().remove(0),
        "MORPH_GROUP".to_string(),
        "MORPH_GROUP_DESC".to_string(),
        SHORT_DESCRIPTION_COLUMN.to_string(),
    ]);
    for (morphology, entry) in entries {
        table.push_row(vec![
            morphology,
            entry.group,
            entry.group_description,
            entry.short_descriptions.join("/"),
        ]);
    }
    Ok(table)
}

/// Convert a morphology dump file and write `zmorphology.csv`.
pub fn convert_morphology_file(input: &Path, store: &LookupStore) -> Result<PathBuf, EtlError> {
    let text = read_input(input)?;
    let table = parse_morphology(&text).map_err(|e| e.in_file(input))?;
    let path = store.write(LookupName::Morphology, &table)?;
    info!(
        rows = table.rows.len(),
        input = %input.display(),
        output = %path.display(),
        "converted morphology dump"
    );
    Ok(path)
}
