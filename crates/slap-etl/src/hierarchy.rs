//! Shared machinery for classification dumps with category headers.
//!
//! A line starting with `(` opens a broad category, e.g.
//! `(C50) Malignant neoplasm of breast`. Every following line is a record
//! belonging to that category until the next header.

use crate::error::EtlError;

/// Qualifier words dropped when building a short description.
pub const STOP_WORDS: [&str; 11] = [
    "benign",
    "malignant",
    "metastatic",
    "NOS",
    "uncertain",
    "whether",
    "or",
    "in",
    "situ",
    "borderline",
    "malignancy",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Category {
    pub code: String,
    pub description: String,
}

/// Concise rendering of a classification description.
///
/// Words are split on single spaces; a word is dropped when, ignoring
/// trailing commas, it is a stop word. Trailing commas and whitespace are
/// removed from the result.
///
/// ```
/// use slap_etl::short_description;
///
/// assert_eq!(short_description("Neoplasm, benign"), "Neoplasm");
/// assert_eq!(short_description("Carcinoma in situ, NOS"), "Carcinoma");
/// ```
pub fn short_description(description: &str) -> String {
    let kept: Vec<&str> = description
        .split(' ')
        .filter(|word| !STOP_WORDS.contains(&word.trim_end_matches(',')))
        .collect();
    kept.join(" ")
        .trim_end_matches(|c: char| c == ',' || c.is_whitespace())
        .to_string()
}

fn parse_header(line: &str, line_no: usize) -> Result<Category, EtlError> {
    let body = line.trim_start().trim_start_matches('(');
    let close = body
        .find(')')
        .ok_or_else(|| EtlError::malformed(line_no, "category header without closing `)`"))?;
    Ok(Category {
        code: body[..close].trim().to_string(),
        description: body[close + 1..].trim().to_string(),
    })
}

/// Walk a dump, handing every record line to `on_record` together with the
/// active category. Blank lines are ignored.
pub(crate) fn walk_records<F>(input: &str, mut on_record: F) -> Result<(), EtlError>
where
    F: FnMut(usize, &Category, &str) -> Result<(), EtlError>,
{
    let mut category = Category::default();
    for (idx, raw) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_end();
        if line.trim().is_empty() {
            continue;
        }
        if line.trim_start().starts_with('(') {
            category = parse_header(line, line_no)?;
            continue;
        }
        on_record(line_no, &category, line)?;
    }
    Ok(())
}
