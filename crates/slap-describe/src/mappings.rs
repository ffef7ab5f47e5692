//! Declarative column -> lookup associations per clinical table.
//!
//! The default associations ship inside the binary; a replacement document
//! with the same shape can be loaded from disk:
//!
//! ```toml
//! [[tables]]
//! name = "av_tumour"
//! histology = { morphology = "MORPH_ICD10_O2", behaviour = "BEHAVIOUR_ICD10_O2" }
//! columns = [{ column = "GRADE", lookup = "GRADE" }]
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use slap_model::{ClinicalTable, ModelError, Resolution};

use crate::error::{DescribeError, Result};

const EMBEDDED_MAPPINGS: &str = include_str!("../config/column_mappings.toml");
const EMBEDDED_ORIGIN: &str = "<embedded column_mappings.toml>";

/// Suffix of every appended description column.
pub const DESCRIPTION_SUFFIX: &str = "_DESC";

fn default_histology_output() -> String {
    "HISTOLOGY_DESC".to_string()
}

/// Source columns of the composite histology description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HistologyMapping {
    pub morphology: String,
    pub behaviour: String,
    #[serde(default = "default_histology_output")]
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnMapping {
    pub column: String,
    #[serde(rename = "lookup")]
    pub route: Resolution,
}

impl ColumnMapping {
    pub fn output_column(&self) -> String {
        format!("{}{DESCRIPTION_SUFFIX}", self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMappings {
    pub table: ClinicalTable,
    pub columns: Vec<ColumnMapping>,
    pub histology: Option<HistologyMapping>,
}

impl TableMappings {
    pub fn column(&self, name: &str) -> Option<&ColumnMapping> {
        self.columns.iter().find(|mapping| mapping.column == name)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MappingDocument {
    #[serde(default)]
    tables: Vec<TableDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TableDocument {
    name: String,
    #[serde(default)]
    histology: Option<HistologyMapping>,
    #[serde(default)]
    columns: Vec<ColumnDocument>,
}

/// Kept as text until validation so errors can name the table and column.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ColumnDocument {
    column: String,
    lookup: String,
}

/// Column mappings for every configured clinical table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMappings {
    tables: BTreeMap<ClinicalTable, TableMappings>,
}

impl ColumnMappings {
    /// The associations compiled into the crate.
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(EMBEDDED_MAPPINGS, EMBEDDED_ORIGIN)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| DescribeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, &path.display().to_string())
    }

    /// Parse and validate a mapping document. `origin` names it in errors.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self> {
        let document: MappingDocument =
            toml::from_str(text).map_err(|e| DescribeError::config(origin, e.to_string()))?;

        let mut tables = BTreeMap::new();
        for entry in document.tables {
            let table: ClinicalTable = entry
                .name
                .parse()
                .map_err(|e: ModelError| DescribeError::config(origin, e.to_string()))?;
            if tables.contains_key(&table) {
                return Err(DescribeError::config(
                    origin,
                    format!("table {table} is configured twice"),
                ));
            }

            let mut seen = BTreeSet::new();
            let mut columns = Vec::with_capacity(entry.columns.len());
            for column in entry.columns {
                if !seen.insert(column.column.clone()) {
                    return Err(DescribeError::config(
                        origin,
                        format!("column {} of {table} is configured twice", column.column),
                    ));
                }
                let route: Resolution = column.lookup.parse().map_err(|e: ModelError| {
                    DescribeError::config(
                        origin,
                        format!("column {} of {table}: {e}", column.column),
                    )
                })?;
                columns.push(ColumnMapping {
                    column: column.column,
                    route,
                });
            }

            tables.insert(
                table,
                TableMappings {
                    table,
                    columns,
                    histology: entry.histology,
                },
            );
        }
        Ok(Self { tables })
    }

    /// Mappings of a clinical table given by name (case-insensitive).
    pub fn table(&self, name: &str) -> Result<&TableMappings> {
        let table: ClinicalTable = name.parse()?;
        self.tables.get(&table).ok_or_else(|| {
            ModelError::UnknownTable {
                name: name.to_string(),
                known: self
                    .tables
                    .keys()
                    .map(|table| table.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            }
            .into()
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableMappings> {
        self.tables.values()
    }
}

#[cfg(test)]
mod tests {
    use slap_model::LookupName;

    use super::*;

    #[test]
    fn embedded_mappings_cover_every_clinical_table() {
        let mappings = ColumnMappings::embedded().unwrap();
        assert_eq!(mappings.tables().count(), ClinicalTable::ALL.len());

        let patient = mappings.table("AV_PATIENT").unwrap();
        assert_eq!(
            patient.column("DEATHCAUSECODE_1A").unwrap().route,
            Resolution::MultiValued(LookupName::IcdFull)
        );
        assert!(patient.histology.is_none());

        let tumour = mappings.table("av_tumour").unwrap();
        assert_eq!(tumour.columns.len(), 18);
        assert_eq!(
            tumour.histology.as_ref().map(|h| h.output.as_str()),
            Some("HISTOLOGY_DESC")
        );

        let sact = mappings.table("sact_tumour").unwrap();
        assert_eq!(
            sact.column("MORPHOLOGY_CLEAN").unwrap().route,
            Resolution::Histology
        );
        assert!(mappings.table("sact_patient").unwrap().columns.is_empty());
    }

    #[test]
    fn rejects_unsupported_lookup_in_document() {
        let text = r#"
[[tables]]
name = "av_tumour"
columns = [{ column = "SITE", lookup = "icdclassification" }]
"#;
        let err = ColumnMappings::from_toml_str(text, "test").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("SITE"), "{message}");
        assert!(message.contains("icd"), "{message}");
    }

    #[test]
    fn rejects_duplicate_columns() {
        let text = r#"
[[tables]]
name = "sact_cycle"
columns = [
    { column = "A", lookup = "performance" },
    { column = "A", lookup = "sex" },
]
"#;
        assert!(matches!(
            ColumnMappings::from_toml_str(text, "test"),
            Err(DescribeError::Config { .. })
        ));
    }

    #[test]
    fn table_missing_from_document_is_unknown() {
        let text = "[[tables]]\nname = \"sact_cycle\"\n";
        let mappings = ColumnMappings::from_toml_str(text, "test").unwrap();
        assert!(matches!(
            mappings.table("av_patient"),
            Err(DescribeError::Model(ModelError::UnknownTable { .. }))
        ));
    }
}
