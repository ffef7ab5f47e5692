//! Clinical table extracts on disk.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use slap_describe::{DescribeOptions, Describer};
use slap_model::ClinicalTable;
use tracing::{debug, info};

use crate::error::{IngestError, Result};

/// File name prefix of the simulated release extracts (`sim_av_patient.csv`).
pub const DEFAULT_TABLE_PREFIX: &str = "sim_";

pub fn table_path(folder: &Path, prefix: &str, table: ClinicalTable) -> PathBuf {
    folder.join(format!("{prefix}{}.csv", table.as_str()))
}

/// Read a CSV file with every column as text, so codes such as `01` keep
/// their exact spelling.
pub fn read_clinical_csv(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(IngestError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let read_error = |source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    };
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(read_error)?
        .finish()
        .map_err(read_error)?;
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read CSV"
    );
    Ok(df)
}

/// Load one clinical table from `<folder>/<prefix><table>.csv`.
pub fn load_table(folder: &Path, prefix: &str, table: ClinicalTable) -> Result<DataFrame> {
    let path = table_path(folder, prefix, table);
    let df = read_clinical_csv(&path)?;
    info!(%table, rows = df.height(), "loaded clinical table");
    Ok(df)
}

/// Load every known clinical table; stops at the first failure.
pub fn all_tables(folder: &Path, prefix: &str) -> Result<BTreeMap<ClinicalTable, DataFrame>> {
    ClinicalTable::ALL
        .iter()
        .map(|&table| load_table(folder, prefix, table).map(|df| (table, df)))
        .collect()
}

/// Load one clinical table and append its description columns.
pub fn load_described_table(
    folder: &Path,
    prefix: &str,
    table: ClinicalTable,
    describer: &mut Describer,
    options: DescribeOptions<'_>,
) -> Result<DataFrame> {
    let mut df = load_table(folder, prefix, table)?;
    describer
        .apply(&mut df, table.as_str(), options)
        .map_err(|source| IngestError::Describe {
            table: table.as_str().to_string(),
            source,
        })?;
    Ok(df)
}

/// Load every known clinical table with all of its mapped columns described.
pub fn all_described_tables(
    folder: &Path,
    prefix: &str,
    describer: &mut Describer,
) -> Result<BTreeMap<ClinicalTable, DataFrame>> {
    let mut tables = BTreeMap::new();
    for table in ClinicalTable::ALL {
        let options = DescribeOptions::default();
        let df = load_described_table(folder, prefix, table, describer, options)?;
        tables.insert(table, df);
    }
    Ok(tables)
}

/// Write a frame as CSV with a header row, creating parent directories.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| IngestError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let mut file = File::create(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .map_err(|source| IngestError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), rows = df.height(), "wrote CSV");
    Ok(())
}
