//! The canonical flat-file representation of a lookup table.
//!
//! One header row, `"`-quoted text where the CSV rules need it, and the key
//! column(s) first. Everything is kept as text so fixed-width codes such as
//! `01` survive a round trip.

use std::io;
use std::path::Path;

use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};

use crate::error::StoreError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CanonicalTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Serializes the table using the canonical quoting convention.
    pub fn write_to<W: io::Write>(&self, writer: W) -> csv::Result<()> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Necessary)
            .from_writer(writer);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> csv::Result<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

fn normalize_cell(raw: &str) -> String {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .to_string()
}

/// Read a canonical lookup file.
///
/// Handles BOM characters and trims whitespace from headers and values.
pub fn read_canonical(path: &Path) -> Result<CanonicalTable, StoreError> {
    let bytes = std::fs::read(path).map_err(|e| StoreError::io(path, e))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes.as_slice());

    let headers = reader
        .headers()
        .map_err(|e| StoreError::csv(path, &e))?
        .iter()
        .map(normalize_cell)
        .collect();

    let mut table = CanonicalTable::new(headers);
    for record in reader.records() {
        let record = record.map_err(|e| StoreError::csv(path, &e))?;
        table.push_row(record.iter().map(normalize_cell).collect());
    }
    Ok(table)
}

/// Write a canonical lookup file, replacing any previous version.
pub fn write_canonical(path: &Path, table: &CanonicalTable) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::write_io(parent, e))?;
    }
    let file = std::fs::File::create(path).map_err(|e| StoreError::write_io(path, e))?;
    table.write_to(file).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
