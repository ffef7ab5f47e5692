//! Clinical table loading: the collaborator that hands frames to
//! `slap-describe` and writes the described result back out.

#![deny(unsafe_code)]

pub mod error;
pub mod loader;

pub use crate::error::{IngestError, Result};
pub use crate::loader::{
    DEFAULT_TABLE_PREFIX, all_described_tables, all_tables, load_described_table, load_table,
    read_clinical_csv, table_path, write_csv,
};
