//! Lookup-table builders.
//!
//! Each converter turns one raw source format into the canonical flat table
//! read by [`slap_lookup::LookupStore`]. They run ahead of time, write once,
//! and overwrite their output on rerun.

#![deny(unsafe_code)]

pub mod error;
pub mod hierarchy;
pub mod icd;
pub mod morphology;
pub mod sql;

pub use crate::error::EtlError;
pub use crate::hierarchy::{STOP_WORDS, short_description};
pub use crate::icd::{IcdTables, convert_icd_file, parse_icd};
pub use crate::morphology::{convert_morphology_file, parse_morphology};
pub use crate::sql::{
    DEFAULT_SQL_PREFIX, SqlDump, SqlSource, convert_sql_dumps, convert_sql_file,
    parse_sql_inserts,
};
