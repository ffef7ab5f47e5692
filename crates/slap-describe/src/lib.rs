//! Turns coded clinical columns into human-readable descriptions.
//!
//! [`Resolver`] maps sequences of codes through the lookup tables of a
//! [`slap_lookup::LookupStore`]; [`Describer`] applies the configured column
//! mappings of a clinical table to a polars `DataFrame`.

#![deny(unsafe_code)]

pub mod describer;
pub mod error;
pub mod frame;
pub mod mappings;
pub mod resolver;

pub use crate::describer::{DescribeOptions, Describer};
pub use crate::error::{DescribeError, Result};
pub use crate::frame::{any_to_code, column_codes};
pub use crate::mappings::{
    ColumnMapping, ColumnMappings, DESCRIPTION_SUFFIX, HistologyMapping, TableMappings,
};
pub use crate::resolver::{
    MORPHOLOGY_WIDTH, MULTI_DESCRIPTION_SEPARATOR, MULTI_VALUE_SEPARATOR, Resolver,
};
