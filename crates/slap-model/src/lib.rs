#![deny(unsafe_code)]

pub mod clinical;
pub mod error;
pub mod lookup;
pub mod route;
pub mod table;

pub use clinical::ClinicalTable;
pub use error::{ModelError, Result};
pub use lookup::LookupName;
pub use route::Resolution;
pub use table::{
    DESCRIPTION_COLUMN, LookupKey, LookupRecord, LookupTable, SHORT_DESCRIPTION_COLUMN,
};
