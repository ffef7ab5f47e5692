#![deny(unsafe_code)]

pub mod canonical;
pub mod error;
pub mod paths;
pub mod store;

pub use crate::canonical::{CanonicalTable, read_canonical, write_canonical};
pub use crate::error::StoreError;
pub use crate::paths::{
    DEFAULT_LOOKUP_DIR, DEFAULT_LOOKUP_PREFIX, LOOKUP_DIR_ENV_VAR, LOOKUP_EXTENSION,
    default_lookup_dir,
};
pub use crate::store::{LookupStatus, LookupStore};
