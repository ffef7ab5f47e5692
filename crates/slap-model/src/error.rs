use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown lookup '{name}', expected one of: {registered}")]
    InvalidLookup { name: String, registered: String },

    #[error("lookup '{name}' cannot be resolved here, did you want {alternative}?")]
    UnsupportedLookup {
        name: String,
        alternative: &'static str,
    },

    #[error("unknown clinical table '{name}', expected one of: {known}")]
    UnknownTable { name: String, known: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
