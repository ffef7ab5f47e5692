use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::lookup::LookupName;

/// Route alias for comma-separated cause-of-death code lists.
pub const DEATHCAUSE_ROUTE: &str = "DEATHCAUSE";

/// Route alias for combined morphology+behaviour histology codes.
pub const HISTOLOGY_ROUTE: &str = "HISTOLOGY";

/// How a column of codes is turned into descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Resolution {
    /// One code, one key.
    Flat(LookupName),
    /// Comma-separated codes, each looked up in the table and rejoined.
    MultiValued(LookupName),
    /// Combined `MMMMB` codes against the histology table.
    Histology,
}

impl Resolution {
    pub fn kind(self) -> &'static str {
        match self {
            Resolution::Flat(_) => "flat",
            Resolution::MultiValued(_) => "multi-valued",
            Resolution::Histology => "composite",
        }
    }
}

impl FromStr for Resolution {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(DEATHCAUSE_ROUTE) {
            return Ok(Resolution::MultiValued(LookupName::IcdFull));
        }
        if trimmed.eq_ignore_ascii_case(HISTOLOGY_ROUTE) {
            return Ok(Resolution::Histology);
        }
        let name: LookupName = trimmed.parse()?;
        if let Some(alternative) = name.flat_alternative() {
            return Err(ModelError::UnsupportedLookup {
                name: name.as_str().to_string(),
                alternative,
            });
        }
        Ok(Resolution::Flat(name))
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Flat(name) => write!(f, "{}", name.as_str().to_ascii_uppercase()),
            Resolution::MultiValued(LookupName::IcdFull) => f.write_str(DEATHCAUSE_ROUTE),
            Resolution::MultiValued(name) => write!(f, "{}", name.as_str().to_ascii_uppercase()),
            Resolution::Histology => f.write_str(HISTOLOGY_ROUTE),
        }
    }
}

impl TryFrom<String> for Resolution {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Resolution> for String {
    fn from(value: Resolution) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_select_special_routes() {
        assert_eq!(
            "deathcause".parse::<Resolution>().unwrap(),
            Resolution::MultiValued(LookupName::IcdFull)
        );
        assert_eq!("Histology".parse::<Resolution>().unwrap(), Resolution::Histology);
        assert_eq!(
            "ETHNICITY".parse::<Resolution>().unwrap(),
            Resolution::Flat(LookupName::Ethnicity)
        );
        assert_eq!(Resolution::Histology.kind(), "composite");
        assert_eq!(Resolution::MultiValued(LookupName::IcdFull).kind(), "multi-valued");
    }

    #[test]
    fn grouping_tables_are_rejected_with_alternative() {
        let err = "icdclassification".parse::<Resolution>().unwrap_err();
        assert_eq!(
            err,
            ModelError::UnsupportedLookup {
                name: "icdclassification".to_string(),
                alternative: "icd",
            }
        );
        let err = "HISTOLOGYLOOKUP".parse::<Resolution>().unwrap_err();
        assert!(err.to_string().contains("HISTOLOGY"));
    }

    #[test]
    fn display_parses_back() {
        for route in [
            Resolution::Flat(LookupName::Sex),
            Resolution::MultiValued(LookupName::IcdFull),
            Resolution::Histology,
        ] {
            assert_eq!(route.to_string().parse::<Resolution>().unwrap(), route);
        }
    }
}
