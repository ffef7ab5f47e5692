//! The closed set of registered lookup tables.
//!
//! Every lookup file on disk is named after one of these tables, and the key
//! column inside it is derived from the same name (`sex` -> `ZSEXID`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Identifier of a registered lookup table.
///
/// Parsing is case-insensitive; the canonical spelling is lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LookupName {
    Ace27Score,
    AdministrationRoute,
    Allred,
    Basis,
    Behaviour,
    CancerCarePlanIntent,
    ClinicalTrial,
    Cns,
    ConsultantSpeciality,
    Creg,
    CnsLocation,
    DeathLocation,
    DiagnosticRoute,
    ErPrStatus,
    Ethnicity,
    Grade,
    HistologyLookup,
    Icd,
    Icd3Char,
    IcdClassification,
    IcdFull,
    Laterality,
    Morphology,
    Performance,
    RegimenIntent,
    RegimenOutcome,
    Sex,
    Stage,
    TnmEdition,
    VitalStatus,
    YesNoUnknown,
}

impl LookupName {
    pub const ALL: [LookupName; 31] = [
        LookupName::Ace27Score,
        LookupName::AdministrationRoute,
        LookupName::Allred,
        LookupName::Basis,
        LookupName::Behaviour,
        LookupName::CancerCarePlanIntent,
        LookupName::ClinicalTrial,
        LookupName::Cns,
        LookupName::ConsultantSpeciality,
        LookupName::Creg,
        LookupName::CnsLocation,
        LookupName::DeathLocation,
        LookupName::DiagnosticRoute,
        LookupName::ErPrStatus,
        LookupName::Ethnicity,
        LookupName::Grade,
        LookupName::HistologyLookup,
        LookupName::Icd,
        LookupName::Icd3Char,
        LookupName::IcdClassification,
        LookupName::IcdFull,
        LookupName::Laterality,
        LookupName::Morphology,
        LookupName::Performance,
        LookupName::RegimenIntent,
        LookupName::RegimenOutcome,
        LookupName::Sex,
        LookupName::Stage,
        LookupName::TnmEdition,
        LookupName::VitalStatus,
        LookupName::YesNoUnknown,
    ];

    /// Tables shipped as SQL insert dumps with the registry release.
    pub const SQL_DUMPS: [LookupName; 19] = [
        LookupName::Ace27Score,
        LookupName::Allred,
        LookupName::Basis,
        LookupName::Behaviour,
        LookupName::CancerCarePlanIntent,
        LookupName::CnsLocation,
        LookupName::DeathLocation,
        LookupName::DiagnosticRoute,
        LookupName::Ethnicity,
        LookupName::Grade,
        LookupName::HistologyLookup,
        LookupName::Icd,
        LookupName::IcdClassification,
        LookupName::Laterality,
        LookupName::Sex,
        LookupName::Stage,
        LookupName::TnmEdition,
        LookupName::VitalStatus,
        LookupName::YesNoUnknown,
    ];

    /// Lowercase canonical name, as used in file names.
    pub fn as_str(self) -> &'static str {
        match self {
            LookupName::Ace27Score => "ace27score",
            LookupName::AdministrationRoute => "administrationroute",
            LookupName::Allred => "allred",
            LookupName::Basis => "basis",
            LookupName::Behaviour => "behaviour",
            LookupName::CancerCarePlanIntent => "cancercareplanintent",
            LookupName::ClinicalTrial => "clinicaltrial",
            LookupName::Cns => "cns",
            LookupName::ConsultantSpeciality => "consultantspeciality",
            LookupName::Creg => "creg",
            LookupName::CnsLocation => "cnslocation",
            LookupName::DeathLocation => "deathlocation",
            LookupName::DiagnosticRoute => "diagnosticroute",
            LookupName::ErPrStatus => "erprstatus",
            LookupName::Ethnicity => "ethnicity",
            LookupName::Grade => "grade",
            LookupName::HistologyLookup => "histologylookup",
            LookupName::Icd => "icd",
            LookupName::Icd3Char => "icd3char",
            LookupName::IcdClassification => "icdclassification",
            LookupName::IcdFull => "icdfull",
            LookupName::Laterality => "laterality",
            LookupName::Morphology => "morphology",
            LookupName::Performance => "performance",
            LookupName::RegimenIntent => "regimenintent",
            LookupName::RegimenOutcome => "regimenoutcome",
            LookupName::Sex => "sex",
            LookupName::Stage => "stage",
            LookupName::TnmEdition => "tnmedition",
            LookupName::VitalStatus => "vitalstatus",
            LookupName::YesNoUnknown => "yesnounknown",
        }
    }

    /// Key column(s) of the canonical file.
    ///
    /// Single-key tables follow the `Z<NAME>ID` convention. The histology
    /// table is keyed on morphology and behaviour together.
    pub fn key_columns(self) -> Vec<String> {
        match self {
            LookupName::HistologyLookup => vec![
                LookupName::Morphology.single_key_column(),
                LookupName::Behaviour.single_key_column(),
            ],
            other => vec![other.single_key_column()],
        }
    }

    fn single_key_column(self) -> String {
        format!("Z{}ID", self.as_str().to_ascii_uppercase())
    }

    /// Tables whose codes may arrive as comma-separated lists.
    pub fn is_multi_valued_capable(self) -> bool {
        matches!(self, LookupName::IcdFull)
    }

    /// Names that look flat but must not go through direct key lookup,
    /// paired with what the caller most likely meant.
    pub fn flat_alternative(self) -> Option<&'static str> {
        match self {
            LookupName::IcdClassification => Some("icd"),
            LookupName::HistologyLookup => Some("HISTOLOGY"),
            _ => None,
        }
    }

    pub(crate) fn registered_list() -> String {
        Self::ALL
            .iter()
            .map(|name| name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for LookupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LookupName {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == wanted)
            .ok_or_else(|| ModelError::InvalidLookup {
                name: s.to_string(),
                registered: Self::registered_list(),
            })
    }
}

impl TryFrom<String> for LookupName {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LookupName> for String {
    fn from(value: LookupName) -> Self {
        value.as_str().to_string()
    }
}
