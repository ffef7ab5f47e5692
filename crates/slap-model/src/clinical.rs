use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// The clinical tables of a registry release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClinicalTable {
    AvPatient,
    AvTumour,
    SactCycle,
    SactDrugDetail,
    SactOutcome,
    SactPatient,
    SactRegimen,
    SactTumour,
}

impl ClinicalTable {
    pub const ALL: [ClinicalTable; 8] = [
        ClinicalTable::AvPatient,
        ClinicalTable::AvTumour,
        ClinicalTable::SactCycle,
        ClinicalTable::SactDrugDetail,
        ClinicalTable::SactOutcome,
        ClinicalTable::SactPatient,
        ClinicalTable::SactRegimen,
        ClinicalTable::SactTumour,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ClinicalTable::AvPatient => "av_patient",
            ClinicalTable::AvTumour => "av_tumour",
            ClinicalTable::SactCycle => "sact_cycle",
            ClinicalTable::SactDrugDetail => "sact_drug_detail",
            ClinicalTable::SactOutcome => "sact_outcome",
            ClinicalTable::SactPatient => "sact_patient",
            ClinicalTable::SactRegimen => "sact_regimen",
            ClinicalTable::SactTumour => "sact_tumour",
        }
    }

    pub fn known_list() -> String {
        Self::ALL
            .iter()
            .map(|table| table.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ClinicalTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClinicalTable {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|table| table.as_str() == wanted)
            .ok_or_else(|| ModelError::UnknownTable {
                name: s.to_string(),
                known: Self::known_list(),
            })
    }
}
