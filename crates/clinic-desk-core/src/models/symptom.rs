//! Symptom checklist used when starting a consultation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One entry of the fixed symptom checklist.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symptom {
    /// Febre
    Fever,
    /// Garganta Inflamada
    SoreThroat,
    /// Náusea
    Nausea,
    /// Resfriado
    Cold,
    /// Outro. Selectable, but has no remedy.
    Other,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown symptom: {0}")]
pub struct UnknownSymptom(pub String);

impl Symptom {
    /// Checklist order.
    pub const ALL: [Symptom; 5] = [
        Symptom::Fever,
        Symptom::SoreThroat,
        Symptom::Nausea,
        Symptom::Cold,
        Symptom::Other,
    ];

    /// Label as shown on the checklist.
    pub fn label(&self) -> &'static str {
        match self {
            Symptom::Fever => "Febre",
            Symptom::SoreThroat => "Garganta Inflamada",
            Symptom::Nausea => "Náusea",
            Symptom::Cold => "Resfriado",
            Symptom::Other => "Outro",
        }
    }

    /// ASCII key accepted on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Symptom::Fever => "febre",
            Symptom::SoreThroat => "garganta-inflamada",
            Symptom::Nausea => "nausea",
            Symptom::Cold => "resfriado",
            Symptom::Other => "outro",
        }
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Symptom {
    type Err = UnknownSymptom;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Symptom::ALL
            .into_iter()
            .find(|sym| sym.label().to_lowercase() == wanted || sym.key() == wanted)
            .ok_or_else(|| UnknownSymptom(s.to_string()))
    }
}
