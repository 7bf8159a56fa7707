//! Prescription rendering.
//!
//! Each symptom on the checklist maps to at most one fixed remedy line. The
//! document layout is static: header, patient, observations, remedies,
//! practitioner, signature, date and clinic location.

mod pdf;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Symptom, DISPLAY_DATE_FORMAT};

pub const DEFAULT_CLINIC_LOCATION: &str = "Coronel Xavier Chaves, Minas Gerais";

pub const TITLE: &str = "--- RECEITA MÉDICA ---";
pub const SIGNATURE_LINE: &str = "Assinatura:__________________________";

/// Remedy line per symptom, in the order lines appear on the document.
pub const REMEDIES: [(Symptom, &str); 4] = [
    (Symptom::Fever, "Remédio: Febrilina__________500mg - 1 cp - 6h/6h"),
    (
        Symptom::SoreThroat,
        "Remédio: Gargalix__________gargarejos com 10ml - 4h/4h",
    ),
    (Symptom::Nausea, "Remédio: Nausex__________250mg - 1 cp - 8h/8h"),
    (Symptom::Cold, "Remédio: Resfriadin__________200mg - 1 cp - 12h/12h"),
];

/// Prescription errors.
#[derive(Error, Debug)]
pub enum PrescriptionError {
    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PrescriptionResult<T> = Result<T, PrescriptionError>;

/// Remedy lines for the selected symptoms, in table order.
///
/// Selection order and repeats do not matter; symptoms without a remedy
/// contribute nothing.
pub fn remedy_lines(symptoms: &[Symptom]) -> Vec<&'static str> {
    REMEDIES
        .iter()
        .filter(|(symptom, _)| symptoms.contains(symptom))
        .map(|(_, line)| *line)
        .collect()
}

/// A prescription ready to be shown or saved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Prescription {
    pub patient_name: String,
    pub practitioner: String,
    pub date: NaiveDate,
    /// Never empty.
    pub remedies: Vec<String>,
    pub clinic_location: String,
}

impl Prescription {
    /// Issue a prescription, or `None` when no selected symptom has a remedy.
    pub fn issue(
        patient_name: &str,
        practitioner: &str,
        date: NaiveDate,
        symptoms: &[Symptom],
    ) -> Option<Self> {
        let remedies = remedy_lines(symptoms);
        if remedies.is_empty() {
            return None;
        }

        Some(Self {
            patient_name: patient_name.to_string(),
            practitioner: practitioner.to_string(),
            date,
            remedies: remedies.into_iter().map(String::from).collect(),
            clinic_location: DEFAULT_CLINIC_LOCATION.to_string(),
        })
    }

    pub fn at_location(mut self, location: impl Into<String>) -> Self {
        self.clinic_location = location.into();
        self
    }

    /// Consultation date as printed (`DD/MM/YYYY`).
    pub fn date_text(&self) -> String {
        self.date.format(DISPLAY_DATE_FORMAT).to_string()
    }

    /// Document body, one entry per printed line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            TITLE.to_string(),
            format!("Paciente: {}", self.patient_name),
            "Observações:".to_string(),
            String::new(),
        ];
        lines.extend(self.remedies.iter().cloned());
        lines.push(format!("Médico Responsável: {}", self.practitioner));
        lines.push(SIGNATURE_LINE.to_string());
        lines.push(format!("Data da Consulta: {}", self.date_text()));
        lines.push(self.clinic_location.clone());
        lines
    }

    /// Download name, e.g. `receita_Ana_Souza_03-05-2024.pdf`.
    ///
    /// Spaces and path separators in the patient name become `_`.
    pub fn file_name(&self) -> String {
        let name: String = self
            .patient_name
            .chars()
            .map(|c| if matches!(c, ' ' | '/' | '\\') { '_' } else { c })
            .collect();
        format!("receita_{}_{}.pdf", name, self.date_text().replace('/', "-"))
    }

    /// Render the document as PDF bytes.
    pub fn to_pdf(&self) -> PrescriptionResult<Vec<u8>> {
        pdf::render(self)
    }

    /// Write the PDF into `dir` under [`file_name`](Self::file_name).
    pub fn write_to(&self, dir: &Path) -> PrescriptionResult<PathBuf> {
        let bytes = self.to_pdf()?;
        fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        fs::write(&path, bytes)?;
        tracing::info!(path = %path.display(), remedies = self.remedies.len(), "Wrote prescription");
        Ok(path)
    }
}
