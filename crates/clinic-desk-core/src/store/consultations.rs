//! Consultation schedule operations.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};

use super::{load_records, save_records, StoreResult, TableRecord};
use crate::models::Consultation;

impl TableRecord for Consultation {
    const HEADERS: &'static [&'static str] = &["Nome Paciente", "Médico", "Data/Hora"];

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.patient_name.clone(),
            self.practitioner.clone(),
            self.scheduled_at.clone(),
        ]
    }

    /// `Data/Hora` is kept as text; the date filter works on it directly.
    fn from_fields(fields: &[&str]) -> Result<Self, String> {
        Ok(Consultation::from_stored(
            fields[0].to_string(),
            fields[1].to_string(),
            fields[2].to_string(),
        ))
    }
}

/// Consultation schedule backed by a flat file.
#[derive(Debug)]
pub struct ConsultationStore {
    path: PathBuf,
    consultations: Vec<Consultation>,
}

impl ConsultationStore {
    /// Load the schedule at `path`, or start empty if the file does not exist.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let consultations = load_records(&path)?;
        tracing::info!(
            path = %path.display(),
            rows = consultations.len(),
            "Loaded consultation schedule"
        );
        Ok(Self {
            path,
            consultations,
        })
    }

    /// Append a consultation and persist the schedule.
    ///
    /// No check is made against the patient table or for overlapping slots.
    pub fn schedule(
        &mut self,
        patient_name: String,
        practitioner: String,
        scheduled_at: NaiveDateTime,
    ) -> StoreResult<&Consultation> {
        self.consultations
            .push(Consultation::new(patient_name, practitioner, scheduled_at));
        if let Err(e) = save_records(&self.path, &self.consultations) {
            self.consultations.pop();
            return Err(e);
        }
        tracing::info!(
            path = %self.path.display(),
            rows = self.consultations.len(),
            "Saved consultation schedule"
        );
        Ok(&self.consultations[self.consultations.len() - 1])
    }

    /// Consultations whose stored timestamp starts with `date` as `DD/MM/YYYY`.
    pub fn list_for_date(&self, date: NaiveDate) -> Vec<&Consultation> {
        let found: Vec<&Consultation> = self
            .consultations
            .iter()
            .filter(|c| c.falls_on(date))
            .collect();
        tracing::debug!(%date, matches = found.len(), "Consultation date filter");
        found
    }

    pub fn records(&self) -> &[Consultation] {
        &self.consultations
    }

    pub fn len(&self) -> usize {
        self.consultations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consultations.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
