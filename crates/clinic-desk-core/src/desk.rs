//! Front-desk workflow over the two stores.
//!
//! Each method corresponds to one action a receptionist or practitioner takes.
//! Lookups that must land on a single patient report `NotFound` or `Ambiguous`
//! instead of guessing.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::config::DeskConfig;
use crate::models::{Consultation, Patient, Symptom};
use crate::prescription::Prescription;
use crate::store::{ConsultationStore, PatientStore};
use crate::{DeskError, DeskResult};

/// Result of starting a consultation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsultationOutcome {
    pub patient: Patient,
    /// Birth date as `DD/MM/YYYY`
    pub birth_date: String,
    /// `None` when no selected symptom has a remedy
    pub prescription: Option<Prescription>,
}

/// Both stores plus the configuration they were opened with.
#[derive(Debug)]
pub struct Desk {
    config: DeskConfig,
    patients: PatientStore,
    consultations: ConsultationStore,
}

impl Desk {
    /// Load both tables as configured.
    pub fn open(config: DeskConfig) -> DeskResult<Self> {
        let patients = PatientStore::open(config.patients_path())?;
        let consultations = ConsultationStore::open(config.consultations_path())?;
        Ok(Self {
            config,
            patients,
            consultations,
        })
    }

    pub fn config(&self) -> &DeskConfig {
        &self.config
    }

    pub fn patients(&self) -> &PatientStore {
        &self.patients
    }

    pub fn consultations(&self) -> &ConsultationStore {
        &self.consultations
    }

    pub fn register_patient(&mut self, patient: Patient) -> DeskResult<()> {
        self.patients.register(patient)?;
        Ok(())
    }

    /// Patients whose CPF contains `query`.
    pub fn search_patients(&self, query: &str) -> DeskResult<Vec<&Patient>> {
        let found = self.patients.find_by_id_substring(query);
        if found.is_empty() {
            return Err(DeskError::NotFound(format!("no patient with CPF matching '{query}'")));
        }
        Ok(found)
    }

    /// The single patient whose CPF contains `query`.
    pub fn select_patient(&self, query: &str) -> DeskResult<&Patient> {
        let mut found = self.search_patients(query)?;
        if found.len() > 1 {
            return Err(DeskError::Ambiguous {
                query: query.to_string(),
                matches: found.len(),
            });
        }
        Ok(found.remove(0))
    }

    /// Save an edited record for the patient selected by `query`.
    ///
    /// The store's edit path is an insert, so keeping the CPF unchanged
    /// reports `Duplicate`.
    pub fn edit_patient(&mut self, query: &str, updated: Patient) -> DeskResult<()> {
        self.select_patient(query)?;
        self.patients.edit(updated)?;
        Ok(())
    }

    /// Book a consultation for the patient with exactly this CPF.
    pub fn schedule_consultation(
        &mut self,
        cpf: &str,
        practitioner: &str,
        scheduled_at: NaiveDateTime,
    ) -> DeskResult<Consultation> {
        let patient_name = self
            .patients
            .find_exact(cpf)
            .map(|p| p.name.clone())
            .ok_or_else(|| DeskError::NotFound(format!("no patient with CPF '{cpf}'")))?;
        self.check_practitioner(practitioner)?;

        let booked = self
            .consultations
            .schedule(patient_name, practitioner.to_string(), scheduled_at)?;
        Ok(booked.clone())
    }

    /// Consultations booked on `date`.
    pub fn consultations_on(&self, date: NaiveDate) -> DeskResult<Vec<&Consultation>> {
        let found = self.consultations.list_for_date(date);
        if found.is_empty() {
            return Err(DeskError::NotFound(format!(
                "no consultations scheduled on {}",
                date.format(crate::models::DISPLAY_DATE_FORMAT)
            )));
        }
        Ok(found)
    }

    /// Select a patient and issue a prescription for the chosen symptoms.
    pub fn start_consultation(
        &self,
        query: &str,
        practitioner: &str,
        symptoms: &[Symptom],
        date: NaiveDate,
    ) -> DeskResult<ConsultationOutcome> {
        let patient = self.select_patient(query)?;
        self.check_practitioner(practitioner)?;

        let prescription = Prescription::issue(&patient.name, practitioner, date, symptoms)
            .map(|rx| rx.at_location(self.config.clinic_location.as_str()));

        Ok(ConsultationOutcome {
            birth_date: patient.birth_date_display(),
            patient: patient.clone(),
            prescription,
        })
    }

    /// Write a prescription PDF into the configured output directory.
    pub fn save_prescription(&self, prescription: &Prescription) -> DeskResult<PathBuf> {
        Ok(prescription.write_to(&self.config.output_path())?)
    }

    fn check_practitioner(&self, practitioner: &str) -> DeskResult<()> {
        if self.config.is_practitioner(practitioner) {
            Ok(())
        } else {
            Err(DeskError::UnknownPractitioner(practitioner.to_string()))
        }
    }
}
