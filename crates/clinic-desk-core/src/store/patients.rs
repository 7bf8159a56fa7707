//! Patient table operations.

use std::path::{Path, PathBuf};

use super::{load_records, save_records, StoreError, StoreResult, TableRecord};
use crate::models::{parse_birth_date, Patient, STORED_DATE_FORMAT};

impl TableRecord for Patient {
    const HEADERS: &'static [&'static str] =
        &["Nome", "CPF", "Data de Nascimento", "Endereço", "Telefone"];

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.cpf.clone(),
            self.birth_date.format(STORED_DATE_FORMAT).to_string(),
            self.address.clone(),
            self.phone.clone(),
        ]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, String> {
        let birth_date = parse_birth_date(fields[2])
            .ok_or_else(|| format!("invalid birth date '{}'", fields[2]))?;
        Ok(Patient {
            name: fields[0].to_string(),
            cpf: fields[1].to_string(),
            birth_date,
            address: fields[3].to_string(),
            phone: fields[4].to_string(),
        })
    }
}

/// Patient table backed by a flat file.
#[derive(Debug)]
pub struct PatientStore {
    path: PathBuf,
    patients: Vec<Patient>,
}

impl PatientStore {
    /// Load the table at `path`, or start empty if the file does not exist.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let patients = load_records(&path)?;
        tracing::info!(path = %path.display(), rows = patients.len(), "Loaded patient table");
        Ok(Self { path, patients })
    }

    /// Register a new patient and persist the table.
    ///
    /// Fails with [`StoreError::Duplicate`] if the CPF is already present,
    /// leaving both memory and file untouched.
    pub fn register(&mut self, patient: Patient) -> StoreResult<()> {
        if self.find_exact(&patient.cpf).is_some() {
            return Err(StoreError::Duplicate(patient.cpf));
        }

        self.patients.push(patient);
        if let Err(e) = self.persist() {
            self.patients.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Edit a patient record.
    ///
    /// Goes through the same insert path as [`register`](Self::register): an
    /// edit that keeps the CPF reports `Duplicate` and changes nothing, while
    /// an edit that changes the CPF adds a second record.
    pub fn edit(&mut self, patient: Patient) -> StoreResult<()> {
        self.register(patient)
    }

    /// All patients whose CPF contains `query`, ignoring case, in table order.
    pub fn find_by_id_substring(&self, query: &str) -> Vec<&Patient> {
        let found: Vec<&Patient> = self
            .patients
            .iter()
            .filter(|p| p.cpf_contains(query))
            .collect();
        tracing::debug!(query, matches = found.len(), "Patient substring search");
        found
    }

    /// Patient with exactly this CPF.
    pub fn find_exact(&self, cpf: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.cpf == cpf)
    }

    pub fn records(&self) -> &[Patient] {
        &self.patients
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> StoreResult<()> {
        save_records(&self.path, &self.patients)?;
        tracing::info!(path = %self.path.display(), rows = self.patients.len(), "Saved patient table");
        Ok(())
    }
}
