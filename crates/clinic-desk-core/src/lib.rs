//! Clinic Desk Core Library
//!
//! Front-desk bookkeeping for a single clinic: patient registration and
//! lookup, consultation scheduling, and prescription documents.
//!
//! # Architecture
//!
//! ```text
//!   pacientes.csv          consultas.csv
//!        │                       │
//!   PatientStore        ConsultationStore
//!        └──────────┬────────────┘
//!                   │
//!                 Desk ──────► Prescription ──► receita_<nome>_<data>.pdf
//!                   │
//!            front end (CLI)
//! ```
//!
//! Both tables are loaded once when the desk opens and rewritten in full after
//! every change. There is no locking; one process owns the files.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Patient, Consultation, Symptom)
//! - [`store`]: CSV table load/save and the two stores
//! - [`prescription`]: Remedy table, document body and PDF output
//! - [`config`]: File locations, practitioner roster, clinic location
//! - [`desk`]: Workflow facade driven by the front end

pub mod config;
pub mod desk;
pub mod models;
pub mod prescription;
pub mod store;

// Re-export commonly used types
pub use config::DeskConfig;
pub use desk::{ConsultationOutcome, Desk};
pub use models::{Consultation, Patient, Symptom};
pub use prescription::Prescription;
pub use store::{ConsultationStore, PatientStore, StoreError};

// =========================================================================
// Desk Error Type
// =========================================================================

#[derive(Debug, thiserror::Error)]
pub enum DeskError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: patient with CPF {0} already registered")]
    Duplicate(String),

    #[error("Ambiguous: {matches} patients match '{query}', be more specific")]
    Ambiguous { query: String, matches: usize },

    #[error("Unknown practitioner: {0}")]
    UnknownPractitioner(String),

    #[error("Store error: {0}")]
    Store(StoreError),

    #[error("Prescription error: {0}")]
    Prescription(#[from] prescription::PrescriptionError),
}

pub type DeskResult<T> = Result<T, DeskError>;

impl DeskError {
    /// Whether this is a warning for the user rather than a failure.
    pub fn is_advisory(&self) -> bool {
        matches!(
            self,
            DeskError::NotFound(_)
                | DeskError::Duplicate(_)
                | DeskError::Ambiguous { .. }
                | DeskError::UnknownPractitioner(_)
        )
    }
}

impl From<StoreError> for DeskError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate(cpf) => DeskError::Duplicate(cpf),
            other => DeskError::Store(other),
        }
    }
}
