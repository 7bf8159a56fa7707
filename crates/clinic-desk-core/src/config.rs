//! Desk configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::prescription::DEFAULT_CLINIC_LOCATION;

pub const APP_NAME: &str = "clinic-desk";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Config errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the tables live and what the desk offers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeskConfig {
    /// Directory holding both tables
    pub data_dir: PathBuf,
    /// Patient table file name, relative to `data_dir`
    pub patients_file: String,
    /// Consultation table file name, relative to `data_dir`
    pub consultations_file: String,
    /// Where prescriptions are written
    pub output_dir: PathBuf,
    /// Practitioners available for scheduling and consultations
    pub practitioners: Vec<String>,
    /// Last line of every prescription
    pub clinic_location: String,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            patients_file: "pacientes.csv".to_string(),
            consultations_file: "consultas.csv".to_string(),
            output_dir: PathBuf::from("receitas"),
            practitioners: vec![
                "Dr. Felipe".to_string(),
                "Dr. Mateus".to_string(),
                "Dr. João".to_string(),
            ],
            clinic_location: DEFAULT_CLINIC_LOCATION.to_string(),
        }
    }
}

impl DeskConfig {
    /// Parse a JSON config. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn patients_path(&self) -> PathBuf {
        self.data_dir.join(&self.patients_file)
    }

    pub fn consultations_path(&self) -> PathBuf {
        self.data_dir.join(&self.consultations_file)
    }

    /// Prescription directory. Relative paths hang off `data_dir`.
    pub fn output_path(&self) -> PathBuf {
        self.data_dir.join(&self.output_dir)
    }

    pub fn is_practitioner(&self, name: &str) -> bool {
        self.practitioners.iter().any(|p| p == name)
    }
}

/// Default `tracing` filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "clinic_desk_core=info,clinic_desk=info,warn"
}
