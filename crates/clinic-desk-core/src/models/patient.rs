//! Patient models.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{DISPLAY_DATE_FORMAT, STORED_DATE_FORMAT};

/// A registered patient, keyed by national ID.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Patient {
    /// Full name
    pub name: String,
    /// National ID (CPF). Kept as text so leading zeros survive.
    pub cpf: String,
    /// Date of birth
    pub birth_date: NaiveDate,
    /// Street, number and neighbourhood
    pub address: String,
    /// Contact phone
    pub phone: String,
}

impl Patient {
    /// Create a new patient with required fields.
    pub fn new(name: String, cpf: String, birth_date: NaiveDate) -> Self {
        Self {
            name,
            cpf,
            birth_date,
            address: String::new(),
            phone: String::new(),
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Case-insensitive substring match on the national ID.
    pub fn cpf_contains(&self, query: &str) -> bool {
        self.cpf.to_lowercase().contains(&query.to_lowercase())
    }

    /// Birth date as shown to the front desk (`DD/MM/YYYY`).
    pub fn birth_date_display(&self) -> String {
        self.birth_date.format(DISPLAY_DATE_FORMAT).to_string()
    }
}

/// Parse a birth date as written by any of the tools that have touched the file.
///
/// Accepts ISO dates, day-first dates and ISO datetimes at midnight.
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, STORED_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(raw, DISPLAY_DATE_FORMAT))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}
