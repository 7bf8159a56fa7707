//! Scheduled consultation models.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{DISPLAY_DATE_FORMAT, TIMESTAMP_FORMAT};

/// A consultation on the schedule.
///
/// The patient is referenced by name only; nothing ties it back to the
/// patient table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Consultation {
    /// Patient name at the time of scheduling
    pub patient_name: String,
    /// Practitioner from the clinic roster
    pub practitioner: String,
    /// `Data/Hora` text exactly as stored. Rows written by this crate use
    /// `DD/MM/YYYY HH:MM`; rows from elsewhere are kept verbatim.
    pub scheduled_at: String,
}

impl Consultation {
    pub fn new(patient_name: String, practitioner: String, scheduled_at: NaiveDateTime) -> Self {
        Self {
            patient_name,
            practitioner,
            scheduled_at: scheduled_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Rebuild a record from stored column text.
    pub fn from_stored(patient_name: String, practitioner: String, scheduled_at: String) -> Self {
        Self {
            patient_name,
            practitioner,
            scheduled_at,
        }
    }

    /// Timestamp as persisted in the `Data/Hora` column.
    pub fn timestamp_text(&self) -> &str {
        &self.scheduled_at
    }

    /// Stored timestamp, if it is in the canonical format.
    pub fn scheduled_time(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.scheduled_at)
    }

    /// Whether the stored timestamp text starts with the given day.
    ///
    /// This is a string prefix test against the stored representation, not a
    /// calendar comparison.
    pub fn falls_on(&self, date: NaiveDate) -> bool {
        self.scheduled_at
            .starts_with(&date.format(DISPLAY_DATE_FORMAT).to_string())
    }
}

/// Parse a `Data/Hora` value.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_timestamp_text() {
        let c = Consultation::new("Ana".into(), "Dr. Felipe".into(), at(2024, 5, 3, 9, 30));
        assert_eq!(c.timestamp_text(), "03/05/2024 09:30");
        assert_eq!(c.scheduled_time(), Some(at(2024, 5, 3, 9, 30)));
    }

    #[test]
    fn test_falls_on() {
        let c = Consultation::new("Ana".into(), "Dr. Felipe".into(), at(2024, 5, 3, 23, 59));
        assert!(c.falls_on(day(2024, 5, 3)));
        assert!(!c.falls_on(day(2024, 5, 4)));
        assert!(!c.falls_on(day(2023, 5, 3)));
    }

    #[test]
    fn test_falls_on_uses_stored_text() {
        let short = Consultation::from_stored("Ana".into(), "Dr. Felipe".into(), "3/5/2024 09:30".into());
        assert!(!short.falls_on(day(2024, 5, 3)));
        assert_eq!(short.scheduled_time(), None);

        let seconds =
            Consultation::from_stored("Ana".into(), "Dr. Felipe".into(), "03/05/2024 09:30:00".into());
        assert!(seconds.falls_on(day(2024, 5, 3)));
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp("03/05/2024 09:30"), Some(at(2024, 5, 3, 9, 30)));
        assert_eq!(parse_timestamp("2024-05-03T09:30"), None);
    }
}
