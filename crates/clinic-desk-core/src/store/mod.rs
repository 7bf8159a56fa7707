//! Flat-file stores for patients and consultations.
//!
//! Each store keeps its whole table in memory and rewrites the backing file
//! after every mutation. Tables are comma-separated with one header row;
//! columns are matched by header name, so extra or reordered columns load.

mod consultations;
mod patients;

pub use consultations::*;
pub use patients::*;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Malformed row at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("Patient with CPF {0} already registered")]
    Duplicate(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A record that maps onto one row of a flat table.
pub trait TableRecord: Sized {
    /// Column names, in the order `to_fields` produces them.
    const HEADERS: &'static [&'static str];

    fn to_fields(&self) -> Vec<String>;

    /// Build a record from fields given in `HEADERS` order.
    fn from_fields(fields: &[&str]) -> Result<Self, String>;
}

/// Load every record from `path`. A missing or empty file is an empty table.
pub fn load_records<R: TableRecord>(path: &Path) -> StoreResult<Vec<R>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Ok(Vec::new());
    }

    let columns = R::HEADERS
        .iter()
        .map(|name| {
            headers
                .iter()
                .position(|h| h == *name)
                .ok_or_else(|| StoreError::MissingColumn(name.to_string()))
        })
        .collect::<StoreResult<Vec<_>>>()?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map_or(0, |p| p.line() as usize);
        if row.len() != headers.len() {
            return Err(StoreError::Malformed {
                line,
                reason: format!("expected {} fields, found {}", headers.len(), row.len()),
            });
        }
        let fields: Vec<&str> = columns.iter().map(|&i| &row[i]).collect();
        let record =
            R::from_fields(&fields).map_err(|reason| StoreError::Malformed { line, reason })?;
        records.push(record);
    }
    Ok(records)
}

/// Rewrite `path` with the full table.
pub fn save_records<R: TableRecord>(path: &Path, records: &[R]) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(path)?;
    writer.write_record(R::HEADERS)?;
    for record in records {
        writer.write_record(record.to_fields())?;
    }
    writer.flush()?;
    Ok(())
}
