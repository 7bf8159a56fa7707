//! Domain models for the clinic desk.

mod consultation;
mod patient;
mod symptom;

pub use consultation::*;
pub use patient::*;
pub use symptom::*;

/// Day-first date format used on screen, in timestamps and in file names.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Format of the `Data/Hora` column.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Format of the `Data de Nascimento` column.
pub const STORED_DATE_FORMAT: &str = "%Y-%m-%d";
