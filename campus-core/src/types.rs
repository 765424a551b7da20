//! Domain types for the sync pipeline.
//!
//! Each stage of the pipeline has its own record struct; rows only move
//! forward (`SourceRow` → `CandidateRecord` → `EnrichedRecord` →
//! `FinalRecord`), never back.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clean;

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

/// Column indices of the registration form (source) sheet.
pub mod source_columns {
    pub const TIMESTAMP: usize = 0;
    pub const EMAIL: usize = 1;
    pub const NAME: usize = 2;
    pub const CITY: usize = 3;
    pub const PHONE: usize = 4;
    /// A row narrower than this cannot carry a full registration.
    pub const MIN_WIDTH: usize = 5;
}

/// Column indices of the destination sheet.
pub mod dest_columns {
    pub const EMAIL: usize = 0;
    pub const NAME: usize = 1;
    pub const CITY: usize = 2;
    pub const PHONE: usize = 3;
    pub const COUNTRY: usize = 4;
    pub const CONTINENT: usize = 5;
    pub const WIDTH: usize = 6;
}

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed email address — the resume watermark of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(pub String);

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for EmailAddress {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EmailAddress {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Pipeline stage records
// ---------------------------------------------------------------------------

/// A raw row as read from the source sheet, untouched.
///
/// Cell layout is `[timestamp, email, name, city, phone, …]`; trailing
/// columns are carried but ignored. Accessors return `None` on rows that
/// are too narrow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub cells: Vec<String>,
}

impl SourceRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Whether the row is wide enough to hold a full registration.
    pub fn is_shaped(&self) -> bool {
        self.cells.len() >= source_columns::MIN_WIDTH
    }

    pub fn email(&self) -> Option<&str> {
        self.cells.get(source_columns::EMAIL).map(String::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.cells.get(source_columns::NAME).map(String::as_str)
    }

    pub fn city(&self) -> Option<&str> {
        self.cells.get(source_columns::CITY).map(String::as_str)
    }

    pub fn phone(&self) -> Option<&str> {
        self.cells.get(source_columns::PHONE).map(String::as_str)
    }
}

impl From<Vec<String>> for SourceRow {
    fn from(cells: Vec<String>) -> Self {
        Self::new(cells)
    }
}

/// A registration that survived validation; the name is already normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecord {
    pub email: EmailAddress,
    pub name: String,
    pub city: String,
    pub phone: String,
}

/// A candidate plus the geography triple; `phone` is the corrected value
/// returned by the enrichment service (or the raw input on fallback).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedRecord {
    pub email: EmailAddress,
    pub name: String,
    pub city: String,
    pub phone: String,
    pub country: String,
    pub continent: String,
}

impl EnrichedRecord {
    pub fn from_candidate(
        candidate: CandidateRecord,
        country: String,
        continent: String,
        phone_corrected: String,
    ) -> Self {
        Self {
            email: candidate.email,
            name: candidate.name,
            city: candidate.city,
            phone: phone_corrected,
            country,
            continent,
        }
    }

    /// Final normalization step: reduce the phone to bare digits.
    pub fn finalize(self) -> FinalRecord {
        FinalRecord {
            phone: clean::clean_phone(&self.phone),
            email: self.email,
            name: self.name,
            city: self.city,
            country: self.country,
            continent: self.continent,
        }
    }
}

/// The row shape appended to the destination sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalRecord {
    pub email: EmailAddress,
    pub name: String,
    pub city: String,
    pub phone: String,
    pub country: String,
    pub continent: String,
}

impl FinalRecord {
    /// Destination cell order: `[email, name, city, phone, country, continent]`.
    pub fn into_cells(self) -> Vec<String> {
        vec![
            self.email.0,
            self.name,
            self.city,
            self.phone,
            self.country,
            self.continent,
        ]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> SourceRow {
        SourceRow::new(cells.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn newtype_display() {
        assert_eq!(EmailAddress::from("a@b.co").to_string(), "a@b.co");
    }

    #[test]
    fn newtype_equality() {
        let a = EmailAddress::from("x@y.com");
        let b = EmailAddress::from(String::from("x@y.com"));
        assert_eq!(a, b);
    }

    #[test]
    fn shaped_row_exposes_fields() {
        let r = row(&["2025-10-20", "jo@ex.com", "Jo Smith", "Nairobi", "+254 711"]);
        assert!(r.is_shaped());
        assert_eq!(r.email(), Some("jo@ex.com"));
        assert_eq!(r.name(), Some("Jo Smith"));
        assert_eq!(r.city(), Some("Nairobi"));
        assert_eq!(r.phone(), Some("+254 711"));
    }

    #[test]
    fn narrow_row_is_not_shaped() {
        let r = row(&["2025-10-20", "jo@ex.com"]);
        assert!(!r.is_shaped());
        assert_eq!(r.city(), None);
        assert_eq!(r.phone(), None);
    }

    #[test]
    fn final_record_cell_order_matches_destination_layout() {
        let record = FinalRecord {
            email: EmailAddress::from("jo@ex.com"),
            name: "Jo Smith".into(),
            city: "Nairobi".into(),
            phone: "254711000111".into(),
            country: "Kenya".into(),
            continent: "Africa".into(),
        };
        let cells = record.into_cells();
        assert_eq!(cells.len(), dest_columns::WIDTH);
        assert_eq!(cells[dest_columns::EMAIL], "jo@ex.com");
        assert_eq!(cells[dest_columns::PHONE], "254711000111");
        assert_eq!(cells[dest_columns::CONTINENT], "Africa");
    }

    #[test]
    fn finalize_strips_phone_punctuation() {
        let enriched = EnrichedRecord {
            email: EmailAddress::from("jo@ex.com"),
            name: "Jo Smith".into(),
            city: "Nairobi".into(),
            phone: "+254 711-000 111".into(),
            country: "Kenya".into(),
            continent: "Africa".into(),
        };
        assert_eq!(enriched.finalize().phone, "254711000111");
    }
}
