//! Table seams the orchestrator works against.
//!
//! The pipeline never touches `SheetsClient` directly; it sees a read-only
//! [`SourceTable`] and an append-only [`DestinationTable`].

use crate::client::SheetsClient;
use crate::error::SheetsError;

/// Read-only view of the registration form sheet.
pub trait SourceTable {
    /// Fetch every row, in sheet order.
    fn fetch_rows(&self) -> Result<Vec<Vec<String>>, SheetsError>;
}

/// The synced roster sheet: readable tail, bulk append.
pub trait DestinationTable {
    /// Fetch every row, in sheet order.
    fn fetch_rows(&self) -> Result<Vec<Vec<String>>, SheetsError>;

    /// Append `rows` below the current tail in one call. Returns the number
    /// of rows written.
    fn append_rows(&self, rows: &[Vec<String>]) -> Result<usize, SheetsError>;
}

/// [`SourceTable`] backed by one spreadsheet range.
#[derive(Debug, Clone)]
pub struct SheetsSource {
    client: SheetsClient,
    spreadsheet_id: String,
    range: String,
}

impl SheetsSource {
    pub fn new(
        client: SheetsClient,
        spreadsheet_id: impl Into<String>,
        range: impl Into<String>,
    ) -> Self {
        Self {
            client,
            spreadsheet_id: spreadsheet_id.into(),
            range: range.into(),
        }
    }
}

impl SourceTable for SheetsSource {
    fn fetch_rows(&self) -> Result<Vec<Vec<String>>, SheetsError> {
        self.client.get_values(&self.spreadsheet_id, &self.range)
    }
}

/// [`DestinationTable`] backed by one spreadsheet range.
#[derive(Debug, Clone)]
pub struct SheetsDestination {
    client: SheetsClient,
    spreadsheet_id: String,
    range: String,
}

impl SheetsDestination {
    pub fn new(
        client: SheetsClient,
        spreadsheet_id: impl Into<String>,
        range: impl Into<String>,
    ) -> Self {
        Self {
            client,
            spreadsheet_id: spreadsheet_id.into(),
            range: range.into(),
        }
    }
}

impl DestinationTable for SheetsDestination {
    fn fetch_rows(&self) -> Result<Vec<Vec<String>>, SheetsError> {
        self.client.get_values(&self.spreadsheet_id, &self.range)
    }

    fn append_rows(&self, rows: &[Vec<String>]) -> Result<usize, SheetsError> {
        self.client
            .append_values(&self.spreadsheet_id, &self.range, rows)
    }
}
