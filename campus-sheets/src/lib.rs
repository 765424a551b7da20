//! # campus-sheets
//!
//! Spreadsheet backend for the sync pipeline.
//!
//! [`SheetsClient`] speaks the `v4/spreadsheets/{id}/values/{range}` REST
//! surface over blocking HTTP; [`SourceTable`] and [`DestinationTable`] are
//! the seams the orchestrator works against, so tests (and any future
//! backend) can swap the transport out.

pub mod client;
pub mod error;
pub mod table;

pub use client::{SheetsClient, ValueRange};
pub use error::SheetsError;
pub use table::{DestinationTable, SheetsDestination, SheetsSource, SourceTable};
