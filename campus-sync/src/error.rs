//! Error types for campus-sync.

use std::path::PathBuf;

use thiserror::Error;

use campus_sheets::SheetsError;

/// All errors that can abort a sync run.
///
/// Enrichment failures are deliberately absent: they degrade a single
/// record to the fallback triple and never abort the run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The destination sheet has no rows, so there is no tail to resume from.
    #[error("destination sheet is empty; cannot derive a resume watermark")]
    EmptyDestination,

    /// Watermark source is the checkpoint store, but the store has no entries.
    #[error("checkpoint store has no entries; cannot derive a resume watermark")]
    NoCheckpoint,

    /// The watermark email does not appear in the source sheet's email column.
    #[error("watermark email {email:?} not found in source sheet")]
    WatermarkNotFound { email: String },

    /// An error from the spreadsheet backend (fetch or bulk append).
    #[error("spreadsheet error: {0}")]
    Sheets(#[from] SheetsError),

    /// Checkpoint log JSON error.
    #[error("checkpoint JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
