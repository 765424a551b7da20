//! Error types for campus-sheets.

use thiserror::Error;

/// All errors that can arise talking to the spreadsheet backend.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// Transport-level failure (DNS, TLS, connect, read).
    #[error("spreadsheet transport error: {source}")]
    Transport {
        #[source]
        source: Box<ureq::Error>,
    },

    /// The API answered with a non-success status.
    #[error("spreadsheet API returned {status} for {context}: {body}")]
    Status {
        status: u16,
        context: String,
        body: String,
    },

    /// The response body was not the JSON shape we expect.
    #[error("malformed spreadsheet response for {context}: {source}")]
    Body {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Fold a `ureq` error into [`SheetsError`], keeping the response body of
/// status errors for the log.
pub(crate) fn request_err(context: &str, err: ureq::Error) -> SheetsError {
    match err {
        ureq::Error::Status(status, response) => SheetsError::Status {
            status,
            context: context.to_owned(),
            body: response.into_string().unwrap_or_default(),
        },
        transport => SheetsError::Transport {
            source: Box::new(transport),
        },
    }
}
