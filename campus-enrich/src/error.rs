//! Error types for campus-enrich.

use thiserror::Error;

/// All errors that can arise from one enrichment call.
#[derive(Debug, Error)]
pub enum EnrichError {
    /// Transport-level failure (DNS, TLS, connect, read).
    #[error("enrichment transport error: {source}")]
    Transport {
        #[source]
        source: Box<ureq::Error>,
    },

    /// The completion API answered with a non-success status.
    #[error("enrichment API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not valid JSON at the envelope level.
    #[error("malformed enrichment response: {source}")]
    Body {
        #[source]
        source: std::io::Error,
    },

    /// The envelope parsed but carried no message content.
    #[error("enrichment response has no completion content")]
    MissingContent,

    /// The completion text was not the expected three-field JSON object.
    #[error("completion is not the expected JSON schema: {source}; content: {content:?}")]
    Schema {
        content: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Fold a `ureq` error into [`EnrichError`].
pub(crate) fn request_err(err: ureq::Error) -> EnrichError {
    match err {
        ureq::Error::Status(status, response) => EnrichError::Status {
            status,
            body: response.into_string().unwrap_or_default(),
        },
        transport => EnrichError::Transport {
            source: Box::new(transport),
        },
    }
}
