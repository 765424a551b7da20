//! # campus-enrich
//!
//! Geography and phone enrichment over a chat-completion service.
//!
//! One record in, one blocking request out: given a city and a raw phone
//! value, the service returns the country, continent, and a corrected
//! phone number as a strict JSON object. Failures surface as typed
//! [`EnrichError`]s; the caller decides whether to degrade to
//! [`Enrichment::fallback`].

pub mod client;
pub mod error;
pub mod usage;

pub use client::{ChatEnricher, Enricher, Enrichment};
pub use error::EnrichError;
pub use usage::Usage;
