//! # campus-sync
//!
//! Watermark-based incremental synchronization.
//!
//! Call [`pipeline::run`] to move every registration newer than the
//! resume watermark from the source sheet to the destination sheet,
//! validating, normalizing, and enriching each record on the way. The
//! [`checkpoint`] module keeps the append-only audit log of watermarks.

pub mod checkpoint;
pub mod error;
pub mod pipeline;

pub use checkpoint::{CheckpointEntry, CheckpointStore};
pub use error::SyncError;
pub use pipeline::{run, SyncOptions, SyncReport, WatermarkSource};
