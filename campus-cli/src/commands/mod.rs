//! CLI subcommand implementations.

pub mod checkpoint;
pub mod status;
pub mod sync;

use std::path::PathBuf;

use anyhow::{Context, Result};

use campus_core::config::VAR_CHECKPOINT_PATH;
use campus_sync::CheckpointStore;

/// Resolve the checkpoint store for read-only commands without demanding
/// full credentials: the env override wins, otherwise the default under
/// the home directory.
pub(crate) fn resolve_store() -> Result<CheckpointStore> {
    match std::env::var(VAR_CHECKPOINT_PATH) {
        Ok(path) if !path.is_empty() => Ok(CheckpointStore::new(PathBuf::from(path))),
        _ => {
            let home = dirs::home_dir().context("could not determine home directory")?;
            Ok(CheckpointStore::open_at(&home))
        }
    }
}
