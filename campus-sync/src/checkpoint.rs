//! Checkpoint store — append-only log of resume watermarks.
//!
//! Persists a `CheckpointLog` JSON document at
//! `<home>/.campus/checkpoints.json` (or any explicit path).
//! Writes use an atomic `.tmp` + rename pattern; entries are never
//! rewritten or deleted, so the file doubles as an audit trail of every
//! sync that ever committed.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{io_err, SyncError};

/// One committed sync: the email of the last appended record and when it
/// was recorded. The entry with the greatest `id` is the current watermark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointEntry {
    pub id: u64,
    pub last_email: String,
    pub synced_at: DateTime<Utc>,
}

/// On-disk checkpoint payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointLog {
    #[serde(default)]
    pub entries: Vec<CheckpointEntry>,
}

impl CheckpointLog {
    /// Entry with the greatest id, if any.
    pub fn current(&self) -> Option<&CheckpointEntry> {
        self.entries.iter().max_by_key(|e| e.id)
    }
}

/// Default log location rooted at `home`: `<home>/.campus/checkpoints.json`.
pub fn store_path_at(home: &Path) -> PathBuf {
    home.join(".campus").join("checkpoints.json")
}

/// Handle to one checkpoint log file.
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the default location under `home`.
    pub fn open_at(home: &Path) -> Self {
        Self::new(store_path_at(home))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full log. A missing file is an empty log, not an error.
    pub fn load(&self) -> Result<CheckpointLog, SyncError> {
        if !self.path.exists() {
            return Ok(CheckpointLog::default());
        }
        let contents =
            std::fs::read_to_string(&self.path).map_err(|e| io_err(&self.path, e))?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Most recently recorded entry, or `None` if never set.
    pub fn last(&self) -> Result<Option<CheckpointEntry>, SyncError> {
        Ok(self.load()?.current().cloned())
    }

    /// Append a new watermark. Prior entries are never touched.
    pub fn record(&self, email: &str) -> Result<CheckpointEntry, SyncError> {
        let mut log = self.load()?;
        let next_id = log.current().map(|e| e.id + 1).unwrap_or(1);
        let entry = CheckpointEntry {
            id: next_id,
            last_email: email.to_owned(),
            synced_at: Utc::now(),
        };
        log.entries.push(entry.clone());
        self.save(&log)?;
        Ok(entry)
    }

    /// Save the log atomically: write to `<path>.tmp`, then rename.
    fn save(&self, log: &CheckpointLog) -> Result<(), SyncError> {
        let Some(dir) = self.path.parent() else {
            return Err(io_err(
                &self.path,
                std::io::Error::other("invalid checkpoint path"),
            ));
        };
        std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;

        let json = serde_json::to_string_pretty(log)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, &json).map_err(|e| io_err(&tmp, e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| io_err(&self.path, e))?;
        Ok(())
    }
}
