//! `campus status` — watermark and sync-history visibility.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use campus_sync::CheckpointEntry;

/// Arguments for `campus status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct StatusJson {
    runs: usize,
    current: Option<CheckpointEntry>,
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "id")]
    id: u64,
    #[tabled(rename = "last email")]
    last_email: String,
    #[tabled(rename = "synced at")]
    synced_at: String,
    #[tabled(rename = "age")]
    age: String,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let store = super::resolve_store()?;
        let log = store.load().context("failed to load checkpoint log")?;

        if self.json {
            let payload = StatusJson {
                runs: log.entries.len(),
                current: log.current().cloned(),
            };
            println!("{}", serde_json::to_string_pretty(&payload)?);
            return Ok(());
        }

        let Some(current) = log.current() else {
            println!("{}", "No sync recorded yet.".yellow());
            println!("Run: campus sync");
            return Ok(());
        };

        println!(
            "Current watermark: {} ({}, {})",
            current.last_email.green(),
            current.synced_at.to_rfc3339(),
            format_age(current.synced_at),
        );
        println!("Recorded syncs: {}", log.entries.len());

        let mut entries = log.entries.clone();
        entries.sort_by_key(|e| e.id);
        let recent: Vec<HistoryRow> = entries
            .iter()
            .rev()
            .take(5)
            .map(|entry| HistoryRow {
                id: entry.id,
                last_email: entry.last_email.clone(),
                synced_at: entry.synced_at.to_rfc3339(),
                age: format_age(entry.synced_at),
            })
            .collect();
        let mut table = Table::new(recent);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}

/// Human age of a timestamp, coarsest unit only.
fn format_age(at: DateTime<Utc>) -> String {
    let delta = Utc::now().signed_duration_since(at);
    if delta.num_days() > 0 {
        format!("{}d ago", delta.num_days())
    } else if delta.num_hours() > 0 {
        format!("{}h ago", delta.num_hours())
    } else if delta.num_minutes() > 0 {
        format!("{}m ago", delta.num_minutes())
    } else {
        "just now".to_owned()
    }
}
