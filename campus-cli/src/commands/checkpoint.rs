//! `campus checkpoint list` — audit-trail inspection.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tabled::{settings::Style, Table, Tabled};

/// Subcommands for `campus checkpoint`.
#[derive(Subcommand, Debug)]
pub enum CheckpointCommand {
    /// List recorded watermarks, oldest first.
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show at most this many entries (most recent kept).
    #[arg(long, default_value_t = 20)]
    pub limit: usize,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "id")]
    id: u64,
    #[tabled(rename = "last email")]
    last_email: String,
    #[tabled(rename = "synced at")]
    synced_at: String,
}

pub fn run(cmd: CheckpointCommand) -> Result<()> {
    match cmd {
        CheckpointCommand::List(args) => list(args),
    }
}

fn list(args: ListArgs) -> Result<()> {
    let store = super::resolve_store()?;
    let log = store.load().context("failed to load checkpoint log")?;

    let mut entries = log.entries;
    entries.sort_by_key(|e| e.id);
    let skip = entries.len().saturating_sub(args.limit);
    let entries = &entries[skip..];

    if args.json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("Checkpoint log is empty.");
        return Ok(());
    }

    let rows: Vec<EntryRow> = entries
        .iter()
        .map(|entry| EntryRow {
            id: entry.id,
            last_email: entry.last_email.clone(),
            synced_at: entry.synced_at.to_rfc3339(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}
