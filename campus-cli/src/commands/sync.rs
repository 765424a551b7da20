//! `campus sync` — run the weekly pipeline once.

use std::collections::HashMap;
use std::fmt;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use campus_core::Config;
use campus_enrich::ChatEnricher;
use campus_sheets::{SheetsClient, SheetsDestination, SheetsSource};
use campus_sync::{pipeline, CheckpointStore, SyncOptions, SyncReport, WatermarkSource};

/// Arguments for `campus sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Report what would be appended without touching the destination
    /// sheet or the checkpoint log.
    #[arg(long)]
    pub dry_run: bool,

    /// Where to read the resume watermark from.
    #[arg(long, value_enum, default_value_t = WatermarkArg::Destination)]
    pub watermark: WatermarkArg,
}

/// Thin wrapper so clap can parse [`WatermarkSource`] from CLI args.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WatermarkArg {
    /// Trust the destination sheet's own last row (the default).
    Destination,
    /// Trust the checkpoint store's most recent entry.
    Store,
}

impl fmt::Display for WatermarkArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatermarkArg::Destination => write!(f, "destination"),
            WatermarkArg::Store => write!(f, "store"),
        }
    }
}

impl From<WatermarkArg> for WatermarkSource {
    fn from(arg: WatermarkArg) -> Self {
        match arg {
            WatermarkArg::Destination => WatermarkSource::DestinationTail,
            WatermarkArg::Store => WatermarkSource::CheckpointStore,
        }
    }
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let home = dirs::home_dir().context("could not determine home directory")?;
        let vars: HashMap<String, String> = std::env::vars().collect();
        let config = Config::load_at(&home, &vars).context("failed to load configuration")?;

        let client = SheetsClient::new(config.sheets.token.as_str(), config.sheets.base_url.as_str());
        let source = SheetsSource::new(
            client.clone(),
            config.sheets.source_spreadsheet.as_str(),
            config.sheets.source_range.as_str(),
        );
        let dest = SheetsDestination::new(
            client,
            config.sheets.dest_spreadsheet.as_str(),
            config.sheets.dest_range.as_str(),
        );
        let enricher = ChatEnricher::new(
            config.enrichment.api_key.as_str(),
            config.enrichment.base_url.as_str(),
            config.enrichment.model.as_str(),
            config.enrichment.temperature,
        );
        let store = match &config.checkpoint_path {
            Some(path) => CheckpointStore::new(path.clone()),
            None => CheckpointStore::open_at(&home),
        };

        let options = SyncOptions {
            watermark: self.watermark.into(),
            dry_run: self.dry_run,
        };
        let report =
            pipeline::run(&source, &dest, &enricher, &store, &options).context("sync failed")?;
        print_report(&report);
        Ok(())
    }
}

fn print_report(report: &SyncReport) {
    let prefix = if report.dry_run { "[dry-run] " } else { "" };

    if report.appended == 0 {
        println!("{prefix}✓ up to date — no new records");
    } else {
        println!(
            "{prefix}✓ synced ({} appended, {} invalid, {} enrichment fallback(s))",
            report.appended, report.invalid, report.enrich_failures
        );
    }

    if let Some(last_email) = &report.last_email {
        println!("  last email: {last_email}");
    }
    if report.usage.total_tokens > 0 {
        println!(
            "  tokens used: {} (≈ ${:.4})",
            report.usage.total_tokens,
            report.usage.estimated_cost_usd()
        );
    }
}
