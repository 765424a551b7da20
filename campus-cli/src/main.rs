//! Campus — newcomer-registration sync CLI.
//!
//! # Usage
//!
//! ```text
//! campus sync [--dry-run] [--watermark destination|store]
//! campus status [--json]
//! campus checkpoint list [--limit N] [--json]
//! ```
//!
//! Credentials and sheet identifiers come from the environment (or
//! `~/.campus/config.yaml`), never from flags; see `campus-core::config`.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{checkpoint::CheckpointCommand, status::StatusArgs, sync::SyncArgs};

#[derive(Parser, Debug)]
#[command(
    name = "campus",
    version,
    about = "Sync newcomer registrations between spreadsheets",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the incremental sync pipeline once.
    Sync(SyncArgs),

    /// Show the current watermark and recent sync history.
    Status(StatusArgs),

    /// Inspect the append-only checkpoint log.
    Checkpoint {
        #[command(subcommand)]
        command: CheckpointCommand,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Status(args) => args.run(),
        Commands::Checkpoint { command } => commands::checkpoint::run(command),
    }
}
