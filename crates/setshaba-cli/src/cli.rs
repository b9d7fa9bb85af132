use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "setshaba",
    about = "Setshaba Connect: community issue reporting over an in-memory store",
    version
)]
pub struct Cli {
    /// Path to setshaba.toml (default: ./setshaba.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `setshaba_store=debug`.
    /// `RUST_LOG` takes precedence.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize the seeded store and print its snapshot ref
    Snapshot {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List issues, optionally filtered
    Issues {
        /// Case-insensitive search over title, description, and location
        #[arg(long)]
        search: Option<String>,

        /// Category: Water, Electricity, Roads, Waste, or Other
        #[arg(long)]
        category: Option<String>,

        /// Status: Reported, "In Progress", or Resolved
        #[arg(long)]
        status: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List community events
    Events {
        /// Only events after today
        #[arg(long)]
        upcoming: bool,

        /// Override today's date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Admin dashboard: counters, urgent issues, feedback by status
    Dashboard {
        /// Override today's date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Citizen home page: counters, urgent and recent issues, announcements
    Home {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a JSONL session script against a freshly seeded store
    Session {
        /// Script path, or `-` for stdin
        script: String,

        /// Write the mutation journal as JSONL
        #[arg(long)]
        journal_out: Option<PathBuf>,

        /// Session clock for actions without `at` (RFC 3339; default: now)
        #[arg(long)]
        at: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
