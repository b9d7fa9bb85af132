//! Setshaba CLI: the `setshaba` command.

mod cli;
mod commands;
mod logging;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let config = support::load_config_or_exit(cli.config.as_deref());
    logging::init(cli.log_level.as_deref().unwrap_or(&config.log.level));
    tracing::debug!(
        config = ?cli.config,
        seed = ?config.store.seed,
        "configuration loaded"
    );

    match cli.command {
        Commands::Snapshot { json } => commands::snapshot::run(&config, json),

        Commands::Issues {
            search,
            category,
            status,
            json,
        } => commands::issues::run(&config, search, category, status, json),

        Commands::Events {
            upcoming,
            today,
            json,
        } => commands::events::run(&config, upcoming, today, json),

        Commands::Dashboard { today, json } => commands::dashboard::run(&config, today, json),

        Commands::Home { json } => commands::home::run(&config, json),

        Commands::Session {
            script,
            journal_out,
            at,
            json,
        } => commands::session::run(config, script, journal_out, at, json),
    }
}
