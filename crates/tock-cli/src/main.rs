use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tock_cli::commands::{categories, log, status, summary, timer};
use tock_cli::{Cli, Commands, Config};

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(tock_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = tock_db::Database::open(&config.database_path).with_context(|| {
        format!(
            "failed to open database {}",
            config.database_path.display()
        )
    })?;
    Ok((db, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so the timer readout and command output own stdout
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let (db, config) = open_database(cli.config.as_deref())?;
    let mut stdout = std::io::stdout();

    match cli.command {
        None => timer::run(db, &config, None)?,
        Some(Commands::Timer { category }) => timer::run(db, &config, category)?,
        Some(Commands::Categories { json }) => categories::run(&mut stdout, &db, json)?,
        Some(Commands::Log { limit, all, json }) => {
            let limit = if all { None } else { Some(limit) };
            log::run(&mut stdout, &db, limit, json)?;
        }
        Some(Commands::Summary { json }) => summary::run(&mut stdout, &db, json)?,
        Some(Commands::Status) => status::run(&mut stdout, &db, &config.database_path)?,
    }

    Ok(())
}
