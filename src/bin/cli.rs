//! newswatch CLI
//!
//! Runs one crawl-merge cycle per invocation, intended to be driven by a
//! scheduler. Exit codes distinguish failure phases so alerting can tell
//! "the index broke" from "the disk broke":
//!
//! - 0: success, including a run that found no new updates
//! - 2: index traversal failed
//! - 3: the persisted archive exists but could not be read
//! - 4: the merged archive could not be written
//! - 1: anything else (configuration, selector parsing, ...)

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use newswatch::{
    error::{AppError, Result},
    models::Config,
    pipeline,
    storage::{LocalStore, UpdateStore},
};

/// newswatch - Incremental news index crawler
#[derive(Parser, Debug)]
#[command(
    name = "newswatch",
    version,
    about = "Incrementally crawls a news index and archives new posts"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one crawl-merge cycle against the configured index
    Crawl {
        /// Override the archive file path from the config
        #[arg(long)]
        data_file: Option<PathBuf>,
    },

    /// Validate the configuration file
    Validate,

    /// Show a summary of the persisted archive
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn exit_code(error: &AppError) -> i32 {
    match error {
        AppError::IndexLoad { .. } => 2,
        AppError::StoreLoad { .. } => 3,
        AppError::Persist { .. } => 4,
        _ => 1,
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(error) = run(cli).await {
        log::error!("{error}");
        std::process::exit(exit_code(&error));
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Crawl { data_file } => {
            config.validate()?;

            let path = data_file.unwrap_or_else(|| PathBuf::from(&config.source.data_file));
            let store = LocalStore::new(path);

            let report = pipeline::run_crawl(&config, &store).await?;
            if report.new_count == 0 {
                log::info!("No new updates found.");
            } else {
                log::info!(
                    "{} new updates found ({} archived in total).",
                    report.new_count,
                    report.total
                );
            }
        }

        Command::Validate => {
            config.validate()?;
            log::info!("Configuration OK");
        }

        Command::Info => {
            let store = LocalStore::new(&config.source.data_file);
            let updates = store.load().await?;

            log::info!("Archive: {}", config.source.data_file);
            log::info!("Archived updates: {}", updates.len());
            if let Some(latest) = updates.first() {
                log::info!("Most recent: {} ({})", latest.timestamp, latest.link);
            }
        }
    }

    Ok(())
}
