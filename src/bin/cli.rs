//! Competition scraper CLI
//!
//! Each subcommand runs one collection workflow to completion and exits.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use competition_scraper::{
    error::Result,
    models::{Config, RunContext},
    pipeline,
    services::Fetcher,
    utils::http::HttpSource,
};

/// Competition scraper - functional fitness competition collector
#[derive(Parser, Debug)]
#[command(
    name = "competition-scraper",
    version,
    about = "Collects competition listings into one JSON file"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Override the competitions file path
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write raw listing events as compact JSON
    List,

    /// Collect listing competitions with their pictures
    Collect,

    /// Append upcoming leaderboard competitions to the existing file
    Append,

    /// Validate configuration
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Resolves when the operator presses Ctrl-C.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Exit without writing on a second Ctrl-C.
///
/// Listening for Ctrl-C replaces the default handler, so once pagination has
/// taken the first signal nothing else would stop the process.
fn exit_on_second_interrupt() {
    tokio::spawn(async {
        if second_interrupt(tokio::signal::ctrl_c).await {
            log::error!("Interrupted twice. Exiting.");
            std::process::exit(130);
        }
    });
}

/// Wait for two interrupts, prompting only after the first.
///
/// Returns `false` when the signal cannot be listened for.
async fn second_interrupt<F, Fut>(mut next: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::io::Result<()>>,
{
    if next().await.is_err() {
        return false;
    }
    log::warn!("Interrupt received. Press Ctrl-C again to exit without writing.");
    next().await.is_ok()
}

/// Build the HTTP-backed fetcher shared by every request of a run.
fn create_fetcher(config: &Config) -> Result<Fetcher> {
    if config.http.timeout_secs.is_none() {
        log::debug!("No request timeout configured; a stalled request blocks the run");
    }
    let source = HttpSource::from_config(&config.http)?;
    Ok(Fetcher::new(Arc::new(source)))
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    if let Some(path) = cli.output {
        config.output.competitions_file = path.to_string_lossy().into_owned();
    }
    log::debug!("Loaded configuration from {}", cli.config.display());

    let run = RunContext::start();

    match cli.command {
        Command::List => {
            let fetcher = create_fetcher(&config)?;
            exit_on_second_interrupt();
            let summary = pipeline::run_list(&config, &run, &fetcher, interrupted()).await?;
            log::info!(
                "Listed {} events over {} pages ({:?})",
                summary.events,
                summary.pages_fetched,
                summary.stop
            );
        }

        Command::Collect => {
            let fetcher = create_fetcher(&config)?;
            exit_on_second_interrupt();
            let summary = pipeline::run_collect(&config, &run, &fetcher, interrupted()).await?;
            log::info!(
                "Collected {} competitions over {} pages ({:?}), {} with pictures",
                summary.records,
                summary.pages_fetched,
                summary.stop,
                summary.pictures
            );
        }

        Command::Append => {
            let fetcher = create_fetcher(&config)?;
            match pipeline::run_append(&config, &run, &fetcher).await {
                Ok(summary) => log::info!(
                    "Appended {} of {} leaderboard competitions ({} past skipped); {} total in {}",
                    summary.appended,
                    summary.listed,
                    summary.skipped_past,
                    summary.total,
                    summary.path.display()
                ),
                Err(e) => {
                    log::error!("Append failed: {}", e);
                    return Err(e);
                }
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }
    }

    log::info!("Done!");

    Ok(())
}
