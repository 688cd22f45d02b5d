//! brewse - Interactive Homebrew package browser
//!
//! CLI entry point that dispatches to subcommands.

use brewse::cli::{Cli, Commands};
use brewse::config::ConfigManager;
use brewse::error::BrewseResult;
use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> BrewseResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn (spinners only), 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("brewse=warn"),
        1 => EnvFilter::new("brewse=info"),
        _ => EnvFilter::new("brewse=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    cli.check_browse_flags()?;

    // Completions don't need config loading
    if let Some(Commands::Completions(args)) = cli.command {
        brewse::cli::commands::completions(args);
        return Ok(());
    }

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    debug!("Using config {}", config_manager.path().display());
    let config = config_manager.load().await?;

    match cli.command {
        None => brewse::cli::commands::browse(cli.browse, &config).await,
        Some(Commands::Browse(args)) => {
            brewse::cli::commands::browse(cli.browse.merge(args)?, &config).await
        }
        Some(Commands::Cache(args)) => brewse::cli::commands::cache(args, &config).await,
        Some(Commands::Config(args)) => {
            brewse::cli::commands::config(args, &config_manager, &config).await
        }
        Some(Commands::Completions(_)) => unreachable!("Completions handled above"),
    }
}
