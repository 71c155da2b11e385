//! dictcache - Cache-backed dictionary loader
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use dictcache::cli::{commands, Cli, Commands};
use dictcache::config::{Config, ConfigManager};
use dictcache::error::DictResult;
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

async fn run() -> DictResult<()> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::new(cli.config.clone());
    let config = config_manager.load().await?;

    init_logging(cli.verbose, &config);
    debug!("Using config {}", config_manager.path().display());

    match cli.command {
        Commands::Load(args) => {
            let sandbox = config.build_sandbox(cli.home.as_deref())?;
            commands::load(args, &config, sandbox).await
        }
        Commands::Check(args) => {
            let sandbox = config.build_sandbox(cli.home.as_deref())?;
            commands::check(args, &sandbox)
        }
        Commands::Resources => commands::resources(),
        Commands::Config(args) => commands::config(args, &config, &config_manager).await,
    }
}

/// Initialize logging: 0 = warn, 1 = info, 2+ = debug
///
/// `general.verbose` in the config raises the floor to info. Logs go to
/// stderr so command output stays pipeable.
fn init_logging(verbose: u8, config: &Config) {
    let level = match (verbose, config.general.verbose) {
        (0, false) => "warn",
        (0, true) | (1, _) => "info",
        _ => "debug",
    };
    let filter = EnvFilter::new(format!("dictcache={}", level));

    if config.general.log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .init();
    }
}
