mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod viewer;

use crate::cli::{Cli, Commands};
use crate::config::PartialConfig;
use crate::error::Result;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    info!("T3PS CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let partial = PartialConfig::load(cli.config.as_deref())?;

    let result = match cli.command {
        Commands::Measure(args) => {
            info!("Dispatching to 'measure' command.");
            commands::measure::run(args, partial)
        }
        Commands::Identify(args) => {
            info!("Dispatching to 'identify' command.");
            commands::identify::run(args, partial)
        }
        Commands::Table => {
            info!("Dispatching to 'table' command.");
            commands::table::run(partial)
        }
        Commands::Analyze(args) => {
            info!("Dispatching to 'analyze' command.");
            commands::analyze::run(args, partial)
        }
    };

    match &result {
        Ok(()) => info!("Command completed successfully."),
        Err(e) => error!("Command failed: {}", e),
    }
    result
}
