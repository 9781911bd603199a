mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::Cli;
use crate::error::Result;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\nError: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!("Rama-Z CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let app_config = config::build_config(&cli)?;
    let result = commands::score::run(app_config);

    match &result {
        Ok(_) => info!("Command completed successfully."),
        Err(e) => error!("Command failed: {}", e),
    }
    result
}
