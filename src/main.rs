//! Command-line binary for the declarative repository deployment engine.

use anyhow::Result;
use clap::Parser;

use deployer_cli::commands::deploy;
use deployer_cli::logging::{self, Logger};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = deployer_cli::cli::Cli::parse();
    logging::init_subscriber(args.verbose);
    let log = Logger::new();

    let result = deploy::run(&args, &log);
    log.print_summary();
    result
}
