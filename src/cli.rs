//! Command-line argument parsing for the deployment engine.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI entry point for the deployment engine.
///
/// There are no subcommands: one invocation processes every configured
/// definition in declaration order.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "deployer",
    about = "Synchronize repository contents into local directories",
    version
)]
pub struct Cli {
    /// Config file to use or create
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Do not create a missing config file automatically (creation is the default)
    #[arg(long = "no-create", action = clap::ArgAction::SetFalse)]
    pub create: bool,

    /// Ask before running each configured definition
    #[arg(long)]
    pub prompt: bool,

    /// Delete destination entries that are absent from the source tree
    #[arg(short, long)]
    pub upgrade: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
