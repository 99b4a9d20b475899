use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config YAML file (defaults to ./strqueue.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging for internal details
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a YAML script of queue operations against a fresh registry
    Run(RunArgs),
    /// Print the effective configuration
    Show,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the script YAML file
    pub script: PathBuf,

    /// Override the configured output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}
