//! Command-line arguments for the casework CLI.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "casework",
    version,
    about = "Run table-driven withdrawal cases from YAML files."
)]
pub struct CaseworkArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Discover case tables and run the withdrawal body against each.
    Run {
        /// Directory searched recursively for .yaml/.yml tables.
        #[arg(default_value = "tests/cases")]
        path: PathBuf,
        #[command(flatten)]
        options: RunOptions,
    },
    /// Print the effective name of every case, without running anything.
    List {
        #[arg(default_value = "tests/cases")]
        path: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct RunOptions {
    /// Only run cases whose name contains this substring.
    #[arg(long)]
    pub filter: Option<String>,
    /// Treat duplicate case names as a configuration error.
    #[arg(long)]
    pub reject_duplicates: bool,
    /// Print the reports as JSON instead of text.
    #[arg(long)]
    pub json: bool,
    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
    /// Only print failures and summaries.
    #[arg(long, short)]
    pub quiet: bool,
}
