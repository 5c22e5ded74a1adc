//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{completions::CompletionsArgs, map::MapArgs, run::RunArgs};

#[derive(Parser)]
#[command(name = "modfix")]
#[command(author, version, about = "Repair NULL module assignments in a Frappe app")]
#[command(long_about = "Fills in \"module\": null in a Frappe app's custom JSON files and fixtures, \
using the modules listed in modules.txt plus optional overrides.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fix NULL modules in custom JSON files and fixtures
    Run(RunArgs),

    /// Show the merged module map without touching any file
    Map(MapArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Coloured progress and tables
    #[default]
    Human,
    /// JSON report (for programming)
    Json,
}
