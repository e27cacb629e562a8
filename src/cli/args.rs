//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;

use super::commands::cache::CacheArgs;

/// Stepline - run a configured pipeline of steps over an input.
#[derive(Debug, Parser)]
#[command(name = "stepline")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the workflow configuration file (JSON or YAML)
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory for final reports (overrides config and WORKFLOW_OUTPUT_DIR)
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Directory for intermediate results (overrides config and WORKFLOW_CACHE_DIR)
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Path to a .env file with additional environment variables
    #[arg(long, global = true, default_value = ".env")]
    pub env_file: PathBuf,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Do not check required environment variables before running
    #[arg(long, global = true)]
    pub skip_env_check: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the workflow once on an input
    Run(RunArgs),

    /// Run the workflow on every line of a file
    Batch(BatchArgs),

    /// List the configured steps
    List(ListArgs),

    /// Show the most recent workflow report
    Last(LastArgs),

    /// Inspect or clear intermediate results
    Cache(CacheArgs),

    /// Prompt for an input and run the workflow (default if no command specified)
    Interactive(InteractiveArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RunArgs {
    /// Input for the first step (a URL unless --no-normalize is given)
    pub input: String,

    /// Do not save intermediate results
    #[arg(long)]
    pub no_cache: bool,

    /// Print the workflow result as JSON
    #[arg(long)]
    pub json: bool,

    /// Pass the input through unchanged instead of normalizing it as a URL
    #[arg(long)]
    pub no_normalize: bool,
}

/// Arguments for the `batch` command.
#[derive(Debug, Clone, clap::Args)]
pub struct BatchArgs {
    /// File with one input per line
    pub file: PathBuf,

    /// Do not save intermediate results
    #[arg(long)]
    pub no_cache: bool,

    /// Pass inputs through unchanged instead of normalizing them as URLs
    #[arg(long)]
    pub no_normalize: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Print the step list as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `last` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct LastArgs {
    /// Print the raw report JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `interactive` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InteractiveArgs {
    /// Do not save intermediate results
    #[arg(long)]
    pub no_cache: bool,

    /// Pass the input through unchanged instead of normalizing it as a URL
    #[arg(long)]
    pub no_normalize: bool,
}
