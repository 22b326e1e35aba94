//! CLI command definitions for the `fmb` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod assemble;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Assemble declarative UI models into a descriptor registry.
#[derive(Parser)]
#[command(name = "fmb", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit log lines as JSON.
    #[arg(long, global = true, env = "FMB_LOG_JSON")]
    pub log_json: bool,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true, env = "FMB_OTEL")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assemble a model file and print the refreshed type views.
    Assemble {
        /// Path to the model file (TOML).
        model: PathBuf,

        /// Engine configuration file. Defaults to `fluentmodel.toml` next to
        /// the model file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Extra type catalog (TOML `[[types]]` tables) to declare before
        /// assembling.
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Check a model file without printing the assembled views.
    Check {
        /// Path to the model file (TOML).
        model: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
