//! fluentmodel CLI entry point.
//!
//! Binary name: `fmb`
//!
//! Parses CLI arguments, sets up tracing, then dispatches to the command
//! handler.

mod cli;
mod model_file;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use fluentmodel_observe::tracing_setup::{self, TracingOptions};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need tracing
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "fmb", &mut std::io::stdout());
        return Ok(());
    }

    tracing_setup::init_tracing(&TracingOptions {
        default_directive: tracing_setup::verbosity_directive(cli.verbose, cli.quiet).to_string(),
        json: cli.log_json,
        enable_otel: cli.otel,
    })
    .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    let result = match &cli.command {
        Commands::Assemble { model, config, catalog } => {
            cli::assemble::assemble(model, config.as_deref(), catalog.as_deref(), cli.json)
        }
        Commands::Check { model, config, catalog } => {
            cli::assemble::check(model, config.as_deref(), catalog.as_deref(), cli.json)
        }
        Commands::Completions { .. } => Ok(()),
    };

    tracing_setup::shutdown_tracing();
    result
}
