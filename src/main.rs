//! NuPhy Halo keyboard CLI
//!
//! Dumps, restores and inspects keyboard state.

use clap::Parser;
use tracing_subscriber::EnvFilter;

// CLI definitions
mod cli;
use cli::{Cli, Commands};

// Command handlers
mod commands;
use commands::Templates;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let printer_config =
        commands::create_printer_config(cli.monitor, cli.hex, cli.filter.as_deref())?;
    let templates = Templates::load(cli.templates.as_deref())?;

    match cli.command {
        Commands::Dump { device, output } => {
            commands::device::dump(
                &device,
                output.as_deref(),
                templates.source(),
                printer_config,
            )?;
        }
        Commands::Restore { device, file } => {
            commands::device::restore(&device, &file, templates.source(), printer_config)?;
        }
        Commands::Keymap { file, system } => {
            commands::offline::keymap(&file, system.into(), templates.source())?;
        }
        Commands::Simulate { file } => {
            commands::offline::simulate(&file, templates.source())?;
        }
    }

    Ok(())
}
