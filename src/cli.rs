// CLI definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use nuga_keyboard::KeySystem;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nuga")]
#[command(author, version, about = "NuPhy Halo keyboard tool")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log level used when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Directory with extra layout templates (*.json)
    #[arg(long, global = true, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Enable transport monitoring (prints all commands/responses)
    #[arg(long, global = true)]
    pub monitor: bool,

    /// Show full hex dumps when monitoring
    #[arg(long, global = true)]
    pub hex: bool,

    /// Monitor filter (all, requests, sends, cmd=0xNN)
    #[arg(long, global = true)]
    pub filter: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save the full state of a keyboard to a JSON file
    Dump {
        /// hidapi device path
        #[arg(long)]
        device: String,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a saved state back to a keyboard
    Restore {
        /// hidapi device path
        #[arg(long)]
        device: String,
        /// State file produced by `dump`
        file: PathBuf,
    },

    /// Print the named key map stored in a state file
    #[command(visible_alias = "km")]
    Keymap {
        /// State file produced by `dump`
        file: PathBuf,
        /// Key-code set to print
        #[arg(short, long, value_enum, default_value = "mac")]
        system: SystemArg,
    },

    /// Open a state file as a simulated keyboard and show what it reports
    #[command(visible_alias = "sim")]
    Simulate {
        /// State file (e.g. defaults/Halo75.json)
        file: PathBuf,
    },
}

/// Key-code set selector
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SystemArg {
    Mac,
    Win,
}

impl From<SystemArg> for KeySystem {
    fn from(arg: SystemArg) -> Self {
        match arg {
            SystemArg::Mac => KeySystem::Mac,
            SystemArg::Win => KeySystem::Win,
        }
    }
}
