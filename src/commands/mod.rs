//! Command handlers for the CLI application.
//!
//! - `device`: commands that talk to a keyboard (dump, restore)
//! - `offline`: commands that work on state files only (keymap, simulate)

pub mod device;
pub mod offline;

use std::path::Path;

use anyhow::Context;
use nuga::State;
use nuga_keyboard::{template_registry, TemplateRegistry, TemplateSource};
use nuga_transport::{PacketFilter, PrinterConfig};
use tracing::info;

/// Result type for command handlers
pub type CommandResult = anyhow::Result<()>;

/// Build printer configuration from CLI flags
pub fn create_printer_config(
    monitor: bool,
    hex: bool,
    filter: Option<&str>,
) -> anyhow::Result<Option<PrinterConfig>> {
    if !monitor {
        return Ok(None);
    }

    let filter = match filter {
        Some(f) => f.parse::<PacketFilter>().map_err(anyhow::Error::msg)?,
        None => PacketFilter::All,
    };

    Ok(Some(
        PrinterConfig::default().with_hex(hex).with_filter(filter),
    ))
}

/// Template lookup for this run
///
/// Without a templates directory the process-wide builtin registry is used.
pub enum Templates {
    Builtin(&'static TemplateRegistry),
    Custom(TemplateRegistry),
}

impl Templates {
    pub fn load(dir: Option<&Path>) -> anyhow::Result<Self> {
        let Some(dir) = dir else {
            return Ok(Self::Builtin(template_registry()));
        };
        let mut registry = TemplateRegistry::with_builtins();
        let count = registry
            .load_from_directory(dir)
            .with_context(|| format!("reading templates from {}", dir.display()))?;
        info!("Loaded {count} templates from {}", dir.display());
        Ok(Self::Custom(registry))
    }

    pub fn source(&self) -> &dyn TemplateSource {
        match self {
            Self::Builtin(registry) => *registry,
            Self::Custom(registry) => registry,
        }
    }
}

/// Read a state file with path context on errors
pub fn load_state(path: &Path) -> anyhow::Result<State> {
    State::load(path).with_context(|| format!("loading state from {}", path.display()))
}
