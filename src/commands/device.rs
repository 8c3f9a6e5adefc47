//! Commands that talk to a keyboard.

use std::ffi::CString;
use std::path::Path;

use anyhow::Context;
use hidapi::HidApi;
use nuga::{restore as restore_state, Device, State};
use nuga_keyboard::TemplateSource;
use nuga_transport::PrinterConfig;

use super::{load_state, CommandResult};

fn open(
    path: &str,
    templates: &dyn TemplateSource,
    printer_config: Option<PrinterConfig>,
) -> anyhow::Result<Device> {
    let api = HidApi::new().context("initializing hidapi")?;
    let c_path = CString::new(path).context("device path contains a NUL byte")?;
    Device::open(&api, &c_path, templates, printer_config)
        .with_context(|| format!("opening {path}"))
}

/// Save the state of a keyboard
pub fn dump(
    path: &str,
    output: Option<&Path>,
    templates: &dyn TemplateSource,
    printer_config: Option<PrinterConfig>,
) -> CommandResult {
    let mut device = open(path, templates, printer_config)?;
    let state = State::collect(&mut device)?;

    match output {
        Some(file) => {
            state
                .save(file)
                .with_context(|| format!("writing {}", file.display()))?;
            println!("Saved {} state to {}", state.model, file.display());
        }
        None => println!("{}", state.to_json()?),
    }
    Ok(())
}

/// Write a saved state to a keyboard
pub fn restore(
    path: &str,
    file: &Path,
    templates: &dyn TemplateSource,
    printer_config: Option<PrinterConfig>,
) -> CommandResult {
    let state = load_state(file)?;
    let mut device = open(path, templates, printer_config)?;
    if device.name != state.model {
        eprintln!(
            "Warning: state was saved from {}, device is {}",
            state.model, device.name
        );
    }
    restore_state(&mut device.features, &state)?;
    println!("Restored {} from {}", device.name, file.display());
    Ok(())
}
