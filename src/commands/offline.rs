//! Commands that work on state files only.

use std::path::Path;

use nuga::open_simulation;
use nuga_keyboard::{KeySystem, LightParams, TemplateSource};

use super::{load_state, CommandResult};

/// Print the named key map of a state file
pub fn keymap(file: &Path, system: KeySystem, templates: &dyn TemplateSource) -> CommandResult {
    let state = load_state(file)?;
    let mut device = open_simulation(&state, templates)?;
    let map = device.features.keys.get_keys(system)?;

    println!("{} {} key map ({} keys):", state.model, system.name(), map.len());
    for (name, code) in map.iter() {
        println!("  {name:<12} 0x{code:08x}");
    }
    Ok(())
}

/// Open a state file as a simulated device and print what it reports
pub fn simulate(file: &Path, templates: &dyn TemplateSource) -> CommandResult {
    let state = load_state(file)?;
    let mut device = open_simulation(&state, templates)?;

    println!("Device:   {}", device.name);
    println!("Path:     {}", device.path);
    println!("Firmware: {}", device.firmware);

    let light = device.features.light.as_mut();
    let effects = light.get_effects()?;
    println!("Effects:");
    print_params("backlight", &effects.backlight);
    print_params("sidelight", &effects.sidelight);
    print_params("halo", &effects.halo);

    let colors = light.get_backlight_colors()?;
    if let Some(row) = colors.row(0) {
        println!("Colors:   {} zones, zone 0 = {:?}", colors.rows().len(), row);
    }

    let keys = device.features.keys.as_ref();
    match keys.template().map(|t| t.len()) {
        Some(named) => println!("Keys:     {named} named keys per layer"),
        None => println!("Keys:     no layout template for {}", device.name),
    }
    Ok(())
}

fn print_params(domain: &str, params: &LightParams) {
    println!(
        "  {domain:<10} mode={} color={} brightness={} speed={}",
        params.mode, params.color, params.brightness, params.speed
    );
}
