//! Device state snapshots
//!
//! A [`State`] holds everything needed to put a keyboard back the way it
//! was: raw color and params responses plus both key-code arrays. Snapshots
//! are JSON documents; `defaults/` ships the factory state of known models.

use std::path::Path;

use nuga_keyboard::{
    BacklightColors, Effects, KeysSimulation, KeysState, LightSimulation, LightState, Model,
    TemplateSource,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::device::{Device, Features};
use crate::error::DumpError;

/// Path reported by simulated devices
pub const SIMULATION_PATH: &str = "/simulated/device/path";

/// Complete state of one keyboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    #[serde(rename = "name", alias = "model")]
    pub model: Model,
    pub firmware: String,
    pub lights: LightState,
    pub keys: KeysState,
}

impl State {
    /// Read the full state of a device
    pub fn collect(device: &mut Device) -> Result<Self, DumpError> {
        let features = &mut device.features;
        let state = Self {
            model: device.name.clone(),
            firmware: device.firmware.clone(),
            lights: LightState::collect(features.light.as_mut())?,
            keys: KeysState::collect(features.keys.as_mut())?,
        };
        info!("Collected state of {}", state.model);
        Ok(state)
    }

    pub fn from_json(json: &str) -> Result<Self, DumpError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, DumpError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a snapshot from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DumpError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        debug!("Loaded snapshot from {}", path.as_ref().display());
        Self::from_json(&content)
    }

    /// Write the snapshot as a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), DumpError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        debug!("Saved snapshot to {}", path.as_ref().display());
        Ok(())
    }
}

/// Write a snapshot back to a device
///
/// The snapshot is fully decoded before anything is written. Writes happen
/// in a fixed order: backlight colors, mac codes, win codes, effects. The
/// first failure stops the sequence.
pub fn restore(features: &mut Features, state: &State) -> Result<(), DumpError> {
    let colors = BacklightColors::parse(&state.lights.colors)?;
    let effects = Effects::from_response(&state.lights.params)?;

    features.light.set_backlight_colors(&colors)?;
    features.keys.set_mac_codes(&state.keys.mac)?;
    features.keys.set_win_codes(&state.keys.win)?;
    features.light.set_effects(&effects)?;
    info!("Restored state of {}", state.model);
    Ok(())
}

/// Open an in-memory device that starts out in `state`
pub fn open_simulation(
    state: &State,
    templates: &dyn TemplateSource,
) -> Result<Device, DumpError> {
    let template = templates.template(&state.model);
    let features = Features {
        light: Box::new(LightSimulation::new(&state.lights)?),
        keys: Box::new(KeysSimulation::new(&state.keys, template)?),
    };
    info!("Opened simulated {}", state.model);
    Ok(Device {
        name: state.model.clone(),
        path: SIMULATION_PATH.to_string(),
        firmware: state.firmware.clone(),
        features,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_model_alias() {
        let json = r#"{"model":"Halo65","firmware":"1.0.0",
            "lights":{"colors":[],"params":[]},"keys":{"mac":[],"win":[]}}"#;
        let state = State::from_json(json).unwrap();
        assert_eq!(state.model, "Halo65");

        let out = state.to_json().unwrap();
        assert!(out.contains(r#""name": "Halo65""#));
        assert!(!out.contains("\"model\""));
    }

    #[test]
    fn test_missing_field_is_error() {
        let err = State::from_json(r#"{"name":"Halo75"}"#).unwrap_err();
        assert!(matches!(err, DumpError::Json(_)));
    }
}
