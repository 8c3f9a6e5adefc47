//! In-memory keyboard
//!
//! A simulated keyboard answers the same [`KeysFeature`] and [`LightFeature`]
//! calls as a live one, backed by a state snapshot instead of a transport.
//! Reads go through the same codecs, so a simulation built from a snapshot
//! reads back exactly what parsing the snapshot's raw buffers yields.

use std::sync::Arc;

use nuga_transport::protocol::{cmd, colors, keys, params};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::colors::BacklightColors;
use crate::effects::{params_window, Effects};
use crate::error::KeyboardError;
use crate::keys::{KeySystem, KeysFeature};
use crate::layout::Template;
use crate::light::LightFeature;
use crate::macros::Macros;

/// Raw key-code arrays of both key systems
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeysState {
    pub mac: Vec<u32>,
    pub win: Vec<u32>,
}

impl KeysState {
    /// Read both arrays from a keyboard
    pub fn collect(keys: &mut dyn KeysFeature) -> Result<Self, KeyboardError> {
        Ok(Self {
            mac: keys.get_mac_codes()?,
            win: keys.get_win_codes()?,
        })
    }
}

/// Raw lighting responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightState {
    /// Full get colors response
    pub colors: Vec<u8>,
    /// Full get params response
    pub params: Vec<u8>,
}

impl LightState {
    /// Read both raw responses from a keyboard
    pub fn collect(light: &mut dyn LightFeature) -> Result<Self, KeyboardError> {
        Ok(Self {
            colors: light.get_raw_colors()?,
            params: light.get_raw_effects()?,
        })
    }
}

/// Simulated key assignments
#[derive(Debug, Clone)]
pub struct KeysSimulation {
    mac: Vec<u32>,
    win: Vec<u32>,
    macros: Macros,
    template: Option<Arc<Template>>,
}

impl KeysSimulation {
    pub fn new(state: &KeysState, template: Option<Arc<Template>>) -> Result<Self, KeyboardError> {
        for codes in [&state.mac, &state.win] {
            if codes.len() != keys::SLOTS {
                return Err(KeyboardError::length(
                    "key code array",
                    keys::SLOTS,
                    codes.len(),
                ));
            }
        }
        Ok(Self {
            mac: state.mac.clone(),
            win: state.win.clone(),
            macros: Macros::default(),
            template,
        })
    }

    fn codes_mut(&mut self, system: KeySystem) -> &mut Vec<u32> {
        match system {
            KeySystem::Mac => &mut self.mac,
            KeySystem::Win => &mut self.win,
        }
    }
}

impl KeysFeature for KeysSimulation {
    fn template(&self) -> Option<&Template> {
        self.template.as_deref()
    }

    fn get_codes(&mut self, system: KeySystem) -> Result<Vec<u32>, KeyboardError> {
        Ok(self.codes_mut(system).clone())
    }

    fn set_codes(&mut self, system: KeySystem, codes: &[u32]) -> Result<(), KeyboardError> {
        if codes.len() != keys::SLOTS {
            return Err(KeyboardError::length(
                "key code array",
                keys::SLOTS,
                codes.len(),
            ));
        }
        debug!("Simulated write of {} key codes", system.name());
        self.codes_mut(system).copy_from_slice(codes);
        Ok(())
    }

    fn get_macros(&mut self) -> Result<Macros, KeyboardError> {
        Ok(self.macros.clone())
    }

    fn set_macros(&mut self, macros: &Macros) -> Result<(), KeyboardError> {
        // Store what the keyboard would decode from the wire buffer
        self.macros = Macros::from_bytes(&macros.to_bytes()?)?;
        Ok(())
    }
}

/// Simulated lighting
#[derive(Debug, Clone)]
pub struct LightSimulation {
    colors: BacklightColors,
    effects: Effects,
    raw_colors: Vec<u8>,
    raw_params: Vec<u8>,
}

impl LightSimulation {
    pub fn new(state: &LightState) -> Result<Self, KeyboardError> {
        Ok(Self {
            colors: BacklightColors::parse(&state.colors)?,
            effects: Effects::from_response(&state.params)?,
            raw_colors: state.colors.clone(),
            raw_params: state.params.clone(),
        })
    }

    pub fn colors(&self) -> &BacklightColors {
        &self.colors
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }
}

impl LightFeature for LightSimulation {
    fn get_raw_effects(&mut self) -> Result<Vec<u8>, KeyboardError> {
        let mut raw = self.raw_params.clone();
        self.effects.write_into(&mut raw[params::OFFSET..])?;
        Ok(raw)
    }

    fn get_raw_colors(&mut self) -> Result<Vec<u8>, KeyboardError> {
        let mut raw = self.raw_colors.clone();
        self.colors.write_into(&mut raw)?;
        Ok(raw)
    }

    fn set_backlight_colors(&mut self, c: &BacklightColors) -> Result<(), KeyboardError> {
        self.colors = c.clone();
        debug!("Simulated write of {} color zones", colors::ROWS);
        Ok(())
    }

    fn set_effects(&mut self, effects: &Effects) -> Result<(), KeyboardError> {
        let raw = self.get_raw_effects()?;
        let request = effects.write_request(params_window(&raw)?)?;

        // Take the window back out of the request, as the keyboard would
        let start = cmd::SET_PARAMS.len();
        let window = &request[start..start + params::LEN];
        self.raw_params[params::OFFSET..].copy_from_slice(window);
        self.effects = Effects::parse(window)?;
        debug!("Simulated effects write: {:?}", self.effects);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::palette;
    use crate::effects::LightParams;
    use crate::layout::KeyMap;
    use crate::macros::{Macro, MacroAction};
    use crate::model::Model;

    fn light_state() -> LightState {
        let mut raw_colors = vec![0xffu8; colors::RESPONSE_LEN];
        BacklightColors::reset().write_into(&mut raw_colors).unwrap();
        LightState {
            colors: raw_colors,
            params: (0..params::RESPONSE_LEN).map(|i| i as u8).collect(),
        }
    }

    fn keys_state() -> KeysState {
        KeysState {
            mac: (0..keys::SLOTS as u32).collect(),
            win: (0..keys::SLOTS as u32).map(|i| i << 8).collect(),
        }
    }

    fn template() -> Arc<Template> {
        Arc::new(
            Template::new(
                Model::from("Test"),
                [("esc".to_string(), 0), ("a".to_string(), 4)],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_light_reads_back_snapshot() {
        let state = light_state();
        let mut sim = LightSimulation::new(&state).unwrap();
        assert_eq!(sim.get_raw_colors().unwrap(), state.colors);
        assert_eq!(sim.get_raw_effects().unwrap(), state.params);
        assert_eq!(
            sim.get_effects().unwrap(),
            Effects::from_response(&state.params).unwrap()
        );
    }

    #[test]
    fn test_set_effects_keeps_trailing_window() {
        let state = light_state();
        let mut sim = LightSimulation::new(&state).unwrap();
        let effects = Effects {
            halo: LightParams {
                mode: 9,
                color: palette::CYAN,
                brightness: 1,
                speed: 0,
            },
            ..Effects::default()
        };
        sim.set_effects(&effects).unwrap();

        let raw = sim.get_raw_effects().unwrap();
        assert_eq!(sim.get_effects().unwrap(), effects);
        let tail = params::OFFSET + params::EFFECTS_LEN;
        assert_eq!(raw[tail..], state.params[tail..]);
        assert_eq!(raw[..params::OFFSET], state.params[..params::OFFSET]);
    }

    #[test]
    fn test_reset_colors() {
        let mut custom = BacklightColors::reset();
        custom.row_mut(3).unwrap()[0] = palette::WHITE;
        let mut state = light_state();
        custom.write_into(&mut state.colors).unwrap();

        let mut sim = LightSimulation::new(&state).unwrap();
        assert_eq!(sim.get_backlight_colors().unwrap(), custom);
        sim.reset_colors().unwrap();
        assert_eq!(sim.get_backlight_colors().unwrap(), BacklightColors::reset());
    }

    #[test]
    fn test_rejects_short_snapshot() {
        let mut state = light_state();
        state.colors.pop();
        assert!(LightSimulation::new(&state).is_err());

        let mut keys = keys_state();
        keys.win.truncate(10);
        assert!(matches!(
            KeysSimulation::new(&keys, None),
            Err(KeyboardError::BufferLength { actual: 10, .. })
        ));
    }

    #[test]
    fn test_keys_patch() {
        let mut sim = KeysSimulation::new(&keys_state(), Some(template())).unwrap();
        let map = sim.get_win().unwrap();
        assert_eq!(map.get("a"), Some(4 << 8));

        let mut patch = KeyMap::new();
        patch.insert("esc", 0x2900);
        sim.set_win(&patch).unwrap();

        let codes = sim.get_win_codes().unwrap();
        assert_eq!(codes[0], 0x2900);
        assert_eq!(codes[1..], keys_state().win[1..]);
        assert_eq!(sim.get_mac_codes().unwrap(), keys_state().mac);
    }

    #[test]
    fn test_keys_without_template() {
        let mut sim = KeysSimulation::new(&keys_state(), None).unwrap();
        assert!(matches!(sim.get_mac(), Err(KeyboardError::MissingTemplate)));
        assert!(matches!(
            sim.set_mac(&KeyMap::new()),
            Err(KeyboardError::MissingTemplate)
        ));
        assert_eq!(sim.get_mac_codes().unwrap(), keys_state().mac);
    }

    #[test]
    fn test_macros_stored() {
        let mut sim = KeysSimulation::new(&keys_state(), None).unwrap();
        assert!(sim.get_macros().unwrap().is_empty());
        let macros = Macros(vec![Macro {
            repeat: 2,
            actions: vec![MacroAction::press(0x04, 5), MacroAction::release(0x04, 0)],
        }]);
        sim.set_macros(&macros).unwrap();
        assert_eq!(sim.get_macros().unwrap(), macros);
    }
}
