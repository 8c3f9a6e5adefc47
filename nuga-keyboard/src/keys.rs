//! Key remapping and macros

use std::sync::Arc;

use nuga_transport::protocol::{cmd, keys, macros};
use nuga_transport::Transport;
use tracing::{debug, info};

use crate::bytes::{read_codes, write_codes};
use crate::error::KeyboardError;
use crate::layout::{KeyMap, Template};
use crate::macros::Macros;

/// Which of the two key-code sets to address
///
/// The keyboard keeps separate key assignments for its Mac and Windows
/// modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySystem {
    Mac,
    Win,
}

impl KeySystem {
    pub const ALL: [KeySystem; 2] = [KeySystem::Mac, KeySystem::Win];

    pub fn get_command(self) -> &'static [u8] {
        match self {
            Self::Mac => cmd::GET_MAC_KEYS,
            Self::Win => cmd::GET_WIN_KEYS,
        }
    }

    pub fn set_command(self) -> &'static [u8] {
        match self {
            Self::Mac => cmd::SET_MAC_KEYS,
            Self::Win => cmd::SET_WIN_KEYS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Mac => "mac",
            Self::Win => "win",
        }
    }
}

/// Key assignment operations
///
/// Implemented by [`Keys`] for a live keyboard and by
/// [`crate::simulation::KeysSimulation`] for an in-memory one.
pub trait KeysFeature {
    /// Layout template used to name key slots, if the model has one
    fn template(&self) -> Option<&Template>;

    /// Read the raw 256-slot key-code array
    fn get_codes(&mut self, system: KeySystem) -> Result<Vec<u32>, KeyboardError>;

    /// Overwrite the raw key-code array; `codes` must hold exactly 256 entries
    fn set_codes(&mut self, system: KeySystem, codes: &[u32]) -> Result<(), KeyboardError>;

    fn get_macros(&mut self) -> Result<Macros, KeyboardError>;

    fn set_macros(&mut self, macros: &Macros) -> Result<(), KeyboardError>;

    /// Name the slots of a raw array with this device's template
    fn parse(&self, codes: &[u32]) -> Result<KeyMap, KeyboardError> {
        KeyMap::parse(codes, self.template())
    }

    fn get_keys(&mut self, system: KeySystem) -> Result<KeyMap, KeyboardError> {
        if self.template().is_none() {
            return Err(KeyboardError::MissingTemplate);
        }
        let codes = self.get_codes(system)?;
        self.parse(&codes)
    }

    /// Patch the named keys of `map` onto the current assignment
    ///
    /// Reads the current array first; nothing is written if that fails.
    fn set_keys(&mut self, system: KeySystem, map: &KeyMap) -> Result<(), KeyboardError> {
        if self.template().is_none() {
            return Err(KeyboardError::MissingTemplate);
        }
        let mut codes = self.get_codes(system)?;
        map.apply(&mut codes, self.template())?;
        self.set_codes(system, &codes)
    }

    fn get_mac(&mut self) -> Result<KeyMap, KeyboardError> {
        self.get_keys(KeySystem::Mac)
    }

    fn get_win(&mut self) -> Result<KeyMap, KeyboardError> {
        self.get_keys(KeySystem::Win)
    }

    fn set_mac(&mut self, map: &KeyMap) -> Result<(), KeyboardError> {
        self.set_keys(KeySystem::Mac, map)
    }

    fn set_win(&mut self, map: &KeyMap) -> Result<(), KeyboardError> {
        self.set_keys(KeySystem::Win, map)
    }

    fn get_mac_codes(&mut self) -> Result<Vec<u32>, KeyboardError> {
        self.get_codes(KeySystem::Mac)
    }

    fn get_win_codes(&mut self) -> Result<Vec<u32>, KeyboardError> {
        self.get_codes(KeySystem::Win)
    }

    fn set_mac_codes(&mut self, codes: &[u32]) -> Result<(), KeyboardError> {
        self.set_codes(KeySystem::Mac, codes)
    }

    fn set_win_codes(&mut self, codes: &[u32]) -> Result<(), KeyboardError> {
        self.set_codes(KeySystem::Win, codes)
    }
}

/// Key assignments of a live keyboard
pub struct Keys<T> {
    transport: T,
    template: Option<Arc<Template>>,
}

impl<T: Transport> Keys<T> {
    pub fn new(transport: T, template: Option<Arc<Template>>) -> Self {
        Self {
            transport,
            template,
        }
    }

    /// Give back the transport handle
    pub fn into_inner(self) -> T {
        self.transport
    }
}

impl<T: Transport> KeysFeature for Keys<T> {
    fn template(&self) -> Option<&Template> {
        self.template.as_deref()
    }

    fn get_codes(&mut self, system: KeySystem) -> Result<Vec<u32>, KeyboardError> {
        let resp = self
            .transport
            .request(system.get_command(), keys::RESPONSE_LEN)?;
        if resp.len() != keys::RESPONSE_LEN {
            return Err(KeyboardError::length(
                "keys response",
                keys::RESPONSE_LEN,
                resp.len(),
            ));
        }
        debug!("Read {} key codes", system.name());
        read_codes(&resp, keys::CODES_OFFSET, keys::SLOTS)
    }

    fn set_codes(&mut self, system: KeySystem, codes: &[u32]) -> Result<(), KeyboardError> {
        if codes.len() != keys::SLOTS {
            return Err(KeyboardError::length(
                "key code array",
                keys::SLOTS,
                codes.len(),
            ));
        }
        let command = system.set_command();
        let mut payload = Vec::with_capacity(command.len() + keys::SLOTS * keys::CODE_SIZE);
        payload.extend_from_slice(command);
        write_codes(codes, &mut payload);
        self.transport.send(&payload)?;
        info!("Wrote {} key codes", system.name());
        Ok(())
    }

    fn get_macros(&mut self) -> Result<Macros, KeyboardError> {
        let resp = self
            .transport
            .request(cmd::GET_MACROS, macros::BUFFER_LEN)?;
        Macros::from_bytes(&resp)
    }

    fn set_macros(&mut self, m: &Macros) -> Result<(), KeyboardError> {
        let buf = m.to_bytes()?;
        let mut payload = Vec::with_capacity(cmd::SET_MACROS.len() + buf.len());
        payload.extend_from_slice(cmd::SET_MACROS);
        payload.extend_from_slice(&buf[macros::HEADER_LEN..]);
        self.transport.send(&payload)?;
        info!("Wrote {} macros", m.len());
        Ok(())
    }
}
