//! Backlight colors and lighting effects

use nuga_transport::protocol::{cmd, colors, params};
use nuga_transport::Transport;
use tracing::{debug, info};

use crate::colors::BacklightColors;
use crate::effects::{params_window, Effects};
use crate::error::KeyboardError;

/// Lighting operations
///
/// Implemented by [`Light`] for a live keyboard and by
/// [`crate::simulation::LightSimulation`] for an in-memory one.
pub trait LightFeature {
    /// Full get params response
    fn get_raw_effects(&mut self) -> Result<Vec<u8>, KeyboardError>;

    /// Full get colors response
    fn get_raw_colors(&mut self) -> Result<Vec<u8>, KeyboardError>;

    fn set_backlight_colors(&mut self, colors: &BacklightColors) -> Result<(), KeyboardError>;

    /// Write new effects, keeping the opaque part of the params window
    ///
    /// Reads the current params first; nothing is written if that fails.
    fn set_effects(&mut self, effects: &Effects) -> Result<(), KeyboardError>;

    /// The params window of the current get params response
    fn get_effects_window(&mut self) -> Result<Vec<u8>, KeyboardError> {
        let raw = self.get_raw_effects()?;
        Ok(params_window(&raw)?.to_vec())
    }

    fn get_effects(&mut self) -> Result<Effects, KeyboardError> {
        let raw = self.get_raw_effects()?;
        Effects::from_response(&raw)
    }

    fn get_backlight_colors(&mut self) -> Result<BacklightColors, KeyboardError> {
        let raw = self.get_raw_colors()?;
        BacklightColors::parse(&raw)
    }

    /// Restore factory colors on every zone
    fn reset_colors(&mut self) -> Result<(), KeyboardError> {
        self.set_backlight_colors(&BacklightColors::reset())
    }
}

/// Lighting of a live keyboard
pub struct Light<T> {
    transport: T,
}

impl<T: Transport> Light<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Give back the transport handle
    pub fn into_inner(self) -> T {
        self.transport
    }

    fn request_exact(&mut self, command: &[u8], len: usize) -> Result<Vec<u8>, KeyboardError> {
        let resp = self.transport.request(command, len)?;
        if resp.len() != len {
            return Err(KeyboardError::length(cmd::name(command), len, resp.len()));
        }
        Ok(resp)
    }
}

impl<T: Transport> LightFeature for Light<T> {
    fn get_raw_effects(&mut self) -> Result<Vec<u8>, KeyboardError> {
        self.request_exact(cmd::GET_PARAMS, params::RESPONSE_LEN)
    }

    fn get_raw_colors(&mut self) -> Result<Vec<u8>, KeyboardError> {
        self.request_exact(cmd::GET_COLORS, colors::RESPONSE_LEN)
    }

    fn set_backlight_colors(&mut self, c: &BacklightColors) -> Result<(), KeyboardError> {
        let table = c.to_bytes();
        let mut payload = Vec::with_capacity(cmd::SET_COLORS.len() + table.len());
        payload.extend_from_slice(cmd::SET_COLORS);
        payload.extend_from_slice(&table);
        self.transport.send(&payload)?;
        info!("Wrote backlight colors for {} zones", c.rows().len());
        Ok(())
    }

    fn set_effects(&mut self, effects: &Effects) -> Result<(), KeyboardError> {
        let raw = self.get_raw_effects()?;
        let request = effects.write_request(params_window(&raw)?)?;
        debug!("Effects: {:?}", effects);
        self.transport.send(&request)?;
        info!("Wrote lighting effects");
        Ok(())
    }
}
