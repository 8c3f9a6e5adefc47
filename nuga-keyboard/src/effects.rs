//! Lighting effect parameters
//!
//! The get params response carries a 255-byte window at offset 15. Only its
//! first 12 bytes are understood: mode, color, brightness and speed for each
//! of the three light domains. Everything after that is opaque and must be
//! sent back exactly as read.

use nuga_transport::protocol::{cmd, params};
use serde::{Deserialize, Serialize};

use crate::error::KeyboardError;

/// Bytes per light domain in the effects record
const DOMAIN_LEN: usize = 4;

/// Settings of one light domain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightParams {
    pub mode: u8,
    /// Palette index, see [`crate::colors::palette`]
    pub color: u8,
    pub brightness: u8,
    pub speed: u8,
}

impl LightParams {
    fn from_bytes(b: &[u8]) -> Self {
        Self {
            mode: b[0],
            color: b[1],
            brightness: b[2],
            speed: b[3],
        }
    }

    fn to_bytes(self) -> [u8; DOMAIN_LEN] {
        [self.mode, self.color, self.brightness, self.speed]
    }
}

/// Effect settings of all light domains
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effects {
    pub backlight: LightParams,
    pub sidelight: LightParams,
    pub halo: LightParams,
}

impl Effects {
    /// Parse the structured record at the start of a params window
    pub fn parse(window: &[u8]) -> Result<Self, KeyboardError> {
        if window.len() != params::LEN {
            return Err(KeyboardError::length("params window", params::LEN, window.len()));
        }
        Ok(Self {
            backlight: LightParams::from_bytes(&window[..DOMAIN_LEN]),
            sidelight: LightParams::from_bytes(&window[DOMAIN_LEN..2 * DOMAIN_LEN]),
            halo: LightParams::from_bytes(&window[2 * DOMAIN_LEN..params::EFFECTS_LEN]),
        })
    }

    /// Parse a full get params response
    pub fn from_response(raw: &[u8]) -> Result<Self, KeyboardError> {
        Self::parse(params_window(raw)?)
    }

    /// Encode the structured record only
    pub fn to_bytes(&self) -> [u8; params::EFFECTS_LEN] {
        let mut out = [0u8; params::EFFECTS_LEN];
        for (dst, domain) in out
            .chunks_exact_mut(DOMAIN_LEN)
            .zip([self.backlight, self.sidelight, self.halo])
        {
            dst.copy_from_slice(&domain.to_bytes());
        }
        out
    }

    /// Build a set params request on top of the window just read
    ///
    /// Layout: command prefix, encoded record, the trailing bytes of
    /// `current` unchanged, then [`params::PADDING_LEN`] zero bytes.
    pub fn write_request(&self, current: &[u8]) -> Result<Vec<u8>, KeyboardError> {
        if current.len() != params::LEN {
            return Err(KeyboardError::length("params window", params::LEN, current.len()));
        }
        let mut out = Vec::with_capacity(params::REQUEST_LEN);
        out.extend_from_slice(cmd::SET_PARAMS);
        out.extend_from_slice(&self.to_bytes());
        out.extend_from_slice(&current[params::EFFECTS_LEN..]);
        out.resize(params::REQUEST_LEN, 0);
        Ok(out)
    }

    /// Overwrite the structured record inside a params window
    pub fn write_into(&self, window: &mut [u8]) -> Result<(), KeyboardError> {
        if window.len() != params::LEN {
            return Err(KeyboardError::length("params window", params::LEN, window.len()));
        }
        window[..params::EFFECTS_LEN].copy_from_slice(&self.to_bytes());
        Ok(())
    }
}

/// Slice the params window out of a full get params response
pub fn params_window(raw: &[u8]) -> Result<&[u8], KeyboardError> {
    if raw.len() != params::RESPONSE_LEN {
        return Err(KeyboardError::length("params response", params::RESPONSE_LEN, raw.len()));
    }
    Ok(&raw[params::OFFSET..])
}
