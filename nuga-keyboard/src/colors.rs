//! Backlight color table
//!
//! Each backlight zone stores 7 color indices, one per color layer. The
//! table sits at a fixed offset of the get colors response and is sent back
//! verbatim after the set colors command prefix.

use nuga_transport::protocol::colors::{LEN, OFFSET, RESPONSE_LEN, ROWS, ROW_LEN};

use crate::error::KeyboardError;

/// Color palette indices
pub mod palette {
    pub const RED: u8 = 0x00;
    pub const GREEN: u8 = 0x01;
    pub const BLUE: u8 = 0x02;
    pub const YELLOW: u8 = 0x03;
    pub const PURPLE: u8 = 0x04;
    pub const CYAN: u8 = 0x05;
    pub const WHITE: u8 = 0x06;
}

/// Color indices of one backlight zone
pub type ColorRow = [u8; ROW_LEN];

/// Factory color layer order
pub const DEFAULT_ROW: ColorRow = [
    palette::RED,
    palette::GREEN,
    palette::BLUE,
    palette::YELLOW,
    palette::PURPLE,
    palette::CYAN,
    palette::WHITE,
];

/// Per-zone backlight colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacklightColors {
    rows: Vec<ColorRow>,
}

impl BacklightColors {
    /// Factory colors: every zone gets [`DEFAULT_ROW`]
    pub fn reset() -> Self {
        Self {
            rows: vec![DEFAULT_ROW; ROWS],
        }
    }

    /// Parse the color table out of a full get colors response
    pub fn parse(raw: &[u8]) -> Result<Self, KeyboardError> {
        if raw.len() != RESPONSE_LEN {
            return Err(KeyboardError::length("colors response", RESPONSE_LEN, raw.len()));
        }
        Self::from_window(&raw[OFFSET..OFFSET + LEN])
    }

    /// Parse a bare color table
    pub fn from_window(window: &[u8]) -> Result<Self, KeyboardError> {
        if window.len() != LEN {
            return Err(KeyboardError::length("color table", LEN, window.len()));
        }
        let rows = window
            .chunks_exact(ROW_LEN)
            .map(|c| {
                let mut row = [0u8; ROW_LEN];
                row.copy_from_slice(c);
                row
            })
            .collect();
        Ok(Self { rows })
    }

    /// Encode the color table (exactly `colors::LEN` bytes)
    pub fn to_bytes(&self) -> Vec<u8> {
        self.rows.iter().flatten().copied().collect()
    }

    /// Overwrite the color table inside a get colors response
    pub fn write_into(&self, raw: &mut [u8]) -> Result<(), KeyboardError> {
        if raw.len() != RESPONSE_LEN {
            return Err(KeyboardError::length("colors response", RESPONSE_LEN, raw.len()));
        }
        raw[OFFSET..OFFSET + LEN].copy_from_slice(&self.to_bytes());
        Ok(())
    }

    pub fn rows(&self) -> &[ColorRow] {
        &self.rows
    }

    pub fn row(&self, zone: usize) -> Option<&ColorRow> {
        self.rows.get(zone)
    }

    pub fn row_mut(&mut self, zone: usize) -> Option<&mut ColorRow> {
        self.rows.get_mut(zone)
    }
}
