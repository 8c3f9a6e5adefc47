//! Protocol constants for NuPhy Halo keyboard communication
//!
//! Every command prefix, buffer length and offset used by the codecs lives
//! here. Read and write paths must use the same constants.

/// Command prefixes (report ID first)
pub mod cmd {
    pub const GET_MAC_KEYS: &[u8] = &[0x05, 0x84, 0xb8, 0x00, 0x00, 0x00];
    pub const GET_WIN_KEYS: &[u8] = &[0x05, 0x84, 0xd4, 0x00, 0x00, 0x00];
    pub const SET_MAC_KEYS: &[u8] = &[0x06, 0x04, 0xb8, 0x00, 0x40, 0x00, 0x00, 0x00];
    pub const SET_WIN_KEYS: &[u8] = &[0x06, 0x04, 0xd4, 0x00, 0x40, 0x00, 0x00, 0x00];

    pub const GET_MACROS: &[u8] = &[0x05, 0x85, 0x00, 0x00, 0x00, 0x00];
    pub const SET_MACROS: &[u8] = &[0x06, 0x05, 0x00, 0x00, 0x00, 0x00, 0x00];

    pub const GET_COLORS: &[u8] = &[0x05, 0x88, 0xb8, 0x00, 0x00, 0x00];
    pub const SET_COLORS: &[u8] = &[0x06, 0x08, 0xb8, 0x00, 0x40, 0x00, 0x00];

    pub const GET_PARAMS: &[u8] = &[0x05, 0x83, 0xb6, 0x00, 0x00, 0x00];
    pub const SET_PARAMS: &[u8] = &[0x06, 0x03, 0xb6, 0x00, 0x00, 0x00, 0x00];

    /// Get human-readable name for a command prefix
    pub fn name(command: &[u8]) -> &'static str {
        match command {
            c if c.starts_with(&GET_MAC_KEYS[..3]) => "GET_MAC_KEYS",
            c if c.starts_with(&GET_WIN_KEYS[..3]) => "GET_WIN_KEYS",
            c if c.starts_with(&SET_MAC_KEYS[..3]) => "SET_MAC_KEYS",
            c if c.starts_with(&SET_WIN_KEYS[..3]) => "SET_WIN_KEYS",
            c if c.starts_with(&GET_MACROS[..2]) => "GET_MACROS",
            c if c.starts_with(&SET_MACROS[..2]) => "SET_MACROS",
            c if c.starts_with(&GET_COLORS[..3]) => "GET_COLORS",
            c if c.starts_with(&SET_COLORS[..3]) => "SET_COLORS",
            c if c.starts_with(&GET_PARAMS[..3]) => "GET_PARAMS",
            c if c.starts_with(&SET_PARAMS[..3]) => "SET_PARAMS",
            _ => "UNKNOWN",
        }
    }
}

/// Key-code arrays
pub mod keys {
    /// Number of key-code slots in one array
    pub const SLOTS: usize = 256;
    /// Bytes per packed key code
    pub const CODE_SIZE: usize = 4;
    /// Get keys response length
    pub const RESPONSE_LEN: usize = 1032;
    /// Offset of slot 0 in the get keys response
    pub const CODES_OFFSET: usize = 7;
}

/// Macro storage
pub mod macros {
    /// Macro buffer length (response and request)
    pub const BUFFER_LEN: usize = 1032;
    /// Header bytes preceding the macro body
    pub const HEADER_LEN: usize = 7;
}

/// Backlight colors
pub mod colors {
    /// Get colors response length
    pub const RESPONSE_LEN: usize = 1050;
    /// Offset of the color table in the get colors response
    pub const OFFSET: usize = 7;
    /// Number of backlight zones
    pub const ROWS: usize = 144;
    /// Simultaneous color layers per zone
    pub const ROW_LEN: usize = 7;
    /// Length of the encoded color table
    pub const LEN: usize = ROWS * ROW_LEN;
    /// Bytes after the color table in the get colors response
    pub const END_OFFSET: usize = RESPONSE_LEN - OFFSET - LEN;
}

/// Lighting effect parameters
pub mod params {
    /// Get params response length
    pub const RESPONSE_LEN: usize = 270;
    /// Offset of the params window in the get params response
    pub const OFFSET: usize = 15;
    /// Length of the params window (runs to the end of the response)
    pub const LEN: usize = RESPONSE_LEN - OFFSET;
    /// Structured effects record at the start of the params window
    pub const EFFECTS_LEN: usize = 12;
    /// Zero padding appended to a set params request
    pub const PADDING_LEN: usize = 770;
    /// Total set params request length
    pub const REQUEST_LEN: usize = super::cmd::SET_PARAMS.len() + LEN + PADDING_LEN;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_lengths() {
        assert_eq!(cmd::SET_MAC_KEYS.len() + keys::SLOTS * keys::CODE_SIZE, 1032);
        assert_eq!(cmd::SET_MACROS.len() + macros::BUFFER_LEN - macros::HEADER_LEN, 1032);
        assert_eq!(params::RESPONSE_LEN, 270);
        assert_eq!(params::REQUEST_LEN, 1032);
    }

    #[test]
    fn test_color_window_fits() {
        assert!(colors::OFFSET + colors::LEN <= colors::RESPONSE_LEN);
        assert_eq!(colors::END_OFFSET, 35);
    }

    #[test]
    fn test_command_names() {
        assert_eq!(cmd::name(cmd::GET_WIN_KEYS), "GET_WIN_KEYS");
        assert_eq!(cmd::name(cmd::SET_PARAMS), "SET_PARAMS");
        assert_eq!(cmd::name(&[0x01, 0x02]), "UNKNOWN");
    }
}
