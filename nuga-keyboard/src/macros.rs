//! Macro storage codec
//!
//! All macros live in one 1032-byte buffer. After the 7-byte header the body
//! is laid out as:
//!
//! ```text
//! [count]                                   number of macros
//! [repeat][n] [flags key delay_hi delay_lo] × n   per macro
//! ```
//!
//! Bit 7 of `flags` is the key direction (set = press). The rest of the body
//! is zero. Decoding checks every macro boundary against the buffer end.

use nuga_transport::protocol::macros::{BUFFER_LEN, HEADER_LEN};
use serde::{Deserialize, Serialize};

use crate::error::KeyboardError;

/// Bytes available for macro data
pub const BODY_LEN: usize = BUFFER_LEN - HEADER_LEN;

/// Bytes per encoded action
const ACTION_LEN: usize = 4;

/// Direction bit in the action flags byte
const PRESS_BIT: u8 = 0x80;

/// Key direction of a macro action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Press,
    Release,
}

/// A single macro step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroAction {
    pub kind: ActionKind,
    /// HID usage code
    pub key: u8,
    /// Delay after this step in milliseconds
    pub delay: u16,
}

impl MacroAction {
    pub fn press(key: u8, delay: u16) -> Self {
        Self {
            kind: ActionKind::Press,
            key,
            delay,
        }
    }

    pub fn release(key: u8, delay: u16) -> Self {
        Self {
            kind: ActionKind::Release,
            key,
            delay,
        }
    }

    fn to_bytes(self) -> [u8; ACTION_LEN] {
        let flags = match self.kind {
            ActionKind::Press => PRESS_BIT,
            ActionKind::Release => 0,
        };
        let [hi, lo] = self.delay.to_be_bytes();
        [flags, self.key, hi, lo]
    }

    fn from_bytes(b: &[u8]) -> Self {
        let kind = if b[0] & PRESS_BIT != 0 {
            ActionKind::Press
        } else {
            ActionKind::Release
        };
        Self {
            kind,
            key: b[1],
            delay: u16::from_be_bytes([b[2], b[3]]),
        }
    }
}

/// A recorded key sequence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Macro {
    /// How many times the sequence plays
    pub repeat: u8,
    pub actions: Vec<MacroAction>,
}

impl Macro {
    fn encoded_len(&self) -> usize {
        2 + self.actions.len() * ACTION_LEN
    }
}

/// All macros stored on the keyboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Macros(pub Vec<Macro>);

impl Macros {
    /// Decode a full macro buffer
    pub fn from_bytes(buf: &[u8]) -> Result<Self, KeyboardError> {
        if buf.len() != BUFFER_LEN {
            return Err(KeyboardError::length("macro buffer", BUFFER_LEN, buf.len()));
        }
        let body = &buf[HEADER_LEN..];
        let count = body[0] as usize;
        let mut pos = 1;
        let mut macros = Vec::with_capacity(count);

        for _ in 0..count {
            let head = body
                .get(pos..pos + 2)
                .ok_or_else(|| KeyboardError::length("macro header", pos + 2, body.len()))?;
            let (repeat, n) = (head[0], head[1] as usize);
            pos += 2;

            let end = pos + n * ACTION_LEN;
            let data = body
                .get(pos..end)
                .ok_or_else(|| KeyboardError::length("macro actions", end, body.len()))?;
            let actions = data
                .chunks_exact(ACTION_LEN)
                .map(MacroAction::from_bytes)
                .collect();
            macros.push(Macro { repeat, actions });
            pos = end;
        }

        Ok(Self(macros))
    }

    /// Encode into a full macro buffer (header zeroed)
    pub fn to_bytes(&self) -> Result<Vec<u8>, KeyboardError> {
        let needed = self.encoded_len();
        if needed > BODY_LEN || self.0.len() > u8::MAX as usize {
            return Err(KeyboardError::length("macro body", BODY_LEN, needed));
        }

        let mut buf = Vec::with_capacity(BUFFER_LEN);
        buf.resize(HEADER_LEN, 0);
        buf.push(self.0.len() as u8);
        for m in &self.0 {
            if m.actions.len() > u8::MAX as usize {
                return Err(KeyboardError::length(
                    "macro actions",
                    u8::MAX as usize * ACTION_LEN,
                    m.actions.len() * ACTION_LEN,
                ));
            }
            buf.push(m.repeat);
            buf.push(m.actions.len() as u8);
            for action in &m.actions {
                buf.extend_from_slice(&action.to_bytes());
            }
        }
        buf.resize(BUFFER_LEN, 0);
        Ok(buf)
    }

    /// Body bytes this collection needs
    pub fn encoded_len(&self) -> usize {
        1 + self.0.iter().map(Macro::encoded_len).sum::<usize>()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Macros {
        Macros(vec![
            Macro {
                repeat: 1,
                actions: vec![
                    MacroAction::press(0xe0, 0),
                    MacroAction::press(0x06, 10),
                    MacroAction::release(0x06, 0),
                    MacroAction::release(0xe0, 300),
                ],
            },
            Macro::default(),
            Macro {
                repeat: 3,
                actions: vec![MacroAction::press(0x04, 65535)],
            },
        ])
    }

    #[test]
    fn test_encode_layout() {
        let buf = sample().to_bytes().unwrap();
        assert_eq!(buf.len(), BUFFER_LEN);
        let body = &buf[HEADER_LEN..];
        assert_eq!(body[0], 3);
        assert_eq!(&body[1..3], &[1, 4]);
        assert_eq!(&body[3..7], &[0x80, 0xe0, 0, 0]);
        assert_eq!(&body[15..19], &[0x00, 0xe0, 0x01, 0x2c]);
        assert_eq!(&body[19..21], &[0, 0]);
        assert_eq!(&body[21..27], &[3, 1, 0x80, 0x04, 0xff, 0xff]);
        assert!(body[27..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_decode_encoded() {
        let macros = sample();
        assert_eq!(Macros::from_bytes(&macros.to_bytes().unwrap()).unwrap(), macros);
    }

    #[test]
    fn test_empty_buffer_decodes_empty() {
        let macros = Macros::from_bytes(&[0u8; BUFFER_LEN]).unwrap();
        assert!(macros.is_empty());
    }

    #[test]
    fn test_decode_ignores_header() {
        let mut buf = sample().to_bytes().unwrap();
        buf[..HEADER_LEN].copy_from_slice(&[0x05, 0x85, 0, 0, 0, 0, 0x99]);
        assert_eq!(Macros::from_bytes(&buf).unwrap(), sample());
    }

    #[test]
    fn test_decode_wrong_length() {
        for len in [0, 7, BUFFER_LEN - 1, BUFFER_LEN + 1] {
            assert!(matches!(
                Macros::from_bytes(&vec![0u8; len]),
                Err(KeyboardError::BufferLength { .. })
            ));
        }
    }

    #[test]
    fn test_decode_truncated_macro() {
        // Second macro claims 255 actions but only a few bytes remain
        let mut buf = vec![0u8; BUFFER_LEN];
        buf[HEADER_LEN] = 2;
        buf[HEADER_LEN + 1] = 1;
        buf[HEADER_LEN + 2] = 250;
        let second = HEADER_LEN + 3 + 250 * 4;
        buf[second] = 1;
        buf[second + 1] = 255;
        assert!(matches!(
            Macros::from_bytes(&buf),
            Err(KeyboardError::BufferLength { .. })
        ));
    }

    #[test]
    fn test_decode_garbage_stays_in_bounds() {
        let buf = vec![0xffu8; BUFFER_LEN];
        assert!(Macros::from_bytes(&buf).is_err());
    }

    #[test]
    fn test_encode_overflow() {
        let big = Macro {
            repeat: 1,
            actions: vec![MacroAction::press(0x04, 1); 255],
        };
        // 1 + 2 * (2 + 1020) > 1025
        let macros = Macros(vec![big.clone(), big]);
        assert!(matches!(
            macros.to_bytes(),
            Err(KeyboardError::BufferLength { .. })
        ));
    }

    #[test]
    fn test_encode_too_many_actions() {
        let macros = Macros(vec![Macro {
            repeat: 1,
            actions: vec![MacroAction::release(0x04, 0); 256],
        }]);
        assert!(macros.to_bytes().is_err());
    }
}
