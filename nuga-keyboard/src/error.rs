//! Keyboard interface error types

use nuga_transport::TransportError;
use thiserror::Error;

/// Errors from keyboard operations
#[derive(Error, Debug)]
pub enum KeyboardError {
    /// Transport layer error, passed through untouched
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// No layout template is known for the device model
    #[error("No layout template available for this device")]
    MissingTemplate,

    /// A buffer does not have the fixed length its codec requires
    #[error("Invalid {what} length: expected {expected} bytes, got {actual}")]
    BufferLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl KeyboardError {
    pub(crate) fn length(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::BufferLength {
            what,
            expected,
            actual,
        }
    }
}
