//! Error types for state dumps

use nuga_keyboard::KeyboardError;
use nuga_transport::TransportError;
use thiserror::Error;

/// Errors while collecting, storing or restoring device state
#[derive(Error, Debug)]
pub enum DumpError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid state document: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Keyboard(#[from] KeyboardError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
