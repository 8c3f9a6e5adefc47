//! Transport abstraction layer for NuPhy Halo keyboard communication
//!
//! The keyboard speaks a simple request/response protocol over HID feature
//! reports: a command prefix goes out, a fixed-length buffer comes back.
//! Writes are a single feature report carrying the command prefix and the
//! payload. This crate provides:
//!
//! - the [`Transport`] trait every backend implements
//! - the wire constants shared by all codecs ([`protocol`])
//! - a hidapi-backed transport for a keyboard opened by path
//! - a monitoring wrapper that prints all traffic

pub mod error;
pub mod printer;
pub mod protocol;
pub mod types;

mod hid;

pub use error::TransportError;
pub use hid::HidTransport;
pub use printer::{PacketFilter, PrinterConfig, PrinterTransport};
pub use types::TransportDeviceInfo;

/// The core transport trait - all backends implement this
///
/// Calls are blocking and take `&mut self`: a handle has exactly one user at
/// a time. Implementations must not retry; the first failure is returned.
pub trait Transport {
    /// Send a command and read back a response of exactly `response_len` bytes
    ///
    /// # Arguments
    /// * `command` - Command prefix (e.g., `protocol::cmd::GET_MAC_KEYS`)
    /// * `response_len` - Expected response length, including the header
    fn request(&mut self, command: &[u8], response_len: usize) -> Result<Vec<u8>, TransportError>;

    /// Send a command prefix followed by its payload, no response expected
    fn send(&mut self, payload: &[u8]) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn request(&mut self, command: &[u8], response_len: usize) -> Result<Vec<u8>, TransportError> {
        (**self).request(command, response_len)
    }

    fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        (**self).send(payload)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn request(&mut self, command: &[u8], response_len: usize) -> Result<Vec<u8>, TransportError> {
        (**self).request(command, response_len)
    }

    fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        (**self).send(payload)
    }
}

/// Type alias for a boxed transport
pub type BoxedTransport = Box<dyn Transport>;
