//! PrinterTransport middleware for monitoring transport operations
//!
//! Wraps any [`Transport`] and prints every request, response and send that
//! passes through it.
//!
//! # Example
//!
//! ```ignore
//! use nuga_transport::{HidTransport, PrinterConfig, PrinterTransport};
//!
//! let transport = HidTransport::open_path(&api, &path)?;
//! let mut monitored = PrinterTransport::wrap(transport, PrinterConfig::default());
//! // Now all commands/responses will be printed
//! ```

use std::str::FromStr;

use crossterm::style::Stylize;
use tracing::trace;

use crate::protocol::cmd;
use crate::{Transport, TransportError};

/// Packet filter for selective display
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PacketFilter {
    #[default]
    All,
    /// Only requests and their responses
    Requests,
    /// Only sends
    Sends,
    /// Only packets whose command byte (after the report ID) matches
    Cmd(u8),
}

impl FromStr for PacketFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "requests" | "request" | "get" => Ok(Self::Requests),
            "sends" | "send" | "set" => Ok(Self::Sends),
            s if s.starts_with("cmd=") || s.starts_with("0x") => {
                let hex_str = s.strip_prefix("cmd=").unwrap_or(s);
                let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
                u8::from_str_radix(hex_str, 16)
                    .map(Self::Cmd)
                    .map_err(|e| format!("Invalid command byte: {}", e))
            }
            _ => Err(format!("Unknown filter: {}", s)),
        }
    }
}

/// Configuration for the PrinterTransport
#[derive(Debug, Clone, Default)]
pub struct PrinterConfig {
    /// Show the full hex dump instead of the first bytes only
    pub show_hex: bool,
    /// Filter for selective display
    pub filter: PacketFilter,
}

impl PrinterConfig {
    /// Create config with hex output setting
    pub fn with_hex(mut self, show: bool) -> Self {
        self.show_hex = show;
        self
    }

    /// Create config with filter
    pub fn with_filter(mut self, filter: PacketFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Number of bytes shown when the full hex dump is off
const PREVIEW_LEN: usize = 16;

/// Transport middleware that prints all commands and responses
pub struct PrinterTransport<T> {
    inner: T,
    config: PrinterConfig,
}

impl<T: Transport> PrinterTransport<T> {
    /// Wrap a transport with printing middleware
    pub fn wrap(inner: T, config: PrinterConfig) -> Self {
        Self { inner, config }
    }

    /// Unwrap the monitored transport
    pub fn into_inner(self) -> T {
        self.inner
    }

    fn should_show(&self, packet: &[u8], is_request: bool) -> bool {
        match &self.config.filter {
            PacketFilter::All => true,
            PacketFilter::Requests => is_request,
            PacketFilter::Sends => !is_request,
            PacketFilter::Cmd(c) => packet.get(1) == Some(c),
        }
    }

    fn hex<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        if self.config.show_hex {
            data
        } else {
            &data[..data.len().min(PREVIEW_LEN)]
        }
    }

    fn print_command(&self, arrow: &str, tag: &str, packet: &[u8]) {
        eprintln!(
            "{} {}  {} ({} bytes) {:02x?}",
            arrow.cyan(),
            tag.cyan().bold(),
            cmd::name(packet).yellow(),
            packet.len(),
            self.hex(packet)
        );
    }
}

impl<T: Transport> Transport for PrinterTransport<T> {
    fn request(&mut self, command: &[u8], response_len: usize) -> Result<Vec<u8>, TransportError> {
        let show = self.should_show(command, true);
        if show {
            self.print_command(">>>", "GET", command);
        }
        let result = self.inner.request(command, response_len);
        if show {
            match &result {
                Ok(data) => eprintln!(
                    "{} {}  ({} bytes) {:02x?}",
                    "<<<".green(),
                    "RSP".green().bold(),
                    data.len(),
                    self.hex(data)
                ),
                Err(e) => eprintln!("{} {}  {}", "<<<".red(), "ERR".red().bold(), e),
            }
        }
        trace!("request {:02x?} -> {:?}", command, result.as_ref().map(Vec::len));
        result
    }

    fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        if self.should_show(payload, false) {
            self.print_command(">>>", "SET", payload);
        }
        self.inner.send(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl Transport for Echo {
        fn request(
            &mut self,
            command: &[u8],
            response_len: usize,
        ) -> Result<Vec<u8>, TransportError> {
            let mut out = command.to_vec();
            out.resize(response_len, 0);
            Ok(out)
        }

        fn send(&mut self, _payload: &[u8]) -> Result<(), TransportError> {
            Err(TransportError::Disconnected)
        }
    }

    #[test]
    fn test_packet_filter_parse() {
        assert_eq!(PacketFilter::from_str("all").unwrap(), PacketFilter::All);
        assert_eq!(
            PacketFilter::from_str("requests").unwrap(),
            PacketFilter::Requests
        );
        assert_eq!(PacketFilter::from_str("set").unwrap(), PacketFilter::Sends);
        assert_eq!(
            PacketFilter::from_str("cmd=0x84").unwrap(),
            PacketFilter::Cmd(0x84)
        );
        assert_eq!(
            PacketFilter::from_str("0x08").unwrap(),
            PacketFilter::Cmd(0x08)
        );
        assert!(PacketFilter::from_str("bogus").is_err());
    }

    #[test]
    fn test_wrapper_is_transparent() {
        let mut t = PrinterTransport::wrap(Echo, PrinterConfig::default());
        let resp = t.request(cmd::GET_PARAMS, 270).unwrap();
        assert_eq!(resp.len(), 270);
        assert_eq!(&resp[..6], cmd::GET_PARAMS);
        assert!(matches!(
            t.send(cmd::SET_PARAMS),
            Err(TransportError::Disconnected)
        ));
    }
}
