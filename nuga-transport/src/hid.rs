//! HID transport implementation for direct USB connection

use std::ffi::CStr;

use hidapi::{HidApi, HidDevice};
use tracing::debug;

use crate::error::TransportError;
use crate::types::TransportDeviceInfo;
use crate::Transport;

/// HID transport for a wired keyboard
///
/// Commands are HID feature reports. A request sends the command prefix as
/// a feature report, then reads a feature report of the expected length
/// back with the same report ID.
pub struct HidTransport {
    device: HidDevice,
    info: TransportDeviceInfo,
}

impl HidTransport {
    /// Open the keyboard at a known hidapi path
    pub fn open_path(api: &HidApi, path: &CStr) -> Result<Self, TransportError> {
        let device = api.open_path(path)?;
        let hid_info = device.get_device_info()?;
        let info = TransportDeviceInfo {
            vid: hid_info.vendor_id(),
            pid: hid_info.product_id(),
            device_path: path.to_string_lossy().into_owned(),
            product_name: hid_info.product_string().map(str::to_owned),
            serial: hid_info.serial_number().map(str::to_owned),
            release_number: hid_info.release_number(),
        };
        debug!(
            "Opened {:04x}:{:04x} at {} ({:?})",
            info.vid, info.pid, info.device_path, info.product_name
        );
        Ok(Self { device, info })
    }

    /// Device information captured when the transport was opened
    pub fn device_info(&self) -> &TransportDeviceInfo {
        &self.info
    }
}

impl Transport for HidTransport {
    fn request(&mut self, command: &[u8], response_len: usize) -> Result<Vec<u8>, TransportError> {
        let report_id = *command.first().ok_or(TransportError::EmptyCommand)?;
        debug!(
            "Request {:02X?} expecting {} bytes",
            &command[..command.len().min(8)],
            response_len
        );
        self.device.send_feature_report(command)?;

        let mut buf = vec![0u8; response_len.max(1)];
        buf[0] = report_id;
        let read = self.device.get_feature_report(&mut buf)?;
        if read < response_len {
            return Err(TransportError::ShortResponse {
                expected: response_len,
                actual: read,
            });
        }
        buf.truncate(response_len);
        Ok(buf)
    }

    fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        if payload.is_empty() {
            return Err(TransportError::EmptyCommand);
        }
        debug!(
            "Send {:02X?} ({} bytes)",
            &payload[..payload.len().min(8)],
            payload.len()
        );
        self.device.send_feature_report(payload)?;
        Ok(())
    }
}
