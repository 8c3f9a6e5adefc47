//! Common types for transport layer

/// Device identification information
#[derive(Debug, Clone, Default)]
pub struct TransportDeviceInfo {
    /// USB Vendor ID
    pub vid: u16,
    /// USB Product ID
    pub pid: u16,
    /// Device path as reported by hidapi
    pub device_path: String,
    /// Product name if available (the keyboard model, e.g. "Halo75")
    pub product_name: Option<String>,
    /// Serial number if available
    pub serial: Option<String>,
    /// USB release number (bcdDevice)
    pub release_number: u16,
}

impl TransportDeviceInfo {
    /// Firmware version string derived from the BCD release number
    pub fn firmware(&self) -> String {
        format!(
            "{}.{:x}",
            self.release_number >> 8,
            self.release_number & 0xff
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_firmware_from_release() {
        let info = TransportDeviceInfo {
            release_number: 0x0108,
            ..Default::default()
        };
        assert_eq!(info.firmware(), "1.8");
    }
}
