//! Keyboard devices
//!
//! A [`Device`] bundles the identity of one keyboard with its feature
//! interfaces. The interfaces are trait objects, so a hardware keyboard and
//! a simulated one look the same to callers.

use std::ffi::CStr;

use hidapi::HidApi;
use nuga_keyboard::{Keys, KeysFeature, Light, LightFeature, Model, TemplateSource};
use nuga_transport::{
    BoxedTransport, HidTransport, PrinterConfig, PrinterTransport, TransportDeviceInfo,
    TransportError,
};
use tracing::{info, warn};

/// Vendor prefix in the USB product string
const PRODUCT_PREFIX: &str = "NuPhy ";

/// Feature interfaces of one keyboard
pub struct Features {
    pub light: Box<dyn LightFeature>,
    pub keys: Box<dyn KeysFeature>,
}

/// An opened keyboard
pub struct Device {
    pub name: Model,
    pub path: String,
    pub firmware: String,
    pub features: Features,
}

impl Device {
    /// Open the keyboard at a hidapi path
    ///
    /// Each feature interface gets its own handle to the device. When
    /// `monitor` is set, both handles print their traffic.
    pub fn open(
        api: &HidApi,
        path: &CStr,
        templates: &dyn TemplateSource,
        monitor: Option<PrinterConfig>,
    ) -> Result<Self, TransportError> {
        let light = HidTransport::open_path(api, path)?;
        let keys = HidTransport::open_path(api, path)?;

        let info = light.device_info().clone();
        let name = model_from_info(&info);
        let template = templates.template(&name);
        if template.is_none() {
            warn!("No layout template for {name}, named key maps unavailable");
        }
        info!(
            "Opened {} (firmware {}) at {}",
            name,
            info.firmware(),
            info.device_path
        );

        Ok(Self {
            name,
            path: info.device_path.clone(),
            firmware: info.firmware(),
            features: Features {
                light: Box::new(Light::new(monitored(light, monitor.clone()))),
                keys: Box::new(Keys::new(monitored(keys, monitor), template)),
            },
        })
    }
}

fn monitored(transport: HidTransport, monitor: Option<PrinterConfig>) -> BoxedTransport {
    match monitor {
        Some(config) => Box::new(PrinterTransport::wrap(transport, config)),
        None => Box::new(transport),
    }
}

/// Keyboard model from the USB product string
fn model_from_info(info: &TransportDeviceInfo) -> Model {
    let product = info.product_name.as_deref().unwrap_or_default().trim();
    Model::new(product.strip_prefix(PRODUCT_PREFIX).unwrap_or(product))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(product: Option<&str>) -> TransportDeviceInfo {
        TransportDeviceInfo {
            product_name: product.map(str::to_owned),
            ..Default::default()
        }
    }

    #[test]
    fn test_model_from_product_string() {
        assert_eq!(model_from_info(&info(Some("NuPhy Halo75"))), "Halo75");
        assert_eq!(model_from_info(&info(Some("Halo65 "))), "Halo65");
        assert_eq!(model_from_info(&info(None)), "");
    }
}
