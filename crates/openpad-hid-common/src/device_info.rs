//! Device information types for HID devices

use serde::{Deserialize, Serialize};

/// Transport-assigned unique id. Stable for as long as the device stays
/// attached, unlike an enumeration index.
pub type DeviceUid = u32;

/// Device class as reported by the host stack after enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    XboxOriginal,
    Xbox360Wired,
    Xbox360Wireless,
    XboxOne,
    Keyboard,
    Mouse,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HidDeviceInfo {
    pub uid: DeviceUid,
    pub vendor_id: u16,
    pub product_id: u16,
    pub device_type: DeviceType,
    pub product_name: Option<String>,
}

impl HidDeviceInfo {
    pub fn new(uid: DeviceUid, vendor_id: u16, product_id: u16, device_type: DeviceType) -> Self {
        Self {
            uid,
            vendor_id,
            product_id,
            device_type,
            product_name: None,
        }
    }

    pub fn with_product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    pub fn matches(&self, vendor_id: u16, product_id: u16) -> bool {
        self.vendor_id == vendor_id && self.product_id == product_id
    }

    pub fn display_name(&self) -> String {
        self.product_name
            .clone()
            .unwrap_or_else(|| format!("{:04x}:{:04x}", self.vendor_id, self.product_id))
    }
}
