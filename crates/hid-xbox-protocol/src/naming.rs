//! User-facing device names and stable device identifiers.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::ControllerVariant;

/// Human-readable name for the device at enumeration `index`.
///
/// Numbering is one-based: index 0 is "#1".
pub fn device_name(variant: ControllerVariant, index: usize) -> String {
    format!("{} #{}", variant.family_name(), index + 1)
}

/// Bus type recorded in the first byte of a [`JoystickGuid`] (USB).
pub const GUID_BUS_USB: u8 = 0x03;

/// 16-byte joystick identifier derived from the device's USB IDs.
///
/// | Offset | Field              |
/// |--------|--------------------|
/// | 0      | bus type (0x03)    |
/// | 4–5    | vendor ID, u16 LE  |
/// | 8–9    | product ID, u16 LE |
///
/// All other bytes are zero, so two identical pads share a GUID. Use the
/// instance id to tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct JoystickGuid(pub [u8; 16]);

impl JoystickGuid {
    pub fn from_ids(vendor_id: u16, product_id: u16) -> Self {
        let mut data = [0u8; 16];
        data[0] = GUID_BUS_USB;
        data[4..6].copy_from_slice(&vendor_id.to_le_bytes());
        data[8..10].copy_from_slice(&product_id.to_le_bytes());
        Self(data)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn vendor_id(&self) -> u16 {
        u16::from_le_bytes([self.0[4], self.0[5]])
    }

    pub fn product_id(&self) -> u16 {
        u16::from_le_bytes([self.0[8], self.0[9]])
    }
}

impl fmt::Display for JoystickGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
