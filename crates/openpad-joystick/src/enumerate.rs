//! Index-based view over the transport's device list.
//!
//! An index is a position among the supported pads the transport knows
//! right now. It is recomputed on every call and only valid within one
//! enumeration pass; use [`EnumeratedDevice::instance_id`] to refer to a
//! device across calls.

use openpad_hid_common::{DeviceUid, HidDeviceInfo};
use openpad_hid_xbox_protocol::{ControllerVariant, JoystickGuid, device_name};

/// A supported pad at a given enumeration index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumeratedDevice {
    pub index: usize,
    pub info: HidDeviceInfo,
    pub variant: ControllerVariant,
}

impl EnumeratedDevice {
    pub fn name(&self) -> String {
        device_name(self.variant, self.index)
    }

    /// Plug-in order position; the same as the enumeration index.
    pub fn player_index(&self) -> usize {
        self.index
    }

    pub fn guid(&self) -> JoystickGuid {
        JoystickGuid::from_ids(self.info.vendor_id, self.info.product_id)
    }

    pub fn instance_id(&self) -> DeviceUid {
        self.info.uid
    }
}

fn supported(
    devices: &[HidDeviceInfo],
) -> impl Iterator<Item = (&HidDeviceInfo, ControllerVariant)> {
    devices.iter().filter_map(|info| {
        ControllerVariant::from_device_type(info.device_type).map(|variant| (info, variant))
    })
}

/// All supported pads in transport order.
pub fn enumerate(devices: &[HidDeviceInfo]) -> Vec<EnumeratedDevice> {
    supported(devices)
        .enumerate()
        .map(|(index, (info, variant))| EnumeratedDevice {
            index,
            info: info.clone(),
            variant,
        })
        .collect()
}

pub fn count(devices: &[HidDeviceInfo]) -> usize {
    supported(devices).count()
}

/// The `index`-th supported pad, or `None`.
pub fn nth(devices: &[HidDeviceInfo], index: usize) -> Option<EnumeratedDevice> {
    supported(devices)
        .nth(index)
        .map(|(info, variant)| EnumeratedDevice {
            index,
            info: info.clone(),
            variant,
        })
}
