//! Common HID transport abstractions for openpad.
//!
//! The joystick core never talks to a USB stack directly. Everything it needs
//! from the host controller (device list, interrupt pipes, hot-plug callbacks)
//! goes through the [`HidTransport`] trait defined here. The [`mock`] module
//! provides an in-memory implementation used by tests and the replay tool.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod device_info;
pub mod hid_traits;

pub use device_info::*;
pub use hid_traits::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HidCommonError {
    #[error("Device not found: uid {0}")]
    DeviceNotFound(DeviceUid),

    #[error("Transport not initialized")]
    NotInitialized,

    #[error("Failed to write to device {uid}: {reason}")]
    WriteError { uid: DeviceUid, reason: String },

    #[error("Device {0} disconnected")]
    Disconnected(DeviceUid),
}

impl HidCommonError {
    pub fn write_error(uid: DeviceUid, reason: impl Into<String>) -> Self {
        Self::WriteError {
            uid,
            reason: reason.into(),
        }
    }
}

pub type HidCommonResult<T> = Result<T, HidCommonError>;
