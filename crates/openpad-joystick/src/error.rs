//! Error types for the joystick driver.

use openpad_hid_common::{DeviceType, DeviceUid, HidCommonError};
use thiserror::Error;

/// Errors that can occur during driver and session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoystickError {
    /// No supported device at this enumeration index.
    #[error("No supported device at index {0}")]
    DeviceNotFound(usize),

    /// The device exists but is not one of the four supported pad families.
    #[error("Device {uid} is not a supported gamepad ({device_type:?})")]
    UnsupportedDevice {
        /// Transport-assigned id of the device.
        uid: DeviceUid,
        /// Device class reported by the transport.
        device_type: DeviceType,
    },

    /// The device already has an open session.
    #[error("Device {0} already has an open session")]
    AlreadyOpen(DeviceUid),

    /// The device has no open session.
    #[error("Device {0} has no open session")]
    NotOpen(DeviceUid),

    /// `max_devices` sessions are already open.
    #[error("Session limit reached: {0} devices already open")]
    SessionLimit(usize),

    /// Transport layer failure.
    #[error("Transport error: {0}")]
    Transport(#[from] HidCommonError),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl JoystickError {
    /// Create an unsupported device error.
    #[must_use]
    pub fn unsupported(uid: DeviceUid, device_type: DeviceType) -> Self {
        Self::UnsupportedDevice { uid, device_type }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration(reason.into())
    }

    /// Returns `true` for errors raised by the transport rather than the driver.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// A specialized `Result` type for joystick operations.
pub type JoystickResult<T> = std::result::Result<T, JoystickError>;
