//! Prelude for openpad-joystick.
//!
//! This module re-exports the most commonly used types for convenient importing.
//!
//! # Example
//!
//! ```rust
//! use openpad_joystick::prelude::*;
//! use openpad_hid_common::{mock::MockTransport, DeviceType, HidDeviceInfo};
//!
//! let transport = MockTransport::new();
//! transport.add_device(HidDeviceInfo::new(1, 0x045E, 0x028E, DeviceType::Xbox360Wired));
//!
//! let config = DriverConfig::builder()
//!     .enumeration_settle(std::time::Duration::ZERO)
//!     .build()?;
//! let mut driver = JoystickDriver::with_clock(transport, ManualClock::new(), config)?;
//! assert_eq!(driver.init()?, 1);
//!
//! let uid = driver.open(0)?;
//! let mut events: Vec<JoystickEvent> = Vec::new();
//! driver.update(uid, &mut events);
//! # Ok::<(), JoystickError>(())
//! ```

pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::config::{DriverConfig, DriverConfigBuilder};
pub use crate::driver::{HotplugEvent, JoystickDriver};
pub use crate::enumerate::EnumeratedDevice;
pub use crate::error::{JoystickError, JoystickResult};
pub use crate::event::{CountingSink, EventSink, InputChange, JoystickEvent};
pub use crate::session::{Capabilities, DeviceSession};
pub use openpad_hid_xbox_protocol::{ControllerVariant, GamepadState};
