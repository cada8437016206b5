//! # openpad-joystick
//!
//! Session layer for Xbox-family gamepads.
//!
//! Each open device gets a [`DeviceSession`](session::DeviceSession) that
//! holds the latest raw interrupt report, the previously decoded state, and
//! the rumble timer. Once per polling tick the application calls
//! [`JoystickDriver::update`](driver::JoystickDriver::update), which decodes
//! the stored report, diffs it against the previous state, and pushes the
//! changes into an [`EventSink`](event::EventSink).
//!
//! ## Architecture
//!
//! - [`driver`] - init/quit, hot-plug detection, enumeration, open/close
//! - [`session`] - per-device raw report slot, update and rumble
//! - [`registry`] - device id to report slot map used by the transport callback
//! - [`differ`] - canonical state comparison and axis transforms
//! - [`actuator`] - rumble intensity and expiry
//! - [`enumerate`] - index-based view of the transport's device list
//! - [`config`] - driver configuration
//! - [`clock`] - time source
//! - [`error`] - driver error types
//!
//! ## Threading
//!
//! Report delivery runs on the transport's completion context and only
//! touches a mutex-guarded report slot. Everything else takes `&mut self` on
//! the driver and runs on the owning thread.

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    missing_debug_implementations
)]

pub mod actuator;
pub mod clock;
pub mod config;
pub mod differ;
pub mod driver;
pub mod enumerate;
pub mod error;
pub mod event;
pub mod registry;
pub mod session;

pub mod prelude;

pub use config::{DriverConfig, DriverConfigBuilder};
pub use driver::{HotplugEvent, JoystickDriver};
pub use error::{JoystickError, JoystickResult};
pub use event::{EventSink, InputChange, JoystickEvent};
