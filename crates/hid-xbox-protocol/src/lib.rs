//! Xbox-family gamepad USB HID protocol implementation.
//!
//! Four wire formats are supported: the original Xbox controller, the wired
//! and wireless Xbox 360 controllers, and the Xbox One controller. Each
//! format decodes into one canonical [`GamepadState`], and each has its own
//! rumble command layout produced by [`encode_rumble`].
//!
//! This crate is intentionally I/O-free and allocation-free on hot paths.
//! It provides pure functions and types that can be tested without hardware.
//!
//! # Sources
//! - Microsoft XInput `XINPUT_GAMEPAD` (canonical button bits)
//! - Linux kernel `drivers/input/joystick/xpad.c` (wire layouts, rumble packets)

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod ids;
pub mod naming;
pub mod report;
pub mod rumble;
pub mod state;
pub mod types;

pub use ids::{
    PRODUCT_360_WIRED, PRODUCT_360_WIRELESS, PRODUCT_360_WIRELESS_LEGACY, PRODUCT_ONE,
    PRODUCT_ONE_2015, PRODUCT_ONE_ELITE, PRODUCT_ONE_S, PRODUCT_ORIGINAL, PRODUCT_ORIGINAL_S,
    PRODUCT_ORIGINAL_S_JP, PRODUCT_SERIES_XS, VENDOR_ID, is_xbox_controller, product_name,
    variant_for,
};
pub use naming::{JoystickGuid, device_name};
pub use report::{BUTTON_DEADZONE, MAX_PACKET_SIZE, ParseError, check_frame, decode};
pub use rumble::{MAX_RUMBLE_LEN, RumbleCommand, encode_rumble, encode_stop};
pub use state::{Buttons, GamepadState};
pub use types::{ControllerVariant, ReportLayout, UnknownVariant};
