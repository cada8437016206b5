//! Offline tooling for Xbox-family gamepad reports.
//!
//! Decodes single reports, encodes rumble commands and replays captured
//! report streams through a [`JoystickDriver`](openpad_joystick::JoystickDriver)
//! session without any hardware attached.

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod capture;
pub mod hex;
pub mod replay;

use openpad_hid_xbox_protocol::{
    Buttons, ControllerVariant, GamepadState, ParseError, decode, encode_rumble,
};

pub use capture::{CaptureFile, CaptureReport, RumbleStep};
pub use hex::{format_hex, parse_hex_bytes, parse_hex_u16, parse_intensity};
pub use replay::{REPLAY_UID, ReplayOutcome, ReplayStep, replay};

/// Names of the held buttons joined with `|`, or `-` when none are held.
pub fn button_names(buttons: Buttons) -> String {
    let names: Vec<&str> = buttons.iter_names().map(|(name, _)| name).collect();
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join("|")
    }
}

/// One-line rendering of a decoded state.
pub fn describe_state(state: &GamepadState) -> String {
    format!(
        "buttons={} lt={} rt={} left=({}, {}) right=({}, {})",
        button_names(state.buttons),
        state.left_trigger,
        state.right_trigger,
        state.left_x,
        state.left_y,
        state.right_x,
        state.right_y
    )
}

/// Decode `bytes` as a `variant` report.
///
/// # Errors
///
/// Returns the frame rejection reason.
pub fn decode_report(variant: ControllerVariant, bytes: &[u8]) -> Result<GamepadState, ParseError> {
    decode(variant, bytes)
}

/// Capture-style hex of the rumble command for `variant`.
pub fn rumble_hex(variant: ControllerVariant, low: u16, high: u16) -> String {
    format_hex(encode_rumble(variant, low, high).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_names() {
        assert_eq!(button_names(Buttons::empty()), "-");
        assert_eq!(button_names(Buttons::A | Buttons::START), "START|A");
    }

    #[test]
    fn test_describe_gen3_report() -> Result<(), ParseError> {
        let mut data = [0u8; 18];
        data[0] = 0x20;
        data[4] = 0x10; // A
        data[8] = 0xFF;
        data[10..12].copy_from_slice(&(-5i16).to_le_bytes());
        let state = decode_report(ControllerVariant::Gen3, &data)?;
        assert_eq!(
            describe_state(&state),
            "buttons=A lt=0 rt=255 left=(-5, 0) right=(0, 0)"
        );
        Ok(())
    }

    #[test]
    fn test_rumble_hex_gen3() {
        assert_eq!(
            rumble_hex(ControllerVariant::Gen3, 0xFFFF, 0x0000),
            "0x09 0x00 0x00 0x09 0x00 0x0F 0x00 0x00 0x64 0x00 0xFF 0x00 0xEB"
        );
    }
}
