//! Canonical state comparison.
//!
//! Every open session exposes the same logical pad: 6 axes, 1 hat and 10
//! buttons. [`diff`] turns two consecutive [`GamepadState`]s into the
//! minimal list of changes in a fixed order: hat, buttons 0..=9, then axes
//! 2, 5, 0, 1, 3, 4.
//!
//! Change detection compares the raw canonical fields; only the emitted
//! value is transformed.

use openpad_hid_xbox_protocol::{Buttons, GamepadState};

use crate::event::InputChange;

pub const NUM_AXES: usize = 6;
pub const NUM_HATS: usize = 1;
pub const NUM_BUTTONS: usize = 10;

pub const HAT_CENTERED: u8 = 0x00;
pub const HAT_UP: u8 = 0x01;
pub const HAT_DOWN: u8 = 0x02;
pub const HAT_LEFT: u8 = 0x04;
pub const HAT_RIGHT: u8 = 0x08;

pub const AXIS_LEFT_X: u8 = 0;
pub const AXIS_LEFT_Y: u8 = 1;
pub const AXIS_LEFT_TRIGGER: u8 = 2;
pub const AXIS_RIGHT_X: u8 = 3;
pub const AXIS_RIGHT_Y: u8 = 4;
pub const AXIS_RIGHT_TRIGGER: u8 = 5;

/// Button index `i` reports `BUTTON_ORDER[i]`.
pub const BUTTON_ORDER: [Buttons; NUM_BUTTONS] = [
    Buttons::A,
    Buttons::B,
    Buttons::X,
    Buttons::Y,
    Buttons::LEFT_SHOULDER,
    Buttons::RIGHT_SHOULDER,
    Buttons::BACK,
    Buttons::START,
    Buttons::LEFT_THUMB,
    Buttons::RIGHT_THUMB,
];

const HAT_DIRECTIONS: [(Buttons, u8); 4] = [
    (Buttons::DPAD_UP, HAT_UP),
    (Buttons::DPAD_DOWN, HAT_DOWN),
    (Buttons::DPAD_LEFT, HAT_LEFT),
    (Buttons::DPAD_RIGHT, HAT_RIGHT),
];

/// Hat value from the D-pad bits.
///
/// Opposite directions are not exclusive: up and down together give 3.
pub fn hat_value(buttons: Buttons) -> u8 {
    HAT_DIRECTIONS
        .iter()
        .filter(|(button, _)| buttons.contains(*button))
        .fold(HAT_CENTERED, |hat, (_, flag)| hat | flag)
}

/// Y-axis transform: bitwise NOT, not negation.
///
/// `complement16(v) == -v - 1`, so 0 maps to -1 and `i16::MIN` maps to
/// `i16::MAX` without overflow.
pub fn complement16(value: i16) -> i16 {
    !value
}

/// Expand an 8-bit trigger to the signed 16-bit axis range.
///
/// The byte is replicated into both halves, so 0 maps to -32768 and 255 to
/// 32767.
pub fn trigger_to_axis(value: u8) -> i16 {
    let wide = (u16::from(value) << 8) | u16::from(value);
    (i32::from(wide) - 32768) as i16
}

/// Compare `prev` against `curr`, pass every change to `emit`, and return
/// the hat value to retain for the next call.
pub fn diff(
    prev: &GamepadState,
    prev_hat: u8,
    curr: &GamepadState,
    mut emit: impl FnMut(InputChange),
) -> u8 {
    let hat = hat_value(curr.buttons);
    if hat != prev_hat {
        emit(InputChange::Hat { value: hat });
    }

    for (index, button) in (0u8..).zip(BUTTON_ORDER) {
        let pressed = curr.buttons.contains(button);
        if pressed != prev.buttons.contains(button) {
            emit(InputChange::Button { index, pressed });
        }
    }

    let axes = [
        (
            AXIS_LEFT_TRIGGER,
            prev.left_trigger != curr.left_trigger,
            trigger_to_axis(curr.left_trigger),
        ),
        (
            AXIS_RIGHT_TRIGGER,
            prev.right_trigger != curr.right_trigger,
            trigger_to_axis(curr.right_trigger),
        ),
        (AXIS_LEFT_X, prev.left_x != curr.left_x, curr.left_x),
        (
            AXIS_LEFT_Y,
            prev.left_y != curr.left_y,
            complement16(curr.left_y),
        ),
        (AXIS_RIGHT_X, prev.right_x != curr.right_x, curr.right_x),
        (
            AXIS_RIGHT_Y,
            prev.right_y != curr.right_y,
            complement16(curr.right_y),
        ),
    ];
    for (index, changed, value) in axes {
        if changed {
            emit(InputChange::Axis { index, value });
        }
    }

    hat
}
