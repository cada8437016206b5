//! Canonical, variant-independent controller state.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Canonical button mask.
    ///
    /// Bit positions follow XInput's `XINPUT_GAMEPAD` `wButtons` field, which
    /// is also the Xbox 360 wire layout. Bits 10 and 11 (guide, unused) are
    /// not part of the canonical set and are always dropped on decode.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Buttons: u16 {
        const DPAD_UP        = 0x0001;
        const DPAD_DOWN      = 0x0002;
        const DPAD_LEFT      = 0x0004;
        const DPAD_RIGHT     = 0x0008;
        const START          = 0x0010;
        const BACK           = 0x0020;
        const LEFT_THUMB     = 0x0040;
        const RIGHT_THUMB    = 0x0080;
        const LEFT_SHOULDER  = 0x0100;
        const RIGHT_SHOULDER = 0x0200;
        const A              = 0x1000;
        const B              = 0x2000;
        const X              = 0x4000;
        const Y              = 0x8000;
    }
}

/// One decoded input report.
///
/// Produced fresh by every successful decode and replaced wholesale, never
/// patched. Stick Y values keep the wire sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GamepadState {
    pub buttons: Buttons,
    pub left_trigger: u8,
    pub right_trigger: u8,
    pub left_x: i16,
    pub left_y: i16,
    pub right_x: i16,
    pub right_y: i16,
}

impl GamepadState {
    /// All-released, centred, triggers at rest.
    pub const NEUTRAL: GamepadState = GamepadState {
        buttons: Buttons::empty(),
        left_trigger: 0,
        right_trigger: 0,
        left_x: 0,
        left_y: 0,
        right_x: 0,
        right_y: 0,
    };

    pub fn is_pressed(&self, button: Buttons) -> bool {
        self.buttons.contains(button)
    }
}
