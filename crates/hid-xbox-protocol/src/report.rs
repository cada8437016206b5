//! Input report decoding for all four wire formats.
//!
//! # Report layouts
//! | Variant      | Validity check                     | Buttons | Triggers | Sticks LX,LY,RX,RY |
//! |--------------|------------------------------------|---------|----------|--------------------|
//! | OriginalPad  | none                               | u16 @2  | @10,@11  | @12,@14,@16,@18    |
//! | Gen2Wired    | byte@1 ≥ 0x14                      | u16 @2  | @4,@5    | @6,@8,@10,@12      |
//! | Gen2Wireless | byte@1 bit0 set and byte@5 == 0x13 | u16 @6  | @8,@9    | @10,@12,@14,@16    |
//! | Gen3         | byte@0 == 0x20                     | u16 @4  | @6,@8    | @10,@12,@14,@16    |
//!
//! The original pad only carries D-pad, Start, Back and thumb clicks in its
//! button word. A, B, X, Y, Black and White are pressure-sensitive bytes at
//! offsets 4..=9 and count as pressed above [`BUTTON_DEADZONE`].
//!
//! Xbox 360 button words already use the canonical bit positions. Xbox One
//! words are remapped through [`GEN3_BUTTON_MAP`].

use core::fmt;

use crate::state::{Buttons, GamepadState};
use crate::types::ControllerVariant;

/// Capacity of a session's raw report buffer. Longer deliveries are truncated.
pub const MAX_PACKET_SIZE: usize = 32;

/// Analog face-button threshold on the original pad (strictly greater).
pub const BUTTON_DEADZONE: u8 = 0x20;

/// Minimum value of the Xbox 360 wired length byte for an input report.
pub const GEN2_WIRED_REPORT_LEN_FIELD: u8 = 0x14;

/// Xbox 360 wireless: byte 1 bit 0 marks an event packet.
pub const GEN2_WIRELESS_EVENT_FLAG: u8 = 0x01;

/// Xbox 360 wireless: byte 5 of a pad-state packet.
pub const GEN2_WIRELESS_INPUT_TAG: u8 = 0x13;

/// Xbox One GIP command id of an input packet.
pub const GEN3_INPUT_COMMAND: u8 = 0x20;

/// Original pad analog button offsets and the canonical button each maps to.
pub const ORIGINAL_ANALOG_BUTTONS: [(usize, Buttons); 6] = [
    (4, Buttons::A),
    (5, Buttons::B),
    (6, Buttons::X),
    (7, Buttons::Y),
    (8, Buttons::RIGHT_SHOULDER), // black
    (9, Buttons::LEFT_SHOULDER),  // white
];

/// Original pad digital bits 0..=7 match the canonical layout.
const ORIGINAL_DIGITAL_MASK: u16 = 0x00FF;

/// Xbox One wire bit and the canonical button it maps to.
pub const GEN3_BUTTON_MAP: [(u16, Buttons); 14] = [
    (1 << 8, Buttons::DPAD_UP),
    (1 << 9, Buttons::DPAD_DOWN),
    (1 << 10, Buttons::DPAD_LEFT),
    (1 << 11, Buttons::DPAD_RIGHT),
    (1 << 2, Buttons::START),
    (1 << 3, Buttons::BACK),
    (1 << 14, Buttons::LEFT_THUMB),
    (1 << 15, Buttons::RIGHT_THUMB),
    (1 << 12, Buttons::LEFT_SHOULDER),
    (1 << 13, Buttons::RIGHT_SHOULDER),
    (1 << 4, Buttons::A),
    (1 << 5, Buttons::B),
    (1 << 6, Buttons::X),
    (1 << 7, Buttons::Y),
];

/// Why a buffer is not an input report for its variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The slice ends before the last field the variant reads.
    TooShort {
        variant: ControllerVariant,
        got: usize,
        need: usize,
    },
    /// A framing byte does not identify an input report.
    BadMarker {
        variant: ControllerVariant,
        offset: usize,
        value: u8,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::TooShort { variant, got, need } => {
                write!(f, "{variant} report too short: got {got} bytes, need {need}")
            }
            ParseError::BadMarker {
                variant,
                offset,
                value,
            } => write!(
                f,
                "{variant} buffer is not an input report: byte {offset} is {value:#04x}"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

fn read_u8(data: &[u8], offset: usize) -> u8 {
    data.get(offset).copied().unwrap_or(0)
}

fn read_u16(data: &[u8], offset: usize) -> u16 {
    match data.get(offset..offset + 2) {
        Some(&[lo, hi]) => u16::from_le_bytes([lo, hi]),
        _ => 0,
    }
}

fn read_i16(data: &[u8], offset: usize) -> i16 {
    read_u16(data, offset) as i16
}

/// Framing precheck shared by the decoder and report delivery.
///
/// Rejects buffers shorter than the variant's layout and, for the marker
/// variants, buffers that are not input reports (status, LED, or
/// announcement packets on the same pipe).
pub fn check_frame(variant: ControllerVariant, data: &[u8]) -> Result<(), ParseError> {
    let need = variant.layout().min_len;
    if data.len() < need {
        return Err(ParseError::TooShort {
            variant,
            got: data.len(),
            need,
        });
    }

    let bad = |offset: usize| ParseError::BadMarker {
        variant,
        offset,
        value: read_u8(data, offset),
    };

    match variant {
        ControllerVariant::OriginalPad => Ok(()),
        ControllerVariant::Gen2Wired => {
            if read_u8(data, 1) < GEN2_WIRED_REPORT_LEN_FIELD {
                return Err(bad(1));
            }
            Ok(())
        }
        ControllerVariant::Gen2Wireless => {
            if read_u8(data, 1) & GEN2_WIRELESS_EVENT_FLAG == 0 {
                return Err(bad(1));
            }
            if read_u8(data, 5) != GEN2_WIRELESS_INPUT_TAG {
                return Err(bad(5));
            }
            Ok(())
        }
        ControllerVariant::Gen3 => {
            if read_u8(data, 0) != GEN3_INPUT_COMMAND {
                return Err(bad(0));
            }
            Ok(())
        }
    }
}

fn original_buttons(word: u16, data: &[u8]) -> Buttons {
    let mut buttons = Buttons::from_bits_truncate(word & ORIGINAL_DIGITAL_MASK);
    for (offset, button) in ORIGINAL_ANALOG_BUTTONS {
        if read_u8(data, offset) > BUTTON_DEADZONE {
            buttons |= button;
        }
    }
    buttons
}

fn gen3_buttons(word: u16) -> Buttons {
    GEN3_BUTTON_MAP
        .iter()
        .filter(|(bit, _)| word & bit != 0)
        .fold(Buttons::empty(), |acc, (_, button)| acc | *button)
}

/// Decode one raw input report into the canonical state.
///
/// Only framing can fail; numeric fields are taken as-is. Bytes past the
/// variant's layout are ignored.
pub fn decode(variant: ControllerVariant, data: &[u8]) -> Result<GamepadState, ParseError> {
    check_frame(variant, data)?;

    let layout = variant.layout();
    let word = read_u16(data, layout.buttons);
    let buttons = match variant {
        ControllerVariant::OriginalPad => original_buttons(word, data),
        ControllerVariant::Gen2Wired | ControllerVariant::Gen2Wireless => {
            Buttons::from_bits_truncate(word)
        }
        ControllerVariant::Gen3 => gen3_buttons(word),
    };

    Ok(GamepadState {
        buttons,
        left_trigger: read_u8(data, layout.left_trigger),
        right_trigger: read_u8(data, layout.right_trigger),
        left_x: read_i16(data, layout.left_x),
        left_y: read_i16(data, layout.left_y),
        right_x: read_i16(data, layout.right_x),
        right_y: read_i16(data, layout.right_y),
    })
}
