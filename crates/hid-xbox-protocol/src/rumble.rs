//! Rumble command encoding.
//!
//! Every variant takes the same pair of 16-bit intensities (low-frequency
//! motor, high-frequency motor) and packs it into its own fixed template.
//!
//! # Original pad (6 bytes)
//! | Offset | Field                      |
//! |--------|----------------------------|
//! | 0      | 0x00                       |
//! | 1      | length 0x06                |
//! | 2–3    | low-frequency, u16 LE      |
//! | 4–5    | high-frequency, u16 LE     |
//!
//! # Xbox 360 wired (8 bytes)
//! | Offset | Field                          |
//! |--------|--------------------------------|
//! | 0–2    | 0x00 0x08 0x00                 |
//! | 3      | low-frequency, high byte       |
//! | 4      | high-frequency, high byte      |
//! | 5–7    | 0x00                           |
//!
//! # Xbox 360 wireless (8 bytes)
//! | Offset | Field                          |
//! |--------|--------------------------------|
//! | 0–4    | 0x00 0x01 0x0F 0xC0 0x00       |
//! | 5      | low-frequency, high byte       |
//! | 6      | high-frequency, high byte      |
//! | 7      | 0x00                           |
//!
//! # Xbox One (13 bytes)
//! | Offset | Field                                     |
//! |--------|-------------------------------------------|
//! | 0–7    | 0x09 0x00 0x00 0x09 0x00 0x0F 0x00 0x00   |
//! | 8      | low-frequency ÷ 655 (0..=100)             |
//! | 9      | high-frequency ÷ 655 (0..=100)            |
//! | 10–12  | 0xFF 0x00 0xEB                            |
//!
//! Xbox One motor magnitudes are percentages; `u16::MAX / 655` is 100.

use crate::types::ControllerVariant;

/// Longest rumble command of any variant.
pub const MAX_RUMBLE_LEN: usize = 13;

pub const ORIGINAL_RUMBLE_LEN: usize = 6;
pub const GEN2_RUMBLE_LEN: usize = 8;
pub const GEN3_RUMBLE_LEN: usize = 13;

/// Divisor that maps a 16-bit intensity onto 0..=100.
pub const GEN3_PERCENT_DIVISOR: u16 = 655;

const ORIGINAL_TEMPLATE: [u8; ORIGINAL_RUMBLE_LEN] = [0x00, 0x06, 0x00, 0x00, 0x00, 0x00];
const GEN2_WIRED_TEMPLATE: [u8; GEN2_RUMBLE_LEN] = [0x00, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
const GEN2_WIRELESS_TEMPLATE: [u8; GEN2_RUMBLE_LEN] =
    [0x00, 0x01, 0x0F, 0xC0, 0x00, 0x00, 0x00, 0x00];
const GEN3_TEMPLATE: [u8; GEN3_RUMBLE_LEN] = [
    0x09, 0x00, 0x00, 0x09, 0x00, 0x0F, 0x00, 0x00, 0x00, 0x00, 0xFF, 0x00, 0xEB,
];

/// Encode an original pad rumble command.
pub fn encode_original(low: u16, high: u16) -> [u8; ORIGINAL_RUMBLE_LEN] {
    let mut out = ORIGINAL_TEMPLATE;
    let low = low.to_le_bytes();
    let high = high.to_le_bytes();
    out[2] = low[0];
    out[3] = low[1];
    out[4] = high[0];
    out[5] = high[1];
    out
}

/// Encode an Xbox 360 wired rumble command.
pub fn encode_gen2_wired(low: u16, high: u16) -> [u8; GEN2_RUMBLE_LEN] {
    let mut out = GEN2_WIRED_TEMPLATE;
    out[3] = (low >> 8) as u8;
    out[4] = (high >> 8) as u8;
    out
}

/// Encode an Xbox 360 wireless rumble command.
pub fn encode_gen2_wireless(low: u16, high: u16) -> [u8; GEN2_RUMBLE_LEN] {
    let mut out = GEN2_WIRELESS_TEMPLATE;
    out[5] = (low >> 8) as u8;
    out[6] = (high >> 8) as u8;
    out
}

/// Encode an Xbox One rumble command.
pub fn encode_gen3(low: u16, high: u16) -> [u8; GEN3_RUMBLE_LEN] {
    let mut out = GEN3_TEMPLATE;
    out[8] = (low / GEN3_PERCENT_DIVISOR) as u8;
    out[9] = (high / GEN3_PERCENT_DIVISOR) as u8;
    out
}

/// A variant-sized rumble command held inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RumbleCommand {
    bytes: [u8; MAX_RUMBLE_LEN],
    len: usize,
}

impl RumbleCommand {
    fn from_slice(src: &[u8]) -> Self {
        let mut bytes = [0u8; MAX_RUMBLE_LEN];
        let len = src.len().min(MAX_RUMBLE_LEN);
        bytes[..len].copy_from_slice(&src[..len]);
        Self { bytes, len }
    }

    /// The bytes to write to the interrupt-out pipe.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl AsRef<[u8]> for RumbleCommand {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Encode a rumble command for `variant`.
///
/// The result is always exactly [`ControllerVariant::rumble_len`] bytes.
pub fn encode_rumble(variant: ControllerVariant, low: u16, high: u16) -> RumbleCommand {
    match variant {
        ControllerVariant::OriginalPad => RumbleCommand::from_slice(&encode_original(low, high)),
        ControllerVariant::Gen2Wired => RumbleCommand::from_slice(&encode_gen2_wired(low, high)),
        ControllerVariant::Gen2Wireless => {
            RumbleCommand::from_slice(&encode_gen2_wireless(low, high))
        }
        ControllerVariant::Gen3 => RumbleCommand::from_slice(&encode_gen3(low, high)),
    }
}

/// Encode a motors-off command.
pub fn encode_stop(variant: ControllerVariant) -> RumbleCommand {
    encode_rumble(variant, 0, 0)
}
