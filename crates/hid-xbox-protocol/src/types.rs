//! Controller wire-format classification and per-format report layouts.

use core::fmt;
use core::str::FromStr;

use openpad_hid_common::DeviceType;
use serde::{Deserialize, Serialize};

/// One of the four supported controller wire-format families.
///
/// Fixed when a session is opened; a session never changes variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerVariant {
    /// Original Xbox controller (analog face buttons).
    OriginalPad,
    /// Xbox 360 wired controller.
    Gen2Wired,
    /// Xbox 360 wireless controller behind the wireless receiver.
    Gen2Wireless,
    /// Xbox One controller (GIP input packets).
    Gen3,
}

/// Byte offsets of the fields a variant's input report carries.
///
/// All multi-byte fields are little-endian. `min_len` is one past the last
/// byte any field reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLayout {
    pub buttons: usize,
    pub left_trigger: usize,
    pub right_trigger: usize,
    pub left_x: usize,
    pub left_y: usize,
    pub right_x: usize,
    pub right_y: usize,
    pub min_len: usize,
}

const ORIGINAL_LAYOUT: ReportLayout = ReportLayout {
    buttons: 2,
    left_trigger: 10,
    right_trigger: 11,
    left_x: 12,
    left_y: 14,
    right_x: 16,
    right_y: 18,
    min_len: 20,
};

const GEN2_WIRED_LAYOUT: ReportLayout = ReportLayout {
    buttons: 2,
    left_trigger: 4,
    right_trigger: 5,
    left_x: 6,
    left_y: 8,
    right_x: 10,
    right_y: 12,
    min_len: 14,
};

const GEN2_WIRELESS_LAYOUT: ReportLayout = ReportLayout {
    buttons: 6,
    left_trigger: 8,
    right_trigger: 9,
    left_x: 10,
    left_y: 12,
    right_x: 14,
    right_y: 16,
    min_len: 18,
};

// Triggers are 10-bit LE words on the wire; only the low byte is read.
const GEN3_LAYOUT: ReportLayout = ReportLayout {
    buttons: 4,
    left_trigger: 6,
    right_trigger: 8,
    left_x: 10,
    left_y: 12,
    right_x: 14,
    right_y: 16,
    min_len: 18,
};

impl ControllerVariant {
    pub const ALL: [ControllerVariant; 4] = [
        ControllerVariant::OriginalPad,
        ControllerVariant::Gen2Wired,
        ControllerVariant::Gen2Wireless,
        ControllerVariant::Gen3,
    ];

    /// Map the host stack's device class to a wire format, or `None` for
    /// devices this crate cannot drive.
    pub fn from_device_type(device_type: DeviceType) -> Option<Self> {
        match device_type {
            DeviceType::XboxOriginal => Some(ControllerVariant::OriginalPad),
            DeviceType::Xbox360Wired => Some(ControllerVariant::Gen2Wired),
            DeviceType::Xbox360Wireless => Some(ControllerVariant::Gen2Wireless),
            DeviceType::XboxOne => Some(ControllerVariant::Gen3),
            DeviceType::Keyboard | DeviceType::Mouse | DeviceType::Unknown => None,
        }
    }

    pub fn device_type(self) -> DeviceType {
        match self {
            ControllerVariant::OriginalPad => DeviceType::XboxOriginal,
            ControllerVariant::Gen2Wired => DeviceType::Xbox360Wired,
            ControllerVariant::Gen2Wireless => DeviceType::Xbox360Wireless,
            ControllerVariant::Gen3 => DeviceType::XboxOne,
        }
    }

    pub fn layout(self) -> &'static ReportLayout {
        match self {
            ControllerVariant::OriginalPad => &ORIGINAL_LAYOUT,
            ControllerVariant::Gen2Wired => &GEN2_WIRED_LAYOUT,
            ControllerVariant::Gen2Wireless => &GEN2_WIRELESS_LAYOUT,
            ControllerVariant::Gen3 => &GEN3_LAYOUT,
        }
    }

    /// Length of this variant's rumble command in bytes.
    pub fn rumble_len(self) -> usize {
        match self {
            ControllerVariant::OriginalPad => 6,
            ControllerVariant::Gen2Wired | ControllerVariant::Gen2Wireless => 8,
            ControllerVariant::Gen3 => 13,
        }
    }

    /// Product family name used for user-facing device names.
    pub fn family_name(self) -> &'static str {
        match self {
            ControllerVariant::OriginalPad => "Original Xbox Controller",
            ControllerVariant::Gen2Wired | ControllerVariant::Gen2Wireless => {
                "Xbox 360 Controller"
            }
            ControllerVariant::Gen3 => "Xbox One Controller",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ControllerVariant::OriginalPad => "original_pad",
            ControllerVariant::Gen2Wired => "gen2_wired",
            ControllerVariant::Gen2Wireless => "gen2_wireless",
            ControllerVariant::Gen3 => "gen3",
        }
    }
}

impl fmt::Display for ControllerVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`ControllerVariant::from_str`] for unrecognised names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown controller variant '{}' (expected original_pad, gen2_wired, gen2_wireless or gen3)",
            self.0
        )
    }
}

impl std::error::Error for UnknownVariant {}

impl FromStr for ControllerVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "original_pad" | "original" | "xbox" => Ok(ControllerVariant::OriginalPad),
            "gen2_wired" | "x360" | "360_wired" => Ok(ControllerVariant::Gen2Wired),
            "gen2_wireless" | "x360w" | "360_wireless" => Ok(ControllerVariant::Gen2Wireless),
            "gen3" | "xone" | "one" => Ok(ControllerVariant::Gen3),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_type_round_trip() {
        for variant in ControllerVariant::ALL {
            assert_eq!(
                ControllerVariant::from_device_type(variant.device_type()),
                Some(variant)
            );
        }
    }

    #[test]
    fn non_gamepads_have_no_variant() {
        assert_eq!(ControllerVariant::from_device_type(DeviceType::Keyboard), None);
        assert_eq!(ControllerVariant::from_device_type(DeviceType::Mouse), None);
        assert_eq!(ControllerVariant::from_device_type(DeviceType::Unknown), None);
    }

    #[test]
    fn layouts_fit_inside_min_len() {
        for variant in ControllerVariant::ALL {
            let l = variant.layout();
            for offset in [l.buttons, l.left_x, l.left_y, l.right_x, l.right_y] {
                assert!(offset + 2 <= l.min_len, "{variant}: word @{offset}");
            }
            assert!(l.left_trigger < l.min_len);
            assert!(l.right_trigger < l.min_len);
        }
    }

    #[test]
    fn rumble_lengths() {
        assert_eq!(ControllerVariant::OriginalPad.rumble_len(), 6);
        assert_eq!(ControllerVariant::Gen2Wired.rumble_len(), 8);
        assert_eq!(ControllerVariant::Gen2Wireless.rumble_len(), 8);
        assert_eq!(ControllerVariant::Gen3.rumble_len(), 13);
    }

    #[test]
    fn parse_names_and_aliases() {
        assert_eq!("gen3".parse(), Ok(ControllerVariant::Gen3));
        assert_eq!("X360".parse(), Ok(ControllerVariant::Gen2Wired));
        assert_eq!("original".parse(), Ok(ControllerVariant::OriginalPad));
        assert!("ps4".parse::<ControllerVariant>().is_err());
        for variant in ControllerVariant::ALL {
            assert_eq!(variant.as_str().parse(), Ok(variant));
        }
    }
}
