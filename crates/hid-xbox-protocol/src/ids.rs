//! Microsoft Xbox controller USB vendor and product ID constants.
//!
//! The joystick driver is handed a device class by the host stack and does
//! not need these to operate. They exist so tools and the mock transport can
//! tag a device from its VID/PID the same way the host stack would.
//!
//! Sources:
//! - **Linux kernel `xpad.c`** `xpad_device[]` table (mainline)
//! - **usb.ids** database, vendor `045e`
//!
//! Third-party pads (Mad Catz, PDP, Hori, ...) use their own vendor IDs and
//! are classified by the host stack from interface descriptors, not listed
//! here.

use crate::types::ControllerVariant;

/// Microsoft Corp. USB Vendor ID.
pub const VENDOR_ID: u16 = 0x045E;

/// Original Xbox controller ("Duke").
pub const PRODUCT_ORIGINAL: u16 = 0x0202;

/// Original Xbox Controller S (Japan).
pub const PRODUCT_ORIGINAL_S_JP: u16 = 0x0285;

/// Original Xbox Controller S.
pub const PRODUCT_ORIGINAL_S: u16 = 0x0289;

/// Xbox 360 wired controller.
pub const PRODUCT_360_WIRED: u16 = 0x028E;

/// Xbox 360 wireless receiver (first revision).
pub const PRODUCT_360_WIRELESS_LEGACY: u16 = 0x0291;

/// Xbox 360 wireless receiver for Windows.
pub const PRODUCT_360_WIRELESS: u16 = 0x0719;

/// Xbox One controller (2013).
pub const PRODUCT_ONE: u16 = 0x02D1;

/// Xbox One controller (2015 firmware).
pub const PRODUCT_ONE_2015: u16 = 0x02DD;

/// Xbox One Elite controller.
pub const PRODUCT_ONE_ELITE: u16 = 0x02E3;

/// Xbox One S controller (wired mode).
pub const PRODUCT_ONE_S: u16 = 0x02EA;

/// Xbox Series X|S controller (wired mode).
pub const PRODUCT_SERIES_XS: u16 = 0x0B12;

/// Wire format for a known Microsoft VID/PID pair, or `None`.
pub fn variant_for(vid: u16, pid: u16) -> Option<ControllerVariant> {
    if vid != VENDOR_ID {
        return None;
    }
    match pid {
        PRODUCT_ORIGINAL | PRODUCT_ORIGINAL_S_JP | PRODUCT_ORIGINAL_S => {
            Some(ControllerVariant::OriginalPad)
        }
        PRODUCT_360_WIRED => Some(ControllerVariant::Gen2Wired),
        PRODUCT_360_WIRELESS_LEGACY | PRODUCT_360_WIRELESS => {
            Some(ControllerVariant::Gen2Wireless)
        }
        PRODUCT_ONE | PRODUCT_ONE_2015 | PRODUCT_ONE_ELITE | PRODUCT_ONE_S
        | PRODUCT_SERIES_XS => Some(ControllerVariant::Gen3),
        _ => None,
    }
}

/// Returns `true` if the VID/PID pair identifies a known Microsoft pad.
pub fn is_xbox_controller(vid: u16, pid: u16) -> bool {
    variant_for(vid, pid).is_some()
}

/// Returns the product name for a known Microsoft PID, or `None`.
pub fn product_name(pid: u16) -> Option<&'static str> {
    match pid {
        PRODUCT_ORIGINAL => Some("Xbox Controller"),
        PRODUCT_ORIGINAL_S_JP => Some("Xbox Controller S (Japan)"),
        PRODUCT_ORIGINAL_S => Some("Xbox Controller S"),
        PRODUCT_360_WIRED => Some("Xbox 360 Controller"),
        PRODUCT_360_WIRELESS_LEGACY => Some("Xbox 360 Wireless Receiver"),
        PRODUCT_360_WIRELESS => Some("Xbox 360 Wireless Receiver for Windows"),
        PRODUCT_ONE => Some("Xbox One Controller"),
        PRODUCT_ONE_2015 => Some("Xbox One Controller (2015)"),
        PRODUCT_ONE_ELITE => Some("Xbox One Elite Controller"),
        PRODUCT_ONE_S => Some("Xbox One S Controller"),
        PRODUCT_SERIES_XS => Some("Xbox Series X|S Controller"),
        _ => None,
    }
}
