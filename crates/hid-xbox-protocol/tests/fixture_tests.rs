//! Decoding of captured reports, one fixture per wire format.
//!
//! The byte arrays mirror what each pad sends on its interrupt-in pipe.

use openpad_hid_xbox_protocol::{Buttons, ControllerVariant, GamepadState, ParseError, decode};

/// Original pad: A held fully, Start pressed, left stick hard left.
const ORIGINAL_A_START: [u8; 20] = [
    0x00, 0x14, // header
    0x10, 0x00, // digital: start
    0xFF, 0x00, 0x00, 0x00, 0x00, 0x00, // A B X Y black white
    0x00, 0x80, // LT RT
    0x00, 0x80, // LX = i16::MIN
    0x00, 0x00, // LY
    0x34, 0x12, // RX
    0xFF, 0xFF, // RY = -1
];

/// Xbox 360 wired: D-pad up + right shoulder, triggers, sticks.
const GEN2_WIRED_DPAD: [u8; 20] = [
    0x00, 0x14, // type, length
    0x01, 0x02, // dpad up | right shoulder
    0x40, 0xFF, // LT RT
    0x00, 0x40, // LX
    0x00, 0xC0, // LY
    0xFF, 0x7F, // RX
    0x01, 0x80, // RY
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Xbox 360 wireless: pad state packet with B + Y.
const GEN2_WIRELESS_BY: [u8; 29] = [
    0x00, 0x01, 0x00, 0xF0, 0x00, 0x13, // header
    0x00, 0xA0, // buttons: B | Y
    0x10, 0x20, // LT RT
    0x01, 0x00, // LX
    0x02, 0x00, // LY
    0x03, 0x00, // RX
    0x04, 0x00, // RY
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Xbox One: menu, view, A, left stick click, D-pad right.
const GEN3_MIXED: [u8; 18] = [
    0x20, 0x00, 0x05, 0x0E, // GIP header
    0x1C, 0x48, // bits 2,3,4 | bits 11,14
    0xFF, 0x03, // LT (10-bit, low byte read)
    0x80, 0x00, // RT
    0x10, 0x00, // LX
    0xF0, 0xFF, // LY
    0x00, 0x00, // RX
    0x00, 0x00, // RY
];

#[test]
fn test_original_fixture() -> Result<(), ParseError> {
    let state = decode(ControllerVariant::OriginalPad, &ORIGINAL_A_START)?;
    assert_eq!(
        state,
        GamepadState {
            buttons: Buttons::A | Buttons::START,
            left_trigger: 0x00,
            right_trigger: 0x80,
            left_x: i16::MIN,
            left_y: 0,
            right_x: 0x1234,
            right_y: -1,
        }
    );
    Ok(())
}

#[test]
fn test_gen2_wired_fixture() -> Result<(), ParseError> {
    let state = decode(ControllerVariant::Gen2Wired, &GEN2_WIRED_DPAD)?;
    assert_eq!(
        state,
        GamepadState {
            buttons: Buttons::DPAD_UP | Buttons::RIGHT_SHOULDER,
            left_trigger: 0x40,
            right_trigger: 0xFF,
            left_x: 0x4000,
            left_y: -0x4000,
            right_x: i16::MAX,
            right_y: -32767,
        }
    );
    Ok(())
}

#[test]
fn test_gen2_wireless_fixture() -> Result<(), ParseError> {
    let state = decode(ControllerVariant::Gen2Wireless, &GEN2_WIRELESS_BY)?;
    assert_eq!(
        state,
        GamepadState {
            buttons: Buttons::B | Buttons::Y,
            left_trigger: 0x10,
            right_trigger: 0x20,
            left_x: 1,
            left_y: 2,
            right_x: 3,
            right_y: 4,
        }
    );
    Ok(())
}

#[test]
fn test_gen3_fixture() -> Result<(), ParseError> {
    let state = decode(ControllerVariant::Gen3, &GEN3_MIXED)?;
    assert_eq!(
        state,
        GamepadState {
            buttons: Buttons::START
                | Buttons::BACK
                | Buttons::A
                | Buttons::DPAD_RIGHT
                | Buttons::LEFT_THUMB,
            left_trigger: 0xFF,
            right_trigger: 0x80,
            left_x: 0x10,
            left_y: -16,
            right_x: 0,
            right_y: 0,
        }
    );
    Ok(())
}

#[test]
fn test_gen2_wireless_status_packet_rejected() {
    // Connection announcement: byte 1 bit 0 clear.
    let mut packet = GEN2_WIRELESS_BY;
    packet[1] = 0x00;
    assert!(decode(ControllerVariant::Gen2Wireless, &packet).is_err());
}

#[test]
fn test_gen2_wired_led_status_rejected() {
    // LED status report: type 0x01, length 0x03.
    let packet = [0x01u8, 0x03, 0x06, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
    assert_eq!(
        decode(ControllerVariant::Gen2Wired, &packet),
        Err(ParseError::BadMarker {
            variant: ControllerVariant::Gen2Wired,
            offset: 1,
            value: 0x03,
        })
    );
}

#[test]
fn test_same_buffer_under_each_variant() {
    // A single buffer can be valid for one variant and rejected by another.
    assert!(decode(ControllerVariant::Gen3, &GEN3_MIXED).is_ok());
    assert!(decode(ControllerVariant::Gen2Wireless, &GEN3_MIXED).is_err());
    assert!(decode(ControllerVariant::Gen2Wired, &GEN3_MIXED).is_err());
    assert!(decode(ControllerVariant::OriginalPad, &GEN3_MIXED).is_err());
}

#[test]
fn test_empty_buffer_rejected_for_all_variants() {
    for variant in ControllerVariant::ALL {
        assert!(matches!(
            decode(variant, &[]),
            Err(ParseError::TooShort { got: 0, .. })
        ));
    }
}
