//! End-to-end session lifecycle through the mock transport.
//!
//! Tests follow the `given_..._when_..._then_...` naming used elsewhere in
//! the workspace.

use std::time::Duration;

use openpad_hid_common::mock::MockTransport;
use openpad_hid_common::{DeviceType, DeviceUid, HidDeviceInfo, TransferStatus};
use openpad_hid_xbox_protocol::{
    ControllerVariant, PRODUCT_360_WIRED, PRODUCT_360_WIRELESS, PRODUCT_ONE_S, PRODUCT_ORIGINAL,
    VENDOR_ID, encode_rumble, encode_stop,
};
use openpad_joystick::differ::{AXIS_LEFT_Y, HAT_UP, trigger_to_axis};
use openpad_joystick::prelude::*;

type TestDriver = JoystickDriver<MockTransport, ManualClock>;

fn device(uid: DeviceUid, variant: ControllerVariant) -> HidDeviceInfo {
    let pid = match variant {
        ControllerVariant::OriginalPad => PRODUCT_ORIGINAL,
        ControllerVariant::Gen2Wired => PRODUCT_360_WIRED,
        ControllerVariant::Gen2Wireless => PRODUCT_360_WIRELESS,
        ControllerVariant::Gen3 => PRODUCT_ONE_S,
    };
    HidDeviceInfo::new(uid, VENDOR_ID, pid, variant.device_type())
}

fn setup(
    variant: ControllerVariant,
) -> Result<(TestDriver, MockTransport, ManualClock, DeviceUid), JoystickError> {
    let transport = MockTransport::new();
    transport.add_device(device(1, variant));
    let clock = ManualClock::new();
    let config = DriverConfig::builder()
        .enumeration_settle(Duration::ZERO)
        .build()?;
    let mut driver = JoystickDriver::with_clock(transport.clone(), clock.clone(), config)?;
    driver.init()?;
    let uid = driver.open(0)?;
    Ok((driver, transport, clock, uid))
}

fn wired_report(buttons: u16, left_trigger: u8, left_y: i16) -> [u8; 20] {
    let mut data = [0u8; 20];
    data[1] = 0x14;
    data[2..4].copy_from_slice(&buttons.to_le_bytes());
    data[4] = left_trigger;
    data[8..10].copy_from_slice(&left_y.to_le_bytes());
    data
}

fn changes(events: &[JoystickEvent]) -> Vec<InputChange> {
    events.iter().map(|e| e.change).collect()
}

#[test]
fn given_open_session_when_same_report_twice_then_second_update_is_silent(
) -> Result<(), JoystickError> {
    let (mut driver, transport, _, uid) = setup(ControllerVariant::Gen2Wired)?;
    transport.deliver(uid, &wired_report(0x1000, 0, 0));

    let mut events = Vec::new();
    driver.update(uid, &mut events);
    assert_eq!(
        changes(&events),
        vec![InputChange::Button {
            index: 0,
            pressed: true
        }]
    );

    transport.deliver(uid, &wired_report(0x1000, 0, 0));
    events.clear();
    driver.update(uid, &mut events);
    assert!(events.is_empty());
    Ok(())
}

#[test]
fn given_single_button_toggle_when_updating_then_exactly_one_event() -> Result<(), JoystickError> {
    let (mut driver, transport, _, uid) = setup(ControllerVariant::Gen2Wired)?;
    let mut events = Vec::new();

    transport.deliver(uid, &wired_report(0x0020, 0, 0)); // back
    driver.update(uid, &mut events);
    transport.deliver(uid, &wired_report(0x0000, 0, 0));
    events.clear();
    driver.update(uid, &mut events);

    assert_eq!(
        events,
        vec![JoystickEvent {
            instance_id: uid,
            change: InputChange::Button {
                index: 6,
                pressed: false
            }
        }]
    );
    Ok(())
}

#[test]
fn given_up_and_down_when_updating_then_hat_is_three() -> Result<(), JoystickError> {
    let (mut driver, transport, _, uid) = setup(ControllerVariant::Gen2Wired)?;
    transport.deliver(uid, &wired_report(0x0003, 0, 0));
    let mut events = Vec::new();
    driver.update(uid, &mut events);
    assert_eq!(changes(&events), vec![InputChange::Hat { value: 3 }]);
    Ok(())
}

#[test]
fn given_bad_marker_when_delivered_then_previous_state_retained() -> Result<(), JoystickError> {
    let (mut driver, transport, _, uid) = setup(ControllerVariant::Gen2Wired)?;
    transport.deliver(uid, &wired_report(0x0001, 0, 0));
    let mut events = Vec::new();
    driver.update(uid, &mut events);
    assert_eq!(changes(&events), vec![InputChange::Hat { value: HAT_UP }]);

    let mut led_status = wired_report(0x0000, 0, 0);
    led_status[1] = 0x03;
    transport.deliver(uid, &led_status);
    transport.deliver_with_status(uid, TransferStatus::Failed(-71), &wired_report(0, 0, 0));
    events.clear();
    driver.update(uid, &mut events);
    assert!(events.is_empty());

    let session = driver.session(uid);
    assert_eq!(session.map(|s| s.hat()), Some(HAT_UP));
    Ok(())
}

#[test]
fn given_gen3_session_before_any_report_when_updating_then_nothing_fires(
) -> Result<(), JoystickError> {
    let (mut driver, _, _, uid) = setup(ControllerVariant::Gen3)?;
    let mut sink = CountingSink::default();
    assert_eq!(driver.update(uid, &mut sink), 0);
    assert_eq!(sink.total(), 0);
    Ok(())
}

#[test]
fn given_trigger_and_stick_when_updating_then_values_transformed() -> Result<(), JoystickError> {
    let (mut driver, transport, _, uid) = setup(ControllerVariant::Gen2Wired)?;
    transport.deliver(uid, &wired_report(0, 0xFF, 100));
    let mut events = Vec::new();
    driver.update(uid, &mut events);
    assert_eq!(
        changes(&events),
        vec![
            InputChange::Axis {
                index: 2,
                value: trigger_to_axis(0xFF)
            },
            InputChange::Axis {
                index: AXIS_LEFT_Y,
                value: -101
            },
        ]
    );
    Ok(())
}

#[test]
fn given_gen3_session_when_rumble_then_percent_bytes_written() -> Result<(), JoystickError> {
    let (mut driver, transport, _, uid) = setup(ControllerVariant::Gen3)?;
    driver.rumble(uid, 0x8000, 0x4000, Duration::from_millis(100))?;
    let writes = transport.writes_for(uid);
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0][8], 50);
    assert_eq!(writes[0][9], 25);
    Ok(())
}

#[test]
fn given_active_rumble_when_same_pair_requested_then_only_expiry_moves(
) -> Result<(), JoystickError> {
    let (mut driver, transport, clock, uid) = setup(ControllerVariant::Gen2Wireless)?;
    driver.rumble(uid, 0x4000, 0x2000, Duration::from_millis(50))?;
    clock.advance(Duration::from_millis(40));
    driver.rumble(uid, 0x4000, 0x2000, Duration::from_millis(50))?;
    assert_eq!(transport.writes_for(uid).len(), 1);

    // Past the first expiry but inside the second.
    clock.advance(Duration::from_millis(20));
    let mut events = Vec::new();
    driver.update(uid, &mut events);
    assert_eq!(transport.writes_for(uid).len(), 1);
    Ok(())
}

#[test]
fn given_rumble_expired_when_updating_repeatedly_then_one_stop_write() -> Result<(), JoystickError>
{
    let (mut driver, transport, clock, uid) = setup(ControllerVariant::OriginalPad)?;
    driver.rumble(uid, 0xFFFF, 0xFFFF, Duration::from_millis(30))?;
    clock.advance(Duration::from_millis(31));

    let mut sink = CountingSink::default();
    for _ in 0..5 {
        driver.update(uid, &mut sink);
        clock.advance(Duration::from_millis(16));
    }

    let writes = transport.writes_for(uid);
    assert_eq!(
        writes,
        vec![
            encode_rumble(ControllerVariant::OriginalPad, 0xFFFF, 0xFFFF)
                .as_bytes()
                .to_vec(),
            encode_stop(ControllerVariant::OriginalPad).as_bytes().to_vec(),
        ]
    );

    // A new request after the stop writes again even with the old pair.
    driver.rumble(uid, 0xFFFF, 0xFFFF, Duration::from_millis(30))?;
    assert_eq!(transport.writes_for(uid).len(), 3);
    Ok(())
}

#[test]
fn given_write_failure_when_rumble_then_error_and_retry_succeeds() -> Result<(), JoystickError> {
    let (mut driver, transport, _, uid) = setup(ControllerVariant::Gen2Wired)?;
    transport.set_fail_writes(true);
    let result = driver.rumble(uid, 0x8000, 0x8000, Duration::from_secs(1));
    assert!(matches!(result, Err(JoystickError::Transport(_))));
    assert_eq!(
        driver.session(uid).map(|s| *s.actuator()),
        Some(Default::default())
    );

    transport.set_fail_writes(false);
    driver.rumble(uid, 0x8000, 0x8000, Duration::from_secs(1))?;
    assert_eq!(transport.writes_for(uid).len(), 1);
    Ok(())
}

#[test]
fn given_open_session_when_closed_then_stop_sent_and_pipe_stopped() -> Result<(), JoystickError> {
    let (mut driver, transport, _, uid) = setup(ControllerVariant::Gen2Wired)?;
    assert!(transport.is_reading(uid));

    driver.close(uid);
    assert!(!transport.is_reading(uid));
    assert_eq!(
        transport.writes_for(uid),
        vec![encode_stop(ControllerVariant::Gen2Wired).as_bytes().to_vec()]
    );
    assert!(!transport.deliver(uid, &wired_report(0x1000, 0, 0)));

    // Late ticks after close are harmless.
    let mut events = Vec::new();
    assert_eq!(driver.update(uid, &mut events), 0);
    driver.close(uid);

    // The device is still known and can be reopened.
    assert_eq!(driver.count(), 1);
    assert_eq!(driver.open(0)?, uid);
    Ok(())
}

#[test]
fn given_close_stops_rumble_disabled_when_closed_then_no_write() -> Result<(), JoystickError> {
    let transport = MockTransport::new();
    transport.add_device(device(1, ControllerVariant::Gen3));
    let config = DriverConfig::builder()
        .enumeration_settle(Duration::ZERO)
        .close_stops_rumble(false)
        .build()?;
    let mut driver = JoystickDriver::with_clock(transport.clone(), ManualClock::new(), config)?;
    driver.init()?;
    let uid = driver.open(0)?;
    driver.close(uid);
    assert!(transport.writes().is_empty());
    Ok(())
}

#[test]
fn given_close_write_fails_when_closed_then_session_still_released() -> Result<(), JoystickError> {
    let (mut driver, transport, _, uid) = setup(ControllerVariant::Gen2Wireless)?;
    transport.set_fail_writes(true);
    driver.close(uid);
    assert!(!driver.is_open(uid));
    assert!(!transport.is_reading(uid));
    Ok(())
}

#[test]
fn given_mixed_devices_when_enumerating_then_index_metadata_matches() -> Result<(), JoystickError> {
    let transport = MockTransport::new();
    transport.add_device(device(21, ControllerVariant::OriginalPad));
    transport.add_device(HidDeviceInfo::new(22, 0x046D, 0xC31C, DeviceType::Keyboard));
    transport.add_device(device(23, ControllerVariant::Gen3));
    let mut driver = JoystickDriver::with_clock(
        transport,
        ManualClock::new(),
        DriverConfig::default(),
    )?;
    assert_eq!(driver.init()?, 2);

    assert_eq!(driver.name(0)?, "Original Xbox Controller #1");
    assert_eq!(driver.name(1)?, "Xbox One Controller #2");
    assert_eq!(driver.player_index(1), Some(1));
    assert_eq!(driver.player_index(2), None);
    assert_eq!(driver.instance_id(1)?, 23);
    assert_eq!(driver.guid(1)?.product_id(), PRODUCT_ONE_S);
    assert_eq!(driver.name(2), Err(JoystickError::DeviceNotFound(2)));

    let session_uid = driver.open(1)?;
    let capabilities = driver.session(session_uid).map(|s| s.capabilities());
    assert_eq!(
        capabilities,
        Some(Capabilities {
            axes: 6,
            hats: 1,
            buttons: 10
        })
    );
    Ok(())
}

#[test]
fn given_two_sessions_when_update_all_then_events_tagged_per_device() -> Result<(), JoystickError>
{
    let transport = MockTransport::new();
    transport.add_device(device(1, ControllerVariant::Gen2Wired));
    transport.add_device(device(2, ControllerVariant::Gen2Wired));
    let config = DriverConfig::builder()
        .enumeration_settle(Duration::ZERO)
        .build()?;
    let mut driver = JoystickDriver::with_clock(transport.clone(), ManualClock::new(), config)?;
    driver.init()?;
    driver.open(0)?;
    driver.open(1)?;

    transport.deliver(1, &wired_report(0x1000, 0, 0));
    transport.deliver(2, &wired_report(0x2000, 0, 0));
    let mut events = Vec::new();
    assert_eq!(driver.update_all(&mut events), 2);

    events.sort_by_key(|e| e.instance_id);
    assert_eq!(
        events,
        vec![
            JoystickEvent {
                instance_id: 1,
                change: InputChange::Button {
                    index: 0,
                    pressed: true
                }
            },
            JoystickEvent {
                instance_id: 2,
                change: InputChange::Button {
                    index: 1,
                    pressed: true
                }
            },
        ]
    );
    Ok(())
}
