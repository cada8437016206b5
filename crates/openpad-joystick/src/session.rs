//! One open controller: raw report slot, previous state, rumble timer.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

use openpad_hid_common::{DeviceUid, HidDeviceInfo, HidTransport, TransferStatus};
use openpad_hid_xbox_protocol::{
    ControllerVariant, GamepadState, MAX_PACKET_SIZE, check_frame, decode, encode_rumble,
    encode_stop,
};

use crate::actuator::ActuatorState;
use crate::differ::{HAT_CENTERED, NUM_AXES, NUM_BUTTONS, NUM_HATS, diff};
use crate::error::JoystickResult;
use crate::event::{EventSink, JoystickEvent};

/// Control counts every session exposes, whatever its variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub axes: usize,
    pub hats: usize,
    pub buttons: usize,
}

pub const GAMEPAD_CAPABILITIES: Capabilities = Capabilities {
    axes: NUM_AXES,
    hats: NUM_HATS,
    buttons: NUM_BUTTONS,
};

/// Latest interrupt data for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawReport {
    bytes: [u8; MAX_PACKET_SIZE],
    deliveries: u64,
}

impl Default for RawReport {
    fn default() -> Self {
        Self {
            bytes: [0u8; MAX_PACKET_SIZE],
            deliveries: 0,
        }
    }
}

impl RawReport {
    /// Copy `data` over the front of the buffer. Bytes past `data.len()`
    /// keep their previous contents; input past capacity is dropped.
    pub fn overwrite(&mut self, data: &[u8]) {
        let len = data.len().min(MAX_PACKET_SIZE);
        self.bytes[..len].copy_from_slice(&data[..len]);
        self.deliveries = self.deliveries.wrapping_add(1);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of accepted deliveries so far.
    pub fn deliveries(&self) -> u64 {
        self.deliveries
    }
}

/// Shared between a session and the delivery registry. The transport's
/// completion context writes through [`ReportSlot::report_arrived`] while
/// the owning thread reads through [`ReportSlot::snapshot`].
#[derive(Debug)]
pub struct ReportSlot {
    variant: ControllerVariant,
    raw: Mutex<RawReport>,
}

impl ReportSlot {
    pub fn new(variant: ControllerVariant) -> Self {
        Self {
            variant,
            raw: Mutex::new(RawReport::default()),
        }
    }

    pub fn variant(&self) -> ControllerVariant {
        self.variant
    }

    /// Store one interrupt delivery. Returns `false` when it was dropped.
    ///
    /// Failed transfers and buffers that are not input reports for this
    /// variant are dropped without touching the stored report.
    pub fn report_arrived(&self, status: TransferStatus, data: &[u8]) -> bool {
        if !status.is_ok() {
            trace!(?status, "dropping failed interrupt transfer");
            return false;
        }
        if let Err(err) = check_frame(self.variant, data) {
            trace!(%err, "dropping delivery");
            return false;
        }
        self.raw.lock().overwrite(data);
        true
    }

    pub fn snapshot(&self) -> RawReport {
        *self.raw.lock()
    }
}

/// An open controller.
#[derive(Debug)]
pub struct DeviceSession {
    info: HidDeviceInfo,
    variant: ControllerVariant,
    slot: Arc<ReportSlot>,
    previous: GamepadState,
    hat: u8,
    actuator: ActuatorState,
}

impl DeviceSession {
    pub fn new(info: HidDeviceInfo, variant: ControllerVariant) -> Self {
        Self {
            info,
            variant,
            slot: Arc::new(ReportSlot::new(variant)),
            previous: GamepadState::NEUTRAL,
            hat: HAT_CENTERED,
            actuator: ActuatorState::default(),
        }
    }

    pub fn uid(&self) -> DeviceUid {
        self.info.uid
    }

    pub fn info(&self) -> &HidDeviceInfo {
        &self.info
    }

    pub fn variant(&self) -> ControllerVariant {
        self.variant
    }

    pub fn capabilities(&self) -> Capabilities {
        GAMEPAD_CAPABILITIES
    }

    pub fn slot(&self) -> &Arc<ReportSlot> {
        &self.slot
    }

    pub fn previous_state(&self) -> &GamepadState {
        &self.previous
    }

    pub fn hat(&self) -> u8 {
        self.hat
    }

    pub fn actuator(&self) -> &ActuatorState {
        &self.actuator
    }

    /// Decode the latest report, emit changes into `sink`, then stop the
    /// motors if their expiry has passed. Returns the number of events
    /// emitted.
    ///
    /// A stored buffer that does not decode emits nothing and keeps the
    /// previous state.
    pub fn update<T, S>(&mut self, transport: &mut T, now: Instant, sink: &mut S) -> usize
    where
        T: HidTransport + ?Sized,
        S: EventSink + ?Sized,
    {
        let raw = self.slot.snapshot();
        let mut emitted = 0usize;

        match decode(self.variant, raw.as_bytes()) {
            Ok(current) => {
                let instance_id = self.info.uid;
                self.hat = diff(&self.previous, self.hat, &current, |change| {
                    trace!(instance_id, %change, "input change");
                    sink.push_event(JoystickEvent {
                        instance_id,
                        change,
                    });
                    emitted += 1;
                });
                self.previous = current;
            }
            Err(err) => trace!(uid = self.info.uid, %err, "stored report not decodable"),
        }

        if self.actuator.is_expired(now) {
            self.expire(transport);
        }

        emitted
    }

    fn expire<T: HidTransport + ?Sized>(&mut self, transport: &mut T) {
        let uid = self.info.uid;
        debug!(uid, "rumble expired");
        if let Err(err) = transport.write_interrupt(uid, encode_stop(self.variant).as_bytes()) {
            warn!(uid, %err, "failed to stop rumble after expiry");
        }
        self.actuator.clear();
    }

    /// Start, change or extend rumble.
    ///
    /// Repeating the active pair only resets the expiry and writes nothing.
    /// On a write error the actuator state is left unchanged.
    pub fn rumble<T: HidTransport + ?Sized>(
        &mut self,
        transport: &mut T,
        now: Instant,
        low: u16,
        high: u16,
        duration: Duration,
    ) -> JoystickResult<()> {
        let uid = self.info.uid;
        if self.actuator.is_active_pair(low, high) {
            self.actuator.schedule(now, duration);
            trace!(uid, low, high, ?duration, "rumble extended");
            return Ok(());
        }

        let command = encode_rumble(self.variant, low, high);
        transport.write_interrupt(uid, command.as_bytes())?;
        self.actuator.set(low, high, now, duration);
        debug!(uid, low, high, ?duration, len = command.len(), "rumble written");
        Ok(())
    }

    /// Best-effort motors-off used on close. Errors are logged and ignored.
    pub fn stop_rumble<T: HidTransport + ?Sized>(&mut self, transport: &mut T) {
        let uid = self.info.uid;
        if let Err(err) = transport.write_interrupt(uid, encode_stop(self.variant).as_bytes()) {
            warn!(uid, %err, "failed to stop rumble on close");
        }
        self.actuator.clear();
    }
}
