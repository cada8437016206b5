//! Capture replay through a real driver session.
//!
//! The capture's device is registered on a [`MockTransport`], opened through
//! [`JoystickDriver`] and fed one report at a time. A [`ManualClock`] is moved
//! to each report's timestamp before `update` runs, so rumble expiry behaves
//! the way it did during the recording.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use openpad_hid_common::mock::MockTransport;
use openpad_hid_common::{DeviceUid, HidDeviceInfo};
use openpad_joystick::prelude::*;

use crate::capture::CaptureFile;
use crate::hex::format_hex;

/// Device id the replayed controller is registered under.
pub const REPLAY_UID: DeviceUid = 1;

/// Result of feeding one captured report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayStep {
    pub timestamp_us: u64,
    pub len: usize,
    /// The session stored the report. Short or mis-tagged frames are dropped.
    pub accepted: bool,
    pub events: Vec<JoystickEvent>,
    /// Output reports written while handling this step, as capture-style hex.
    pub writes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayOutcome {
    pub variant: ControllerVariant,
    pub name: String,
    pub steps: Vec<ReplayStep>,
}

impl ReplayOutcome {
    pub fn event_count(&self) -> usize {
        self.steps.iter().map(|step| step.events.len()).sum()
    }

    pub fn dropped(&self) -> usize {
        self.steps.iter().filter(|step| !step.accepted).count()
    }

    /// Human-readable listing, one line per event, write or dropped report.
    pub fn render_text(&self) -> String {
        let mut out = format!(
            "replaying {} reports from {} ({})\n",
            self.steps.len(),
            self.name,
            self.variant
        );
        for step in &self.steps {
            let at = step.timestamp_us;
            if !step.accepted {
                out.push_str(&format!("+{at}us dropped report ({} bytes)\n", step.len));
            }
            for event in &step.events {
                out.push_str(&format!("+{at}us {event}\n"));
            }
            for write in &step.writes {
                out.push_str(&format!("+{at}us write {write}\n"));
            }
        }
        out.push_str(&format!(
            "{} reports, {} dropped, {} events\n",
            self.steps.len(),
            self.dropped(),
            self.event_count()
        ));
        out
    }
}

/// Replay `capture` with `config` and collect what the session produced.
///
/// Timestamps are taken relative to the first capture.
///
/// # Errors
///
/// Fails if the capture's device cannot be resolved or opened, a report's
/// hex is malformed, or a rumble request cannot be written.
pub fn replay(capture: &CaptureFile, config: DriverConfig) -> Result<ReplayOutcome> {
    let variant = capture.variant()?;
    let (vendor_id, product_id) = capture.ids()?;

    let transport = MockTransport::new();
    transport.add_device(HidDeviceInfo::new(
        REPLAY_UID,
        vendor_id,
        product_id,
        variant.device_type(),
    ));
    let clock = ManualClock::new();
    let mut driver = JoystickDriver::with_clock(transport.clone(), clock.clone(), config)?;
    driver.init().context("driver init failed")?;
    let name = driver.name(0)?;
    let uid = driver.open(0).context("failed to open replay device")?;
    info!(uid, %variant, reports = capture.captures.len(), "replay started");

    let start = clock.now();
    let base_us = capture.captures.first().map_or(0, |c| c.timestamp_us);
    let mut steps = Vec::with_capacity(capture.captures.len());

    for report in &capture.captures {
        let bytes = report.bytes()?;
        let offset = Duration::from_micros(report.timestamp_us.saturating_sub(base_us));
        if let Some(at) = start.checked_add(offset) {
            clock.advance_to(at);
        }
        transport.clear_writes();

        let before = deliveries(&driver, uid);
        transport.deliver(uid, &bytes);
        let accepted = deliveries(&driver, uid) > before;

        let mut events = Vec::new();
        driver.update(uid, &mut events);

        if let Some(step) = report.rumble {
            driver
                .rumble(
                    uid,
                    step.low,
                    step.high,
                    Duration::from_millis(step.duration_ms),
                )
                .with_context(|| format!("rumble at {}us", report.timestamp_us))?;
        }

        let writes = transport
            .writes_for(uid)
            .iter()
            .map(|w| format_hex(w))
            .collect();
        debug!(
            timestamp_us = report.timestamp_us,
            accepted,
            events = events.len(),
            "replayed report"
        );
        steps.push(ReplayStep {
            timestamp_us: report.timestamp_us,
            len: bytes.len(),
            accepted,
            events,
            writes,
        });
    }

    driver.close(uid);
    driver.quit();

    Ok(ReplayOutcome {
        variant,
        name,
        steps,
    })
}

fn deliveries(driver: &JoystickDriver<MockTransport, ManualClock>, uid: DeviceUid) -> u64 {
    driver
        .session(uid)
        .map_or(0, |session| session.slot().snapshot().deliveries())
}

// ── BDD-style scenario tests ────────────────────────────────────────────────
