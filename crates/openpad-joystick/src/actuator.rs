//! Rumble intensity and expiry tracking for one session.

use std::time::{Duration, Instant};

/// Last intensities written to the pad and when they stop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActuatorState {
    pub low: u16,
    pub high: u16,
    /// `None` when no stop is scheduled.
    pub expiry: Option<Instant>,
}

impl ActuatorState {
    pub fn is_active_pair(&self, low: u16, high: u16) -> bool {
        self.low == low && self.high == high
    }

    /// Strictly later than the expiry instant.
    pub fn is_expired(&self, now: Instant) -> bool {
        matches!(self.expiry, Some(expiry) if now > expiry)
    }

    /// Reset the expiry to `now + duration`.
    ///
    /// A duration too large to represent leaves the motors running until
    /// the next explicit command.
    pub fn schedule(&mut self, now: Instant, duration: Duration) {
        self.expiry = now.checked_add(duration);
    }

    /// Record a completed write.
    pub fn set(&mut self, low: u16, high: u16, now: Instant, duration: Duration) {
        self.low = low;
        self.high = high;
        self.schedule(now, duration);
    }

    /// Forget the intensities and the pending expiry.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
