//! Time source for rumble expiry and the enumeration settle loop.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic time source.
pub trait Clock: Send {
    fn now(&self) -> Instant;

    /// Block for `duration`. Only used by the settle loop in `init`.
    fn sleep(&self, duration: Duration);
}

/// Wall-clock time via [`Instant::now`] and [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Manually advanced clock for tests and capture replay.
///
/// `sleep` advances the clock instead of blocking. Clones share the same
/// time, so a test can keep a handle while the driver owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.lock();
        if let Some(next) = now.checked_add(duration) {
            *now = next;
        }
    }

    /// Move the clock to `instant` if it is later than the current time.
    pub fn advance_to(&self, instant: Instant) {
        let mut now = self.now.lock();
        if instant > *now {
            *now = instant;
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}
