//! Driver configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{JoystickError, JoystickResult};

/// Driver configuration.
///
/// Missing JSON fields take their [`Default`] values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Hub-polling window during `init` so already-attached pads are listed.
    pub enumeration_settle: Duration,
    /// Delay between hub polls inside the settle window.
    pub settle_poll_interval: Duration,
    /// Maximum number of concurrently open sessions.
    pub max_devices: usize,
    /// Send a motors-off command when a session closes.
    pub close_stops_rumble: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            enumeration_settle: Duration::from_millis(500),
            settle_poll_interval: Duration::from_millis(1),
            max_devices: 4,
            close_stops_rumble: true,
        }
    }
}

impl DriverConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> JoystickResult<()> {
        if self.max_devices == 0 {
            return Err(JoystickError::invalid_configuration(
                "max_devices must be greater than 0",
            ));
        }
        if !self.enumeration_settle.is_zero() && self.settle_poll_interval.is_zero() {
            return Err(JoystickError::invalid_configuration(
                "settle_poll_interval must be greater than 0 when enumeration_settle is set",
            ));
        }
        if self.settle_poll_interval > self.enumeration_settle && !self.enumeration_settle.is_zero()
        {
            return Err(JoystickError::invalid_configuration(
                "settle_poll_interval must not exceed enumeration_settle",
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the values are invalid.
    pub fn from_json_str(json: &str) -> JoystickResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| JoystickError::invalid_configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Number of hub polls performed during the settle window.
    pub fn settle_polls(&self) -> u32 {
        if self.enumeration_settle.is_zero() || self.settle_poll_interval.is_zero() {
            return 0;
        }
        let polls = self.enumeration_settle.as_nanos() / self.settle_poll_interval.as_nanos();
        u32::try_from(polls).unwrap_or(u32::MAX)
    }

    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> DriverConfigBuilder {
        DriverConfigBuilder::default()
    }
}

/// Builder for `DriverConfig`.
#[derive(Debug, Default)]
pub struct DriverConfigBuilder {
    config: DriverConfig,
}

impl DriverConfigBuilder {
    /// Set the hub-polling window used by `init`.
    #[must_use]
    pub fn enumeration_settle(mut self, settle: Duration) -> Self {
        self.config.enumeration_settle = settle;
        self
    }

    /// Set the delay between hub polls.
    #[must_use]
    pub fn settle_poll_interval(mut self, interval: Duration) -> Self {
        self.config.settle_poll_interval = interval;
        self
    }

    /// Set the maximum number of open sessions.
    #[must_use]
    pub fn max_devices(mut self, max: usize) -> Self {
        self.config.max_devices = max;
        self
    }

    /// Enable or disable the motors-off command on close.
    #[must_use]
    pub fn close_stops_rumble(mut self, enabled: bool) -> Self {
        self.config.close_stops_rumble = enabled;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> JoystickResult<DriverConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
