//! Change events delivered to the application.

use core::fmt;

use openpad_hid_common::DeviceUid;
use serde::{Deserialize, Serialize};

/// One discrete input change produced by the differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputChange {
    Button { index: u8, pressed: bool },
    Axis { index: u8, value: i16 },
    Hat { value: u8 },
}

impl fmt::Display for InputChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputChange::Button { index, pressed } => {
                let state = if *pressed { "pressed" } else { "released" };
                write!(f, "button {index} {state}")
            }
            InputChange::Axis { index, value } => write!(f, "axis {index} = {value}"),
            InputChange::Hat { value } => write!(f, "hat = {value:#x}"),
        }
    }
}

/// An [`InputChange`] tagged with the instance id of the session that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JoystickEvent {
    pub instance_id: DeviceUid,
    pub change: InputChange,
}

impl fmt::Display for JoystickEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.instance_id, self.change)
    }
}

/// Receiver for events emitted by `update`.
pub trait EventSink {
    fn push_event(&mut self, event: JoystickEvent);
}

impl EventSink for Vec<JoystickEvent> {
    fn push_event(&mut self, event: JoystickEvent) {
        self.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn push_event(&mut self, event: JoystickEvent) {
        (**self).push_event(event);
    }
}

/// Sink that only counts events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountingSink {
    pub buttons: usize,
    pub axes: usize,
    pub hats: usize,
}

impl CountingSink {
    pub fn total(&self) -> usize {
        self.buttons + self.axes + self.hats
    }
}

impl EventSink for CountingSink {
    fn push_event(&mut self, event: JoystickEvent) {
        match event.change {
            InputChange::Button { .. } => self.buttons += 1,
            InputChange::Axis { .. } => self.axes += 1,
            InputChange::Hat { .. } => self.hats += 1,
        }
    }
}
