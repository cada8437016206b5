//! Driver entry point: initialization, enumeration, and session lifecycle.

use parking_lot::Mutex;
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use openpad_hid_common::{
    ConnectionEvent, ConnectionListener, DeviceUid, HidCommonError, HidDeviceInfo, HidTransport,
};
use openpad_hid_xbox_protocol::{ControllerVariant, JoystickGuid};

use crate::clock::{Clock, SystemClock};
use crate::config::DriverConfig;
use crate::enumerate::{self, EnumeratedDevice};
use crate::error::{JoystickError, JoystickResult};
use crate::event::EventSink;
use crate::registry::SessionRegistry;
use crate::session::DeviceSession;

/// Supported pad attached or detached since the last [`JoystickDriver::detect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotplugEvent {
    Added(DeviceUid),
    Removed(DeviceUid),
}

/// Owns the transport, the open sessions, and the delivery registry.
///
/// All methods take `&mut self`, so open, close, update and rumble are
/// serialized by the borrow checker. Only report delivery runs on the
/// transport's own context, through the [`SessionRegistry`].
pub struct JoystickDriver<T: HidTransport, C: Clock = SystemClock> {
    transport: T,
    clock: C,
    config: DriverConfig,
    core_ready: bool,
    initialized: bool,
    registry: SessionRegistry,
    sessions: BTreeMap<DeviceUid, DeviceSession>,
    hotplug: Arc<Mutex<VecDeque<ConnectionEvent>>>,
    known: HashSet<DeviceUid>,
}

impl<T: HidTransport> JoystickDriver<T, SystemClock> {
    /// Create a driver on the system clock.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn new(transport: T, config: DriverConfig) -> JoystickResult<Self> {
        Self::with_clock(transport, SystemClock, config)
    }
}

impl<T: HidTransport, C: Clock> JoystickDriver<T, C> {
    /// Create a driver with an explicit time source.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn with_clock(transport: T, clock: C, config: DriverConfig) -> JoystickResult<Self> {
        config.validate()?;
        Ok(Self {
            transport,
            clock,
            config,
            core_ready: false,
            initialized: false,
            registry: SessionRegistry::new(),
            sessions: BTreeMap::new(),
            hotplug: Arc::new(Mutex::new(VecDeque::new())),
            known: HashSet::new(),
        })
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Bring up the transport and list the attached pads. Returns the
    /// number of supported pads.
    ///
    /// The transport core is initialized once per driver; later calls after
    /// [`quit`](Self::quit) only reinstall the hot-plug listener. Calling
    /// `init` while already initialized is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport core fails to initialize.
    pub fn init(&mut self) -> JoystickResult<usize> {
        if self.initialized {
            return Ok(self.count());
        }

        if !self.core_ready {
            self.transport.init_core()?;
            self.core_ready = true;
            debug!("transport core initialized");
        }

        let queue = Arc::clone(&self.hotplug);
        let listener: ConnectionListener = Arc::new(move |event| queue.lock().push_back(event));
        self.transport.set_connection_listener(Some(listener));

        self.settle();
        self.hotplug.lock().clear();
        self.known = enumerate::enumerate(&self.transport.devices())
            .iter()
            .map(EnumeratedDevice::instance_id)
            .collect();
        self.initialized = true;

        let count = self.known.len();
        info!(count, "joystick driver initialized");
        Ok(count)
    }

    fn settle(&mut self) {
        let polls = self.config.settle_polls();
        let interval = self.config.settle_poll_interval;
        for _ in 0..polls {
            self.transport.poll_hubs();
            self.clock.sleep(interval);
        }
        if polls > 0 {
            debug!(polls, ?interval, "enumeration settled");
        }
    }

    /// Close every session and remove the hot-plug listener.
    pub fn quit(&mut self) {
        if !self.initialized {
            return;
        }
        let open: Vec<DeviceUid> = self.sessions.keys().copied().collect();
        for uid in open {
            self.close(uid);
        }
        self.transport.set_connection_listener(None);
        self.hotplug.lock().clear();
        self.known.clear();
        self.initialized = false;
        info!("joystick driver shut down");
    }

    /// Poll the transport and report supported pads attached or detached
    /// since the last call.
    ///
    /// Sessions of detached pads stay open until the application closes
    /// them; their updates simply stop seeing new reports.
    pub fn detect(&mut self) -> Vec<HotplugEvent> {
        if !self.initialized {
            return Vec::new();
        }
        self.transport.poll_hubs();
        let pending: Vec<ConnectionEvent> = self.hotplug.lock().drain(..).collect();
        if pending.is_empty() {
            return Vec::new();
        }

        let devices = self.transport.devices();
        let mut events = Vec::new();
        for event in pending {
            match event {
                ConnectionEvent::Connected(uid) => {
                    let supported = devices.iter().any(|d| {
                        d.uid == uid && ControllerVariant::from_device_type(d.device_type).is_some()
                    });
                    if supported && self.known.insert(uid) {
                        info!(uid, "gamepad attached");
                        events.push(HotplugEvent::Added(uid));
                    }
                }
                ConnectionEvent::Disconnected(uid) => {
                    if self.known.remove(&uid) {
                        info!(uid, open = self.sessions.contains_key(&uid), "gamepad detached");
                        events.push(HotplugEvent::Removed(uid));
                    }
                }
            }
        }
        events
    }

    /// Number of supported pads the transport currently knows.
    pub fn count(&self) -> usize {
        enumerate::count(&self.transport.devices())
    }

    /// All supported pads in enumeration order.
    pub fn devices(&self) -> Vec<EnumeratedDevice> {
        enumerate::enumerate(&self.transport.devices())
    }

    /// # Errors
    ///
    /// Returns [`JoystickError::DeviceNotFound`] if `index` is out of range.
    pub fn device_at(&self, index: usize) -> JoystickResult<EnumeratedDevice> {
        enumerate::nth(&self.transport.devices(), index).ok_or(JoystickError::DeviceNotFound(index))
    }

    /// # Errors
    ///
    /// Returns [`JoystickError::DeviceNotFound`] if `index` is out of range.
    pub fn name(&self, index: usize) -> JoystickResult<String> {
        self.device_at(index).map(|d| d.name())
    }

    pub fn player_index(&self, index: usize) -> Option<usize> {
        self.device_at(index).ok().map(|d| d.player_index())
    }

    /// # Errors
    ///
    /// Returns [`JoystickError::DeviceNotFound`] if `index` is out of range.
    pub fn guid(&self, index: usize) -> JoystickResult<JoystickGuid> {
        self.device_at(index).map(|d| d.guid())
    }

    /// # Errors
    ///
    /// Returns [`JoystickError::DeviceNotFound`] if `index` is out of range.
    pub fn instance_id(&self, index: usize) -> JoystickResult<DeviceUid> {
        self.device_at(index).map(|d| d.instance_id())
    }

    /// Open the pad at enumeration `index`. Returns its instance id.
    ///
    /// # Errors
    ///
    /// See [`open_device`](Self::open_device).
    pub fn open(&mut self, index: usize) -> JoystickResult<DeviceUid> {
        let uid = self.instance_id(index)?;
        self.open_device(uid)
    }

    /// Open a session on the transport device `uid`.
    ///
    /// # Errors
    ///
    /// - [`JoystickError::UnsupportedDevice`] for non-Xbox devices
    /// - [`JoystickError::AlreadyOpen`] if a session exists
    /// - [`JoystickError::SessionLimit`] if `max_devices` sessions are open
    /// - [`JoystickError::Transport`] if the transport is not initialized,
    ///   the device is unknown, or the interrupt pipe cannot be started
    pub fn open_device(&mut self, uid: DeviceUid) -> JoystickResult<DeviceUid> {
        if !self.initialized {
            return Err(HidCommonError::NotInitialized.into());
        }
        if self.sessions.contains_key(&uid) {
            return Err(JoystickError::AlreadyOpen(uid));
        }

        let info = self.find_device(uid)?;
        let variant = ControllerVariant::from_device_type(info.device_type)
            .ok_or_else(|| JoystickError::unsupported(uid, info.device_type))?;

        if self.sessions.len() >= self.config.max_devices {
            return Err(JoystickError::SessionLimit(self.config.max_devices));
        }

        let session = DeviceSession::new(info, variant);
        if !self.registry.insert(uid, Arc::clone(session.slot())) {
            return Err(JoystickError::AlreadyOpen(uid));
        }
        if let Err(err) = self
            .transport
            .start_interrupt_read(uid, self.registry.report_callback())
        {
            self.registry.remove(uid);
            return Err(err.into());
        }

        info!(uid, %variant, name = %session.info().display_name(), "session opened");
        self.sessions.insert(uid, session);
        Ok(uid)
    }

    fn find_device(&self, uid: DeviceUid) -> JoystickResult<HidDeviceInfo> {
        self.transport
            .devices()
            .into_iter()
            .find(|d| d.uid == uid)
            .ok_or_else(|| HidCommonError::DeviceNotFound(uid).into())
    }

    /// Close the session for `uid`. Does nothing if none is open.
    ///
    /// Sends a motors-off command first when `close_stops_rumble` is set.
    /// The device stays known to the transport and can be reopened.
    pub fn close(&mut self, uid: DeviceUid) {
        let Some(mut session) = self.sessions.remove(&uid) else {
            return;
        };
        if self.config.close_stops_rumble {
            session.stop_rumble(&mut self.transport);
        }
        if let Err(err) = self.transport.stop_interrupt_read(uid) {
            warn!(uid, %err, "failed to stop interrupt read");
        }
        self.registry.remove(uid);
        info!(uid, "session closed");
    }

    pub fn is_open(&self, uid: DeviceUid) -> bool {
        self.sessions.contains_key(&uid)
    }

    pub fn open_sessions(&self) -> usize {
        self.sessions.len()
    }

    pub fn session(&self, uid: DeviceUid) -> Option<&DeviceSession> {
        self.sessions.get(&uid)
    }

    /// Run one polling tick for `uid`. Returns the number of events emitted;
    /// zero if no session is open.
    pub fn update<S: EventSink + ?Sized>(&mut self, uid: DeviceUid, sink: &mut S) -> usize {
        let now = self.clock.now();
        match self.sessions.get_mut(&uid) {
            Some(session) => session.update(&mut self.transport, now, sink),
            None => 0,
        }
    }

    /// Run one polling tick for every open session.
    pub fn update_all<S: EventSink + ?Sized>(&mut self, sink: &mut S) -> usize {
        let now = self.clock.now();
        let transport = &mut self.transport;
        self.sessions
            .values_mut()
            .map(|session| session.update(&mut *transport, now, &mut *sink))
            .sum()
    }

    /// Run the motors at `low`/`high` for `duration`.
    ///
    /// # Errors
    ///
    /// Returns [`JoystickError::NotOpen`] if no session is open, or the
    /// transport's write error.
    pub fn rumble(
        &mut self,
        uid: DeviceUid,
        low: u16,
        high: u16,
        duration: Duration,
    ) -> JoystickResult<()> {
        let now = self.clock.now();
        let session = self
            .sessions
            .get_mut(&uid)
            .ok_or(JoystickError::NotOpen(uid))?;
        session.rumble(&mut self.transport, now, low, high, duration)
    }
}

impl<T: HidTransport, C: Clock> std::fmt::Debug for JoystickDriver<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JoystickDriver")
            .field("config", &self.config)
            .field("initialized", &self.initialized)
            .field("sessions", &self.sessions.len())
            .field("known", &self.known.len())
            .finish()
    }
}
