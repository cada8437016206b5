//! HID transport traits

use crate::{DeviceUid, HidCommonResult, HidDeviceInfo};
use std::sync::Arc;

/// Completion status of one interrupt IN transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStatus {
    Completed,
    /// Host stack error code (negative in most stacks).
    Failed(i32),
}

impl TransferStatus {
    pub fn is_ok(self) -> bool {
        matches!(self, TransferStatus::Completed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionEvent {
    Connected(DeviceUid),
    Disconnected(DeviceUid),
}

/// Invoked from the transport's completion context for every interrupt IN
/// transfer on a pipe started with [`HidTransport::start_interrupt_read`].
pub type ReportCallback = Arc<dyn Fn(DeviceUid, TransferStatus, &[u8]) + Send + Sync>;

/// Invoked from the transport's context when a device attaches or detaches.
pub type ConnectionListener = Arc<dyn Fn(ConnectionEvent) + Send + Sync>;

/// Host-side USB HID stack as seen by the joystick core.
///
/// Implementations own device lifetimes. The core only refers to devices by
/// [`DeviceUid`] and never stores pointers into transport state.
pub trait HidTransport: Send {
    /// Bring up the host controller and HID class driver.
    fn init_core(&mut self) -> HidCommonResult<()>;

    /// Service hub ports: enumeration, resets, hot-plug detection.
    fn poll_hubs(&mut self);

    /// Every device currently attached, in the stack's own list order.
    fn devices(&self) -> Vec<HidDeviceInfo>;

    fn start_interrupt_read(
        &mut self,
        uid: DeviceUid,
        callback: ReportCallback,
    ) -> HidCommonResult<()>;

    /// Stop reading the interrupt pipe. The device stays attached.
    fn stop_interrupt_read(&mut self, uid: DeviceUid) -> HidCommonResult<()>;

    /// Queue an interrupt OUT transfer. Completion is not awaited.
    fn write_interrupt(&mut self, uid: DeviceUid, data: &[u8]) -> HidCommonResult<usize>;

    fn set_connection_listener(&mut self, listener: Option<ConnectionListener>);
}

pub mod mock {
    use super::*;
    use crate::HidCommonError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockState {
        init_calls: u32,
        hub_polls: u32,
        devices: Vec<HidDeviceInfo>,
        readers: HashMap<DeviceUid, ReportCallback>,
        write_history: Vec<(DeviceUid, Vec<u8>)>,
        fail_writes: bool,
        listener: Option<ConnectionListener>,
    }

    /// In-memory transport. Clones share state, so a test can keep one
    /// handle for injection and inspection while the driver owns another.
    #[derive(Clone, Default)]
    pub struct MockTransport {
        state: Arc<Mutex<MockState>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        fn with_state<R>(&self, f: impl FnOnce(&mut MockState) -> R) -> R {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            f(&mut state)
        }

        /// Attach a device and notify the connection listener, if any.
        pub fn add_device(&self, info: HidDeviceInfo) {
            let uid = info.uid;
            let listener = self.with_state(|s| {
                s.devices.retain(|d| d.uid != uid);
                s.devices.push(info);
                s.listener.clone()
            });
            if let Some(listener) = listener {
                listener(ConnectionEvent::Connected(uid));
            }
        }

        /// Detach a device, dropping its interrupt pipe.
        pub fn remove_device(&self, uid: DeviceUid) {
            let (removed, listener) = self.with_state(|s| {
                let before = s.devices.len();
                s.devices.retain(|d| d.uid != uid);
                s.readers.remove(&uid);
                (before != s.devices.len(), s.listener.clone())
            });
            if let (true, Some(listener)) = (removed, listener) {
                listener(ConnectionEvent::Disconnected(uid));
            }
        }

        /// Complete one interrupt IN transfer. Returns `false` when no pipe
        /// is being read for `uid`.
        pub fn deliver(&self, uid: DeviceUid, data: &[u8]) -> bool {
            self.deliver_with_status(uid, TransferStatus::Completed, data)
        }

        pub fn deliver_with_status(
            &self,
            uid: DeviceUid,
            status: TransferStatus,
            data: &[u8],
        ) -> bool {
            // The lock is released before the callback runs.
            let callback = self.with_state(|s| s.readers.get(&uid).cloned());
            match callback {
                Some(callback) => {
                    callback(uid, status, data);
                    true
                }
                None => false,
            }
        }

        pub fn writes(&self) -> Vec<(DeviceUid, Vec<u8>)> {
            self.with_state(|s| s.write_history.clone())
        }

        pub fn writes_for(&self, uid: DeviceUid) -> Vec<Vec<u8>> {
            self.with_state(|s| {
                s.write_history
                    .iter()
                    .filter(|(u, _)| *u == uid)
                    .map(|(_, data)| data.clone())
                    .collect()
            })
        }

        pub fn clear_writes(&self) {
            self.with_state(|s| s.write_history.clear());
        }

        pub fn set_fail_writes(&self, fail: bool) {
            self.with_state(|s| s.fail_writes = fail);
        }

        pub fn is_reading(&self, uid: DeviceUid) -> bool {
            self.with_state(|s| s.readers.contains_key(&uid))
        }

        pub fn init_calls(&self) -> u32 {
            self.with_state(|s| s.init_calls)
        }

        pub fn hub_polls(&self) -> u32 {
            self.with_state(|s| s.hub_polls)
        }

        pub fn has_connection_listener(&self) -> bool {
            self.with_state(|s| s.listener.is_some())
        }
    }

    impl HidTransport for MockTransport {
        fn init_core(&mut self) -> HidCommonResult<()> {
            self.with_state(|s| s.init_calls += 1);
            Ok(())
        }

        fn poll_hubs(&mut self) {
            self.with_state(|s| s.hub_polls += 1);
        }

        fn devices(&self) -> Vec<HidDeviceInfo> {
            self.with_state(|s| s.devices.clone())
        }

        fn start_interrupt_read(
            &mut self,
            uid: DeviceUid,
            callback: ReportCallback,
        ) -> HidCommonResult<()> {
            self.with_state(|s| {
                if !s.devices.iter().any(|d| d.uid == uid) {
                    return Err(HidCommonError::DeviceNotFound(uid));
                }
                s.readers.insert(uid, callback);
                Ok(())
            })
        }

        fn stop_interrupt_read(&mut self, uid: DeviceUid) -> HidCommonResult<()> {
            self.with_state(|s| {
                s.readers.remove(&uid);
            });
            Ok(())
        }

        fn write_interrupt(&mut self, uid: DeviceUid, data: &[u8]) -> HidCommonResult<usize> {
            self.with_state(|s| {
                if !s.devices.iter().any(|d| d.uid == uid) {
                    return Err(HidCommonError::Disconnected(uid));
                }
                if s.fail_writes {
                    return Err(HidCommonError::write_error(uid, "injected failure"));
                }
                s.write_history.push((uid, data.to_vec()));
                tracing::trace!(uid, len = data.len(), "mock interrupt write");
                Ok(data.len())
            })
        }

        fn set_connection_listener(&mut self, listener: Option<ConnectionListener>) {
            self.with_state(|s| s.listener = listener);
        }
    }
}
