//! Device id to report slot map used by the transport's completion context.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

use openpad_hid_common::{DeviceUid, ReportCallback, TransferStatus};

use crate::session::ReportSlot;

/// Routes interrupt deliveries to open sessions by device id.
///
/// Clones share the same map. The driver keeps one handle and every
/// [`ReportCallback`] handed to the transport holds another, so the
/// transport never stores a pointer back into a session.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    slots: Arc<RwLock<HashMap<DeviceUid, Arc<ReportSlot>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a slot. Returns `false` and leaves the map unchanged if
    /// `uid` is already registered.
    pub fn insert(&self, uid: DeviceUid, slot: Arc<ReportSlot>) -> bool {
        let mut slots = self.slots.write();
        if slots.contains_key(&uid) {
            return false;
        }
        slots.insert(uid, slot);
        true
    }

    pub fn remove(&self, uid: DeviceUid) -> Option<Arc<ReportSlot>> {
        self.slots.write().remove(&uid)
    }

    pub fn contains(&self, uid: DeviceUid) -> bool {
        self.slots.read().contains_key(&uid)
    }

    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }

    /// Hand one delivery to the slot registered for `uid`. Returns `false`
    /// when there is no such slot or the slot dropped the delivery.
    pub fn deliver(&self, uid: DeviceUid, status: TransferStatus, data: &[u8]) -> bool {
        let slot = self.slots.read().get(&uid).cloned();
        match slot {
            Some(slot) => slot.report_arrived(status, data),
            None => {
                trace!(uid, "delivery for closed session");
                false
            }
        }
    }

    /// Callback to register with `HidTransport::start_interrupt_read`.
    pub fn report_callback(&self) -> ReportCallback {
        let registry = self.clone();
        Arc::new(move |uid: DeviceUid, status: TransferStatus, data: &[u8]| {
            registry.deliver(uid, status, data);
        })
    }
}
