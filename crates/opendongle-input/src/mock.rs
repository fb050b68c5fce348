//! Recording input device for tests and dry runs.
//!
//! [`RecordingInputDevice`] keeps everything it is told in shared state.
//! A cloned [`RecordingHandle`] stays usable after the device has been
//! boxed and handed to a controller session, so tests can inspect what the
//! session registered and reported, and play feedback back into it.

use std::collections::BTreeMap;
use std::sync::Arc;

use opendongle_errors::InputError;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::trace;

use crate::codes::{Axis, FeedbackKind, Key};
use crate::device::{AxisConfig, DeviceIdentity, FeedbackHandler, InputDevice};
use crate::effect::FfEffect;

/// Key and axis state at the time of one `report()` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InputReport {
    pub keys: BTreeMap<Key, bool>,
    pub axes: BTreeMap<Axis, i32>,
}

impl InputReport {
    pub fn key(&self, key: Key) -> Option<bool> {
        self.keys.get(&key).copied()
    }

    pub fn axis(&self, axis: Axis) -> Option<i32> {
        self.axes.get(&axis).copied()
    }
}

#[derive(Default)]
struct RecordingState {
    keys: Vec<Key>,
    axes: Vec<(Axis, AxisConfig)>,
    feedback: Vec<FeedbackKind>,
    identity: Option<DeviceIdentity>,
    handler: Option<Arc<dyn FeedbackHandler>>,
    staged: InputReport,
    reports: Vec<InputReport>,
    fail_create: bool,
}

/// Inspection handle shared with a [`RecordingInputDevice`].
#[derive(Clone, Default)]
pub struct RecordingHandle {
    state: Arc<Mutex<RecordingState>>,
}

impl RecordingHandle {
    pub fn keys(&self) -> Vec<Key> {
        self.state.lock().keys.clone()
    }

    pub fn axes(&self) -> Vec<(Axis, AxisConfig)> {
        self.state.lock().axes.clone()
    }

    pub fn feedback(&self) -> Vec<FeedbackKind> {
        self.state.lock().feedback.clone()
    }

    /// Identity passed to `create`, `None` until the device exists.
    pub fn identity(&self) -> Option<DeviceIdentity> {
        self.state.lock().identity.clone()
    }

    pub fn is_created(&self) -> bool {
        self.state.lock().identity.is_some()
    }

    pub fn reports(&self) -> Vec<InputReport> {
        self.state.lock().reports.clone()
    }

    pub fn last_report(&self) -> Option<InputReport> {
        self.state.lock().reports.last().cloned()
    }

    /// Make the next `create` call fail.
    pub fn fail_create(&self, fail: bool) {
        self.state.lock().fail_create = fail;
    }

    /// Deliver a feedback upload the way a real device thread would.
    ///
    /// Returns `false` when the device has not been created yet.
    pub fn trigger_feedback(&self, effect: &FfEffect, gain: u16) -> bool {
        // Clone out of the lock so the handler may call back into the device.
        let handler = self.state.lock().handler.clone();
        match handler {
            Some(handler) => {
                handler.feedback_received(effect, gain);
                true
            }
            None => false,
        }
    }
}

/// An [`InputDevice`] that records instead of emitting events.
#[derive(Default)]
pub struct RecordingInputDevice {
    handle: RecordingHandle,
}

impl RecordingInputDevice {
    /// Device plus a handle onto its recorded state.
    pub fn new() -> (Self, RecordingHandle) {
        let device = Self::default();
        let handle = device.handle.clone();
        (device, handle)
    }

    pub fn handle(&self) -> RecordingHandle {
        self.handle.clone()
    }
}

impl InputDevice for RecordingInputDevice {
    fn add_key(&mut self, key: Key) -> Result<(), InputError> {
        let mut state = self.handle.state.lock();
        if state.identity.is_some() {
            return Err(InputError::AlreadyCreated);
        }
        state.keys.push(key);
        Ok(())
    }

    fn add_axis(&mut self, axis: Axis, config: AxisConfig) -> Result<(), InputError> {
        let mut state = self.handle.state.lock();
        if state.identity.is_some() {
            return Err(InputError::AlreadyCreated);
        }
        state.axes.push((axis, config));
        Ok(())
    }

    fn add_feedback(&mut self, kind: FeedbackKind) -> Result<(), InputError> {
        let mut state = self.handle.state.lock();
        if state.identity.is_some() {
            return Err(InputError::AlreadyCreated);
        }
        state.feedback.push(kind);
        Ok(())
    }

    fn create(
        &mut self,
        identity: DeviceIdentity,
        handler: Arc<dyn FeedbackHandler>,
    ) -> Result<(), InputError> {
        let mut state = self.handle.state.lock();
        if state.fail_create {
            return Err(InputError::CreateFailed("creation disabled".into()));
        }
        if state.identity.is_some() {
            return Err(InputError::AlreadyCreated);
        }
        trace!(name = %identity.name, vendor_id = identity.vendor_id, product_id = identity.product_id, "recording device created");
        state.identity = Some(identity);
        state.handler = Some(handler);
        Ok(())
    }

    fn set_key(&mut self, key: Key, pressed: bool) {
        self.handle.state.lock().staged.keys.insert(key, pressed);
    }

    fn set_axis(&mut self, axis: Axis, value: i32) {
        self.handle.state.lock().staged.axes.insert(axis, value);
    }

    fn report(&mut self) -> Result<(), InputError> {
        let mut state = self.handle.state.lock();
        let snapshot = state.staged.clone();
        state.reports.push(snapshot);
        Ok(())
    }
}
