//! Virtual input devices that log instead of talking to uinput.

use std::collections::HashMap;
use std::sync::Arc;

use opendongle_dongle::InputDeviceFactory;
use opendongle_errors::InputError;
use opendongle_input::{
    Axis, AxisConfig, DeviceIdentity, FeedbackHandler, FeedbackKind, FfEffect, InputDevice,
    InputReport, Key,
};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info};

/// One `report()` call from a client's device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceReport {
    pub wcid: u8,
    #[serde(flatten)]
    pub report: InputReport,
}

#[derive(Default)]
struct HubState {
    reports: Vec<DeviceReport>,
    handlers: HashMap<u8, Arc<dyn FeedbackHandler>>,
}

/// Factory for [`LoggingInputDevice`]s; collects their reports and keeps
/// each client's feedback handler so feedback events can be played back.
#[derive(Clone, Default)]
pub struct DeviceHub {
    state: Arc<Mutex<HubState>>,
}

impl DeviceHub {
    /// Reports collected since the last call.
    pub fn take_reports(&self) -> Vec<DeviceReport> {
        std::mem::take(&mut self.state.lock().reports)
    }

    /// Deliver an effect to the client's feedback handler, if its device
    /// has been created.
    pub fn play_feedback(&self, wcid: u8, effect: &FfEffect, gain: u16) -> bool {
        let handler = self.state.lock().handlers.get(&wcid).cloned();
        match handler {
            Some(handler) => {
                handler.feedback_received(effect, gain);
                true
            }
            None => false,
        }
    }
}

impl InputDeviceFactory for DeviceHub {
    fn create_device(&self, wcid: u8) -> Box<dyn InputDevice> {
        // a new session replaces any handler left by the previous one
        self.state.lock().handlers.remove(&wcid);
        Box::new(LoggingInputDevice {
            wcid,
            hub: self.clone(),
            capabilities: 0,
            staged: InputReport::default(),
            created: false,
        })
    }
}

pub struct LoggingInputDevice {
    wcid: u8,
    hub: DeviceHub,
    capabilities: usize,
    staged: InputReport,
    created: bool,
}

impl LoggingInputDevice {
    fn check_not_created(&self) -> Result<(), InputError> {
        if self.created {
            return Err(InputError::AlreadyCreated);
        }
        Ok(())
    }
}

impl InputDevice for LoggingInputDevice {
    fn add_key(&mut self, key: Key) -> Result<(), InputError> {
        self.check_not_created()?;
        self.capabilities += 1;
        self.staged.keys.insert(key, false);
        Ok(())
    }

    fn add_axis(&mut self, axis: Axis, config: AxisConfig) -> Result<(), InputError> {
        self.check_not_created()?;
        self.capabilities += 1;
        self.staged.axes.insert(axis, 0);
        debug!(wcid = self.wcid, ?axis, min = config.minimum, max = config.maximum, "Axis");
        Ok(())
    }

    fn add_feedback(&mut self, kind: FeedbackKind) -> Result<(), InputError> {
        self.check_not_created()?;
        self.capabilities += 1;
        debug!(wcid = self.wcid, ?kind, "Feedback");
        Ok(())
    }

    fn create(
        &mut self,
        identity: DeviceIdentity,
        handler: Arc<dyn FeedbackHandler>,
    ) -> Result<(), InputError> {
        self.check_not_created()?;
        info!(
            wcid = self.wcid,
            name = %identity.name,
            capabilities = self.capabilities,
            "Virtual device {:04x}:{:04x} created",
            identity.vendor_id,
            identity.product_id
        );
        self.hub.state.lock().handlers.insert(self.wcid, handler);
        self.created = true;
        Ok(())
    }

    fn set_key(&mut self, key: Key, pressed: bool) {
        self.staged.keys.insert(key, pressed);
    }

    fn set_axis(&mut self, axis: Axis, value: i32) {
        self.staged.axes.insert(axis, value);
    }

    fn report(&mut self) -> Result<(), InputError> {
        if !self.created {
            return Err(InputError::EmitFailed("device not created".to_string()));
        }
        debug!(wcid = self.wcid, "Input report");
        self.hub.state.lock().reports.push(DeviceReport {
            wcid: self.wcid,
            report: self.staged.clone(),
        });
        Ok(())
    }
}

impl Drop for LoggingInputDevice {
    fn drop(&mut self) {
        if self.created {
            self.hub.state.lock().handlers.remove(&self.wcid);
            debug!(wcid = self.wcid, "Virtual device removed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU16, Ordering};

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[derive(Default)]
    struct LastGain(AtomicU16);

    impl FeedbackHandler for LastGain {
        fn feedback_received(&self, _effect: &FfEffect, gain: u16) {
            self.0.store(gain, Ordering::SeqCst);
        }
    }

    fn identity() -> DeviceIdentity {
        DeviceIdentity {
            vendor_id: 0x045E,
            product_id: 0x02EA,
            name: "Pad".into(),
        }
    }

    // ═══ Scenario: Reports are collected per client ════════════════════════

    /// GIVEN a created device
    /// WHEN keys and axes are set and reported
    /// THEN the hub returns the snapshot once
    #[test]
    fn given_created_device_when_reported_then_hub_collects_snapshot() -> TestResult {
        let hub = DeviceHub::default();
        let mut device = hub.create_device(3);
        device.add_key(Key::A)?;
        device.add_axis(Axis::X, AxisConfig::new(-1, 1, 0, 0))?;
        device.create(identity(), Arc::new(LastGain::default()))?;

        device.set_key(Key::A, true);
        device.set_axis(Axis::X, -1);
        device.report()?;

        let reports = hub.take_reports();
        assert_eq!(reports.len(), 1);
        let report = reports.first().ok_or("no report")?;
        assert_eq!(report.wcid, 3);
        assert_eq!(report.report.key(Key::A), Some(true));
        assert_eq!(report.report.axis(Axis::X), Some(-1));
        assert!(hub.take_reports().is_empty());
        Ok(())
    }

    /// GIVEN a device that was never created
    /// WHEN report is called
    /// THEN it fails and nothing is collected
    #[test]
    fn given_uncreated_device_when_reported_then_error() {
        let hub = DeviceHub::default();
        let mut device = hub.create_device(1);
        assert!(matches!(device.report(), Err(InputError::EmitFailed(_))));
        assert!(hub.take_reports().is_empty());
    }

    #[test]
    fn capabilities_frozen_after_create() -> TestResult {
        let hub = DeviceHub::default();
        let mut device = hub.create_device(1);
        device.create(identity(), Arc::new(LastGain::default()))?;
        assert!(matches!(device.add_key(Key::B), Err(InputError::AlreadyCreated)));
        Ok(())
    }

    // ═══ Scenario: Feedback playback ═══════════════════════════════════════

    /// GIVEN a created device with a feedback handler
    /// WHEN feedback is played for its client
    /// THEN the handler receives the gain, and dropping the device unbinds it
    #[test]
    fn given_handler_when_feedback_played_then_delivered() -> TestResult {
        let hub = DeviceHub::default();
        let handler = Arc::new(LastGain::default());
        let mut device = hub.create_device(2);
        device.create(identity(), handler.clone())?;

        assert!(hub.play_feedback(2, &FfEffect::rumble(1, 2), 0x1234));
        assert_eq!(handler.0.load(Ordering::SeqCst), 0x1234);
        assert!(!hub.play_feedback(4, &FfEffect::rumble(1, 2), 1));

        drop(device);
        assert!(!hub.play_feedback(2, &FfEffect::rumble(1, 2), 1));
        Ok(())
    }
}
