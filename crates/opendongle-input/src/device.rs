//! Input device and feedback traits.

use std::sync::Arc;

use opendongle_errors::InputError;
use serde::{Deserialize, Serialize};

use crate::codes::{Axis, FeedbackKind, Key};
use crate::effect::FfEffect;

/// Range and noise filtering for an absolute axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub minimum: i32,
    pub maximum: i32,
    pub fuzz: i32,
    pub flat: i32,
}

impl AxisConfig {
    pub const fn new(minimum: i32, maximum: i32, fuzz: i32, flat: i32) -> Self {
        Self {
            minimum,
            maximum,
            fuzz,
            flat,
        }
    }
}

/// Identity the virtual device is created with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    pub vendor_id: u16,
    pub product_id: u16,
    pub name: String,
}

/// Receives force-feedback uploads from a virtual device.
///
/// Called from the device's own event thread, concurrently with input
/// reporting.
pub trait FeedbackHandler: Send + Sync {
    fn feedback_received(&self, effect: &FfEffect, gain: u16);
}

/// A virtual input device.
///
/// Capabilities are registered before [`InputDevice::create`]; key and axis
/// updates are staged and become visible to readers on
/// [`InputDevice::report`].
pub trait InputDevice: Send {
    fn add_key(&mut self, key: Key) -> Result<(), InputError>;

    fn add_axis(&mut self, axis: Axis, config: AxisConfig) -> Result<(), InputError>;

    fn add_feedback(&mut self, kind: FeedbackKind) -> Result<(), InputError>;

    /// Create the device. `handler` receives feedback uploads for as long as
    /// the device lives.
    fn create(
        &mut self,
        identity: DeviceIdentity,
        handler: Arc<dyn FeedbackHandler>,
    ) -> Result<(), InputError>;

    fn set_key(&mut self, key: Key, pressed: bool);

    fn set_axis(&mut self, axis: Axis, value: i32);

    /// Publish all staged changes as one atomic snapshot.
    fn report(&mut self) -> Result<(), InputError>;
}
