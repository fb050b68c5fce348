//! Virtual input device contract for OpenDongle.
//!
//! A controller session drives an [`InputDevice`]: it registers keys, axes
//! and a rumble feedback channel, creates the device, then sets key/axis
//! state and calls [`InputDevice::report`] once per input snapshot. The
//! device delivers force-feedback uploads back through a
//! [`FeedbackHandler`] from its own thread.
//!
//! Codes follow the Linux input event codes so a uinput-backed
//! implementation can pass them through unchanged.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod codes;
pub mod device;
pub mod effect;
pub mod mock;

pub use codes::{Axis, FeedbackKind, Key};
pub use device::{AxisConfig, DeviceIdentity, FeedbackHandler, InputDevice};
pub use effect::{EffectKind, FfEffect, Replay};
pub use mock::{InputReport, RecordingHandle, RecordingInputDevice};
