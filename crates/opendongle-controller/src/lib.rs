//! Controller session for GIP wireless controllers.
//!
//! A [`Controller`] owns one connected controller: it answers the announce
//! handshake, acknowledges packets that require it, maps input snapshots
//! onto a virtual [`InputDevice`](opendongle_input::InputDevice) and turns
//! force-feedback uploads into rumble commands.
//!
//! Outbound packets leave through a [`PacketSender`], which the dongle
//! binds to the controller's radio client.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod rumble;
pub mod sender;
pub mod session;

pub use config::ControllerConfig;
pub use rumble::{RumbleMapper, rumble_command, trigger_amounts};
pub use sender::PacketSender;
pub use session::{Controller, SessionState};
