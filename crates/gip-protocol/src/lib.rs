//! GIP (Game Input Protocol) wire layer for wireless controllers.
//!
//! Every controller packet starts with a 4-byte [`FrameHeader`]
//! (`command`, `type`, `sequence`, `length`) followed by `length` bytes of
//! payload. All multi-byte fields are little-endian and packed.
//!
//! This crate is I/O-free: [`decode`] turns received bytes into a
//! [`GipFrame`], and the functions in [`commands`] build the outbound
//! packets the host sends back (power mode, LED mode, rumble, serial number
//! request, acknowledgement).
//!
//! # Session handshake
//!
//! 1. Controller sends an announce packet (identity and versions).
//! 2. Host answers with power mode *on*, an LED mode and a serial number
//!    request.
//! 3. Controller streams status, guide button, serial number and input
//!    packets. Guide button and serial number packets must be acknowledged.
//!
//! # Example
//!
//! ```
//! use opendongle_gip_protocol::{decode, GipPayload};
//!
//! let guide = [0x07, 0x20, 0x05, 0x02, 0x01, 0x5B];
//! let frame = decode(&guide).map_err(|e| e.to_string())?;
//! assert!(matches!(frame.payload, GipPayload::GuideButton(g) if g.pressed));
//! # Ok::<(), String>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod commands;
pub mod decode;
pub mod frame;
pub mod ids;
pub mod packets;

pub use decode::{GipFrame, GipPayload, decode};
pub use frame::{Command, FrameHeader, FrameType};
pub use ids::{VENDOR_ID, is_microsoft, product_name};
pub use packets::{
    Announce, BatteryLevel, BatteryType, Buttons, GuideButton, InputData, LedMode, LedModeData,
    PowerMode, RumbleData, RumbleMotors, SerialNumber, Status, Version,
};
