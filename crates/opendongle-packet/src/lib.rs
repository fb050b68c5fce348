//! Packet assembly and parsing primitives shared by the OpenDongle crates.
//!
//! [`PacketBuffer`] builds outbound byte sequences from fixed-size wire
//! structures, raw bytes and zero padding. [`PacketReader`] is the inbound
//! counterpart: a cursor over a borrowed slice that refuses to read past the
//! end instead of panicking.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod buffer;
pub mod reader;

pub use buffer::{PacketBuffer, WireStruct, padding};
pub use reader::PacketReader;
