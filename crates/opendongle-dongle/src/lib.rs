//! Wireless dongle client registry and radio framing.
//!
//! The dongle's radio driver reports client associations and received
//! packets through [`ClientEvents`]. [`Dongle`] keeps one
//! [`Controller`](opendongle_controller::Controller) per client slot,
//! routes packets to it, and wraps every outbound controller packet in a
//! radio frame before handing it to the [`RadioTransport`].
//!
//! # Frame layout
//!
//! ```text
//! +-----------+--------+-------+-------------+-----+-----+---------+-----+
//! | wcid - 1  | 4 zero | TxWi  | 802.11 data | QoS | pad | payload | pad |
//! | u32 BE    | bytes  | 20 B  | 24 B        | 2 B | 2 B | n B     | 0-3 |
//! +-----------+--------+-------+-------------+-----+-----+---------+-----+
//! ```
//!
//! Every frame is a multiple of four bytes long.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod framing;
pub mod radio;
pub mod registry;
pub mod transport;

pub use config::DongleConfig;
pub use framing::build_controller_frame;
pub use radio::{MacAddress, PhyType, QosFrame, TxWi, WlanFrame};
pub use registry::{
    ClientEvents, ClientLink, Dongle, InputDeviceFactory, MAX_CLIENTS, slot_index,
};
pub use transport::{McuCommand, RadioTransport, RecordingTransport};
