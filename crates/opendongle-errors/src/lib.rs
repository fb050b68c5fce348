//! Centralized error types for OpenDongle
//!
//! Every layer of the dongle stack reports failures through the types in this
//! crate, so the registry can log a failure once and decide whether it is fatal
//! for a single packet, a single controller, or the whole dongle.
//!
//! # Architecture
//!
//! - [`common`]: Top-level [`DongleError`] and severity
//! - [`transport`]: Radio transport failures (send/open/close)
//! - [`protocol`]: Malformed or truncated controller packets
//! - [`input`]: Virtual input device failures
//!
//! # Propagation policy
//!
//! Per-packet failures are logged and dropped by the registry. Lifecycle hooks
//! (`after_open` / `before_close`) propagate transport failures unchanged.
//!
//! # Example
//!
//! ```
//! use opendongle_errors::prelude::*;
//!
//! fn check_length(declared: usize, available: usize) -> Result<()> {
//!     if declared > available {
//!         return Err(ProtocolError::length_mismatch(0x20, declared, available).into());
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_length(14, 10).is_err());
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod common;
pub mod input;
pub mod prelude;
pub mod protocol;
pub mod transport;

pub use common::{DongleError, ErrorSeverity};
pub use input::InputError;
pub use protocol::ProtocolError;
pub use transport::TransportError;

/// A specialized `Result` type for OpenDongle operations.
pub type Result<T = ()> = std::result::Result<T, DongleError>;

/// A specialized `Result` type for packet decoding.
pub type ProtocolResult<T> = std::result::Result<T, ProtocolError>;
