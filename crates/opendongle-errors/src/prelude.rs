//! Prelude module for convenient error handling imports.
//!
//! # Example
//!
//! ```
//! use opendongle_errors::prelude::*;
//!
//! fn slot(wcid: u8) -> Result<usize> {
//!     match wcid {
//!         1..=16 => Ok(usize::from(wcid - 1)),
//!         _ => Err(DongleError::InvalidClient(wcid)),
//!     }
//! }
//!
//! assert_eq!(slot(1).ok(), Some(0));
//! ```

pub use crate::{
    ProtocolResult, Result,
    common::{DongleError, ErrorSeverity},
    input::InputError,
    protocol::ProtocolError,
    transport::TransportError,
};
