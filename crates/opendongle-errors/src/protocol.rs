//! Controller protocol decode errors.

use crate::common::ErrorSeverity;

/// Errors raised while decoding an inbound controller packet.
///
/// A protocol error never tears down a session; the offending packet is
/// dropped and the controller stays connected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// Fewer bytes were available than a field required
    #[error("Packet truncated at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        /// Read position when the shortfall was detected
        offset: usize,
        /// Bytes the read required
        needed: usize,
        /// Bytes left in the packet
        available: usize,
    },

    /// The frame header declares more payload than the packet carries
    #[error("Command {command:#04x} declares {declared} bytes but only {available} are present")]
    LengthMismatch {
        /// Command byte from the frame header
        command: u8,
        /// Length byte from the frame header
        declared: usize,
        /// Payload bytes actually present
        available: usize,
    },

    /// An outbound payload does not fit the radio frame length field
    #[error("Payload of {size} bytes exceeds the {max} byte limit")]
    Oversized {
        /// Payload size in bytes
        size: usize,
        /// Largest payload the frame can carry
        max: usize,
    },
}

impl ProtocolError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Warning
    }

    /// Create a truncation error.
    pub fn truncated(offset: usize, needed: usize, available: usize) -> Self {
        ProtocolError::Truncated {
            offset,
            needed,
            available,
        }
    }

    /// Create a length mismatch error.
    pub fn length_mismatch(command: u8, declared: usize, available: usize) -> Self {
        ProtocolError::LengthMismatch {
            command,
            declared,
            available,
        }
    }
}
