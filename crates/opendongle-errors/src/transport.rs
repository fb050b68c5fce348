//! Radio transport error types.
//!
//! The transport collaborator owns the USB link to the radio chipset. These
//! errors describe what went wrong when a command could not be delivered or
//! when the open/close sequence failed.

use crate::common::ErrorSeverity;

/// Radio transport errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// A firmware command could not be submitted
    #[error("Failed to send {command} command: {reason}")]
    SendFailed {
        /// Command kind
        command: String,
        /// Failure reason reported by the transport
        reason: String,
    },

    /// The open sequence (firmware load, chip init) failed
    #[error("Failed to open radio transport: {0}")]
    OpenFailed(String),

    /// The close sequence failed
    #[error("Failed to close radio transport: {0}")]
    CloseFailed(String),

    /// The dongle went away
    #[error("Radio transport disconnected")]
    Disconnected,
}

impl TransportError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TransportError::SendFailed { .. } => ErrorSeverity::Error,
            TransportError::OpenFailed(_) => ErrorSeverity::Critical,
            TransportError::CloseFailed(_) => ErrorSeverity::Error,
            TransportError::Disconnected => ErrorSeverity::Critical,
        }
    }

    /// Create a send failure.
    pub fn send_failed(command: impl Into<String>, reason: impl Into<String>) -> Self {
        TransportError::SendFailed {
            command: command.into(),
            reason: reason.into(),
        }
    }
}
