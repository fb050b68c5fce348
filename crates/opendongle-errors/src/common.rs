//! Common error types and utilities used across all OpenDongle crates.
//!
//! This module provides the top-level error enum that wraps all sub-errors,
//! along with severity levels used to pick a log level.

use core::fmt;

use crate::{InputError, ProtocolError, TransportError};

/// Top-level error type that can wrap all OpenDongle sub-errors.
#[derive(Debug, thiserror::Error)]
pub enum DongleError {
    /// Radio transport errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Controller protocol decode errors
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Virtual input device errors
    #[error("Input device error: {0}")]
    Input(#[from] InputError),

    /// Client identifier outside the slot table
    #[error("Invalid client identifier {0}")]
    InvalidClient(u8),

    /// No controller session for the client identifier
    #[error("Controller '{0}' is not connected")]
    NotConnected(u8),

    /// The dongle is shutting down and refuses new work
    #[error("Dongle is closing")]
    Closing,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DongleError {
    /// Get the error severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DongleError::Transport(e) => e.severity(),
            DongleError::Protocol(e) => e.severity(),
            DongleError::Input(e) => e.severity(),
            DongleError::InvalidClient(_) => ErrorSeverity::Error,
            DongleError::NotConnected(_) => ErrorSeverity::Warning,
            DongleError::Closing => ErrorSeverity::Info,
            DongleError::Config(_) => ErrorSeverity::Error,
        }
    }

    /// Create a configuration error with a message.
    pub fn config(msg: impl Into<String>) -> Self {
        DongleError::Config(msg.into())
    }
}

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Informational, no action required
    Info = 0,
    /// Warning, may require attention
    Warning = 1,
    /// Error, operation failed
    Error = 2,
    /// Critical, the dongle may be in an unstable state
    Critical = 3,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity_ordering() {
        assert!(ErrorSeverity::Critical > ErrorSeverity::Error);
        assert!(ErrorSeverity::Error > ErrorSeverity::Warning);
        assert!(ErrorSeverity::Warning > ErrorSeverity::Info);
    }

    #[test]
    fn test_dongle_error_is_std_error() {
        let err: DongleError = ProtocolError::truncated(0, 4, 2).into();
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_dongle_error_severity_follows_source() {
        let err: DongleError = TransportError::Disconnected.into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        let err: DongleError = ProtocolError::truncated(0, 4, 2).into();
        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert_eq!(DongleError::NotConnected(1).severity(), ErrorSeverity::Warning);
    }
}
