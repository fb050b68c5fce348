//! Virtual input device errors.

use crate::common::ErrorSeverity;

/// Errors reported by the virtual input device sink.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// Device creation was rejected by the input subsystem
    #[error("Failed to create input device: {0}")]
    CreateFailed(String),

    /// An event could not be emitted
    #[error("Failed to emit input event: {0}")]
    EmitFailed(String),

    /// Capabilities were changed or the device created twice
    #[error("Input device already created")]
    AlreadyCreated,
}

impl InputError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            InputError::CreateFailed(_) => ErrorSeverity::Error,
            InputError::EmitFailed(_) => ErrorSeverity::Warning,
            InputError::AlreadyCreated => ErrorSeverity::Warning,
        }
    }
}
