//! CLI error types and exit codes.

use std::path::PathBuf;

use opendongle_errors::DongleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read capture '{path}': {source}")]
    CaptureRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid capture file: {0}")]
    InvalidCapture(String),

    #[error("Invalid hex data: {0}")]
    InvalidHex(String),

    #[error(transparent)]
    Dongle(#[from] DongleError),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::CaptureRead { .. } => 2,
            CliError::InvalidCapture(_) | CliError::InvalidHex(_) => 4,
            CliError::Dongle(DongleError::Config(_)) => 3,
            CliError::Dongle(_) => 1,
        }
    }
}
