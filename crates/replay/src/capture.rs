//! Capture file format.
//!
//! ```json
//! {
//!   "dongle_address": "62:45:b4:00:00:01",
//!   "events": [
//!     { "type": "connect", "wcid": 1, "address": "7c:ed:8d:11:22:33" },
//!     { "type": "packet", "wcid": 1, "data": "07 20 01 02 01 5b" },
//!     { "type": "feedback", "wcid": 1, "strong": 65535, "weak": 0, "gain": 65535 },
//!     { "type": "disconnect", "wcid": 1 }
//!   ]
//! }
//! ```

use core::fmt;
use std::path::Path;

use opendongle_dongle::MacAddress;
use opendongle_input::{EffectKind, FfEffect, Replay};
use serde::{Deserialize, Serialize};

use crate::error::CliError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureFile {
    /// Address the simulated dongle transmits from
    #[serde(default)]
    pub dongle_address: Option<MacAddress>,
    pub events: Vec<CaptureEvent>,
}

impl CaptureFile {
    pub fn from_path(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::CaptureRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|e| CliError::InvalidCapture(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CaptureEvent {
    Connect {
        wcid: u8,
        address: MacAddress,
    },
    Packet {
        wcid: u8,
        /// Hex bytes, optionally `0x`-prefixed and space separated
        data: String,
    },
    Disconnect {
        wcid: u8,
    },
    Feedback {
        wcid: u8,
        #[serde(default = "default_kind")]
        kind: EffectKind,
        #[serde(default)]
        strong: u16,
        #[serde(default)]
        weak: u16,
        #[serde(default)]
        direction: u16,
        gain: u16,
    },
}

fn default_kind() -> EffectKind {
    EffectKind::Rumble
}

impl CaptureEvent {
    /// Effect and gain carried by a feedback event.
    pub fn effect(&self) -> Option<(FfEffect, u16)> {
        match *self {
            CaptureEvent::Feedback {
                kind,
                strong,
                weak,
                direction,
                gain,
                ..
            } => Some((
                FfEffect {
                    kind,
                    strong_magnitude: strong,
                    weak_magnitude: weak,
                    replay: Replay::default(),
                    direction,
                },
                gain,
            )),
            _ => None,
        }
    }
}

impl fmt::Display for CaptureEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureEvent::Connect { wcid, address } => {
                write!(f, "connect wcid={wcid} address={address}")
            }
            CaptureEvent::Packet { wcid, data } => write!(f, "packet wcid={wcid} data={data}"),
            CaptureEvent::Disconnect { wcid } => write!(f, "disconnect wcid={wcid}"),
            CaptureEvent::Feedback {
                wcid,
                kind,
                strong,
                weak,
                direction,
                gain,
            } => write!(
                f,
                "feedback wcid={wcid} kind={kind:?} strong={strong:#06x} weak={weak:#06x} \
                 direction={direction:#06x} gain={gain:#06x}"
            ),
        }
    }
}

/// Parse `"07 20 01 02"`, `"0x07 0x20"` or `"07200102"`.
///
/// Each whitespace separated token must hold whole bytes.
pub fn parse_hex_bytes(input: &str) -> Result<Vec<u8>, CliError> {
    let mut bytes = Vec::new();
    for token in input.split_whitespace() {
        let digits = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .unwrap_or(token);
        let decoded = hex::decode(digits)
            .map_err(|e| CliError::InvalidHex(format!("'{token}': {e}")))?;
        bytes.extend(decoded);
    }
    Ok(bytes)
}

pub fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| hex::encode([*b]))
        .collect::<Vec<_>>()
        .join(" ")
}
