//! Per-controller settings.

use opendongle_gip_protocol::LedModeData;
use serde::{Deserialize, Serialize};

/// Name the virtual device is created with unless configured otherwise.
pub const DEFAULT_DEVICE_NAME: &str = "Xbox One Wireless Controller";

/// Guide button brightness after the handshake, slightly dimmed.
pub const DEFAULT_LED_BRIGHTNESS: u8 = 0x14;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub device_name: String,
    pub led_brightness: u8,
}

impl ControllerConfig {
    /// Brightness clamped to what the controller accepts.
    pub fn led_brightness(&self) -> u8 {
        self.led_brightness.min(LedModeData::MAX_BRIGHTNESS)
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            led_brightness: DEFAULT_LED_BRIGHTNESS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ControllerConfig::default();
        assert_eq!(config.device_name, "Xbox One Wireless Controller");
        assert_eq!(config.led_brightness(), 0x14);
    }

    #[test]
    fn brightness_is_clamped() {
        let config = ControllerConfig {
            led_brightness: 0x40,
            ..ControllerConfig::default()
        };
        assert_eq!(config.led_brightness(), 0x20);
    }

    #[test]
    fn partial_json_keeps_defaults() -> Result<(), serde_json::Error> {
        let config: ControllerConfig = serde_json::from_str(r#"{"led_brightness": 8}"#)?;
        assert_eq!(config.led_brightness, 8);
        assert_eq!(config.device_name, DEFAULT_DEVICE_NAME);
        Ok(())
    }
}
