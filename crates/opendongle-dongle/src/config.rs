//! Dongle configuration, loaded from JSON or YAML with environment overrides.

use std::path::Path;

use opendongle_controller::ControllerConfig;
use opendongle_errors::{DongleError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const ENV_LED_BRIGHTNESS: &str = "OPENDONGLE_LED_BRIGHTNESS";
pub const ENV_DEVICE_NAME: &str = "OPENDONGLE_DEVICE_NAME";
pub const ENV_POWER_OFF_ON_CLOSE: &str = "OPENDONGLE_POWER_OFF_ON_CLOSE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DongleConfig {
    /// Settings applied to every controller session
    pub controller: ControllerConfig,
    /// Power off connected controllers when the dongle closes
    pub power_off_on_close: bool,
}

impl Default for DongleConfig {
    fn default() -> Self {
        Self {
            controller: ControllerConfig::default(),
            power_off_on_close: true,
        }
    }
}

impl DongleConfig {
    /// Load configuration from a file. `.yaml`/`.yml` files are parsed as
    /// YAML, everything else as JSON. Missing keys keep their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DongleError::config(format!("Failed to read {}: {e}", path.display()))
        })?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let config: DongleConfig = if is_yaml {
            serde_yaml::from_str(&content).map_err(|e| {
                DongleError::config(format!("Failed to parse {}: {e}", path.display()))
            })?
        } else {
            serde_json::from_str(&content).map_err(|e| {
                DongleError::config(format!("Failed to parse {}: {e}", path.display()))
            })?
        };

        config.validate()?;
        debug!(path = %path.display(), "Loaded dongle config");
        Ok(config)
    }

    /// Apply `OPENDONGLE_*` environment variables on top of this config.
    pub fn from_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(value) = lookup(ENV_LED_BRIGHTNESS) {
            self.controller.led_brightness = parse_brightness(&value)
                .ok_or_else(|| DongleError::config(format!("Invalid {ENV_LED_BRIGHTNESS}: '{value}'")))?;
        }
        if let Some(value) = lookup(ENV_DEVICE_NAME) {
            self.controller.device_name = value;
        }
        if let Some(value) = lookup(ENV_POWER_OFF_ON_CLOSE) {
            self.power_off_on_close = parse_bool(&value).ok_or_else(|| {
                DongleError::config(format!("Invalid {ENV_POWER_OFF_ON_CLOSE}: '{value}'"))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.controller.device_name.trim().is_empty() {
            return Err(DongleError::config("device_name must not be empty"));
        }
        Ok(())
    }
}

/// Decimal or `0x`-prefixed hex.
fn parse_brightness(value: &str) -> Option<u8> {
    let value = value.trim();
    match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u8::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = DongleConfig::default();
        assert!(config.power_off_on_close);
        assert_eq!(config.controller, ControllerConfig::default());
    }

    #[test]
    fn overrides_apply() -> Result<()> {
        let config = DongleConfig::default().with_overrides(lookup(&[
            (ENV_LED_BRIGHTNESS, "0x10"),
            (ENV_DEVICE_NAME, "Pad"),
            (ENV_POWER_OFF_ON_CLOSE, "off"),
        ]))?;
        assert_eq!(config.controller.led_brightness, 0x10);
        assert_eq!(config.controller.device_name, "Pad");
        assert!(!config.power_off_on_close);
        Ok(())
    }

    #[test]
    fn decimal_brightness_override() -> Result<()> {
        let config =
            DongleConfig::default().with_overrides(lookup(&[(ENV_LED_BRIGHTNESS, "12")]))?;
        assert_eq!(config.controller.led_brightness, 12);
        Ok(())
    }

    #[test]
    fn invalid_override_is_config_error() {
        let result =
            DongleConfig::default().with_overrides(lookup(&[(ENV_POWER_OFF_ON_CLOSE, "maybe")]));
        assert!(matches!(result, Err(DongleError::Config(_))));

        let result =
            DongleConfig::default().with_overrides(lookup(&[(ENV_LED_BRIGHTNESS, "0x1FF")]));
        assert!(matches!(result, Err(DongleError::Config(_))));
    }

    #[test]
    fn empty_device_name_rejected() {
        let result = DongleConfig::default().with_overrides(lookup(&[(ENV_DEVICE_NAME, "  ")]));
        assert!(matches!(result, Err(DongleError::Config(_))));
    }
}
