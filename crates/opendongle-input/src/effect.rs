//! Force-feedback effect model.

use serde::{Deserialize, Serialize};

/// Effect type as uploaded by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Rumble,
    Periodic,
    Constant,
    Spring,
    Friction,
    Damper,
    Inertia,
    Ramp,
}

/// Playback timing in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replay {
    pub length: u16,
    pub delay: u16,
}

/// A force-feedback effect.
///
/// `direction` is a 16-bit angle: `0x0000` down, `0x4000` left, `0x8000`
/// up, `0xC000` right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FfEffect {
    pub kind: EffectKind,
    pub strong_magnitude: u16,
    pub weak_magnitude: u16,
    #[serde(default)]
    pub replay: Replay,
    #[serde(default)]
    pub direction: u16,
}

impl FfEffect {
    /// Rumble effect with no direction and no timing.
    pub fn rumble(strong_magnitude: u16, weak_magnitude: u16) -> Self {
        Self {
            kind: EffectKind::Rumble,
            strong_magnitude,
            weak_magnitude,
            replay: Replay::default(),
            direction: 0,
        }
    }

    pub fn with_direction(mut self, direction: u16) -> Self {
        self.direction = direction;
        self
    }

    pub fn is_rumble(&self) -> bool {
        self.kind == EffectKind::Rumble
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rumble_constructor() {
        let effect = FfEffect::rumble(0xFFFF, 0x1000).with_direction(0x8000);
        assert!(effect.is_rumble());
        assert_eq!(effect.direction, 0x8000);
        assert_eq!(effect.replay, Replay::default());
    }

    #[test]
    fn deserialize_defaults_optional_fields() -> Result<(), serde_json::Error> {
        let effect: FfEffect = serde_json::from_str(
            r#"{"kind":"periodic","strong_magnitude":1,"weak_magnitude":2}"#,
        )?;
        assert!(!effect.is_rumble());
        assert_eq!(effect.direction, 0);
        Ok(())
    }
}
