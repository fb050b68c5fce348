//! Force-feedback to rumble command mapping.
//!
//! Magnitudes and gain are 16-bit host values; motor power is 8-bit. Power is
//! `magnitude * gain / 0xFFFFFF` in 32-bit integer arithmetic, truncated.
//!
//! Effects pointing into the upper half-circle (`0x4000..=0xC000`) also
//! drive the trigger motors. The angle is shifted by an eighth of a turn and
//! split into a left and a right share; each trigger gets its share of the
//! stronger main motor, attenuated by four.

use std::f64::consts::PI;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use opendongle_errors::Result;
use opendongle_gip_protocol::{RumbleData, RumbleMotors, commands};
use opendongle_input::{FeedbackHandler, FfEffect};
use tracing::{debug, error};

use crate::sender::PacketSender;

/// Gain and magnitude scale: 16-bit times 16-bit down to 8-bit.
const POWER_DIVISOR: u32 = 0x00FF_FFFF;

/// Duration value that holds the vibration until the next command.
const HOLD: u8 = 0xFF;

/// Trigger motors are attenuated by this factor.
const TRIGGER_ATTENUATION: f64 = 4.0;

const UPPER_HALF: core::ops::RangeInclusive<u16> = 0x4000..=0xC000;

/// 8-bit motor power for a 16-bit magnitude at a 16-bit gain.
pub fn rumble_power(magnitude: u16, gain: u16) -> u8 {
    (u32::from(magnitude) * u32::from(gain) / POWER_DIVISOR) as u8
}

/// Left and right trigger shares for an effect direction.
///
/// `None` outside the upper half-circle.
pub fn trigger_amounts(direction: u16) -> Option<(f64, f64)> {
    if !UPPER_HALF.contains(&direction) {
        return None;
    }
    let angle = f64::from(direction) / f64::from(u16::MAX) - 0.125;
    let turn = 2.0 * PI * angle;
    Some((turn.sin().max(0.0), (-turn.cos()).max(0.0)))
}

/// Rumble command for an effect at the given gain.
pub fn rumble_command(effect: &FfEffect, gain: u16) -> RumbleData {
    // Cross-mapped: the strong magnitude feeds `weak` and vice versa.
    // This matches the controller's motor layout; keep it unless verified
    // on hardware.
    let weak = rumble_power(effect.strong_magnitude, gain);
    let strong = rumble_power(effect.weak_magnitude, gain);

    let mut data = RumbleData {
        motors: RumbleMotors::ALL,
        left: strong,
        right: weak,
        duration: HOLD,
        ..RumbleData::default()
    };

    if let Some((left, right)) = trigger_amounts(effect.direction) {
        let max_power = f64::from(weak.max(strong));
        data.trigger_left = (left * max_power / TRIGGER_ATTENUATION) as u8;
        data.trigger_right = (right * max_power / TRIGGER_ATTENUATION) as u8;
    }

    data
}

/// Feedback handler that forwards rumble effects to one controller.
///
/// Zero-gain updates are dropped unless the controller is currently
/// rumbling, so a stop is sent exactly once.
pub struct RumbleMapper {
    sender: Arc<dyn PacketSender>,
    rumbling: AtomicBool,
}

impl RumbleMapper {
    pub fn new(sender: Arc<dyn PacketSender>) -> Self {
        Self {
            sender,
            rumbling: AtomicBool::new(false),
        }
    }

    pub fn is_rumbling(&self) -> bool {
        self.rumbling.load(Ordering::Acquire)
    }

    /// Map and send one effect update.
    ///
    /// Returns `Ok(false)` when nothing needed to be sent. The rumbling
    /// flag follows `gain > 0` after every send attempt, failed or not.
    pub fn apply(&self, effect: &FfEffect, gain: u16) -> Result<bool> {
        if !effect.is_rumble() {
            return Ok(false);
        }
        if gain == 0 && !self.is_rumbling() {
            return Ok(false);
        }

        let data = rumble_command(effect, gain);
        debug!(
            length = effect.replay.length,
            delay = effect.replay.delay,
            direction = effect.direction,
            weak = data.right,
            strong = data.left,
            "Feedback received"
        );

        let sent = self.sender.send_packet(&commands::rumble(&data));
        self.rumbling.store(gain > 0, Ordering::Release);
        sent.map(|()| true)
    }
}

impl FeedbackHandler for RumbleMapper {
    fn feedback_received(&self, effect: &FfEffect, gain: u16) {
        if let Err(e) = self.apply(effect, gain) {
            error!(error = %e, "Failed to perform rumble");
        }
    }
}
