//! Per-controller session state machine.

use std::sync::Arc;

use opendongle_errors::Result;
use opendongle_gip_protocol::{
    Announce, Buttons, FrameHeader, GipPayload, GuideButton, InputData, LedMode, LedModeData,
    PowerMode, SerialNumber, Status, commands, decode, is_microsoft, product_name,
};
use opendongle_input::{Axis, AxisConfig, DeviceIdentity, FeedbackKind, InputDevice, Key};
use tracing::{debug, error, info, trace, warn};

use crate::config::ControllerConfig;
use crate::rumble::RumbleMapper;
use crate::sender::PacketSender;

/// Sticks: full signed 16-bit range.
const STICK_AXIS: AxisConfig = AxisConfig::new(-32768, 32767, 255, 4095);
/// Triggers: 10-bit unsigned.
const TRIGGER_AXIS: AxisConfig = AxisConfig::new(0, 1023, 3, 63);
/// D-pad: one bit per direction.
const DPAD_AXIS: AxisConfig = AxisConfig::new(-1, 1, 0, 0);

const KEYS: [Key; 11] = [
    Key::Mode,
    Key::Start,
    Key::Select,
    Key::A,
    Key::B,
    Key::X,
    Key::Y,
    Key::BumperLeft,
    Key::BumperRight,
    Key::ThumbLeft,
    Key::ThumbRight,
];

const AXES: [(Axis, AxisConfig); 8] = [
    (Axis::X, STICK_AXIS),
    (Axis::Rx, STICK_AXIS),
    (Axis::Y, STICK_AXIS),
    (Axis::Ry, STICK_AXIS),
    (Axis::Z, TRIGGER_AXIS),
    (Axis::Rz, TRIGGER_AXIS),
    (Axis::Hat0X, DPAD_AXIS),
    (Axis::Hat0Y, DPAD_AXIS),
];

/// Keys driven by input packets, with their button bit.
const INPUT_KEYS: [(Key, Buttons); 10] = [
    (Key::Start, Buttons::START),
    (Key::Select, Buttons::SELECT),
    (Key::A, Buttons::A),
    (Key::B, Buttons::B),
    (Key::X, Buttons::X),
    (Key::Y, Buttons::Y),
    (Key::BumperLeft, Buttons::BUMPER_LEFT),
    (Key::BumperRight, Buttons::BUMPER_RIGHT),
    (Key::ThumbLeft, Buttons::STICK_LEFT),
    (Key::ThumbRight, Buttons::STICK_RIGHT),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Connected, no announce yet
    Uninitialized,
    /// Virtual device created
    Announced,
    /// Input has been reported at least once
    Active,
}

/// One connected controller.
///
/// Dropping the session releases the virtual device.
pub struct Controller {
    sender: Arc<dyn PacketSender>,
    device: Box<dyn InputDevice>,
    rumble: Arc<RumbleMapper>,
    config: ControllerConfig,
    state: SessionState,
}

impl Controller {
    pub fn new(
        sender: Arc<dyn PacketSender>,
        device: Box<dyn InputDevice>,
        config: ControllerConfig,
    ) -> Self {
        let rumble = Arc::new(RumbleMapper::new(Arc::clone(&sender)));
        Self {
            sender,
            device,
            rumble,
            config,
            state: SessionState::Uninitialized,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_rumbling(&self) -> bool {
        self.rumble.is_rumbling()
    }

    /// Decode one inbound packet and dispatch it.
    ///
    /// Unknown commands succeed without effect. Announce packets trigger the
    /// handshake; guide button and serial number packets are acknowledged
    /// before they are processed.
    pub fn handle_packet(&mut self, packet: &[u8]) -> Result<()> {
        let frame = decode(packet)?;

        match frame.payload {
            GipPayload::Announce(announce) => {
                self.handshake()?;
                self.device_announced(&announce)
            }
            GipPayload::Status(status) => {
                self.status_received(&status);
                Ok(())
            }
            GipPayload::GuideButton(button) => {
                self.acknowledge(&frame.header).inspect_err(|e| {
                    error!(error = %e, "Failed to acknowledge guide button packet");
                })?;
                self.guide_button_pressed(&button)
            }
            GipPayload::SerialNumber(serial) => {
                self.acknowledge(&frame.header).inspect_err(|e| {
                    error!(error = %e, "Failed to acknowledge serial number packet");
                })?;
                self.serial_number_received(&serial);
                Ok(())
            }
            GipPayload::Input(input) => self.input_received(&input),
            GipPayload::Ignored => {
                trace!(
                    command = frame.header.command,
                    length = frame.header.length,
                    "Ignoring packet"
                );
                Ok(())
            }
        }
    }

    fn handshake(&self) -> Result<()> {
        self.set_power_mode(PowerMode::On).inspect_err(|e| {
            error!(error = %e, "Failed to set initial power mode");
        })?;
        self.set_led_mode(LedMode::On, self.config.led_brightness())
            .inspect_err(|e| {
                error!(error = %e, "Failed to set initial LED mode");
            })?;
        self.sender
            .send_packet(&commands::serial_number_request())
            .inspect_err(|e| {
                error!(error = %e, "Failed to request serial number");
            })
    }

    fn acknowledge(&self, header: &FrameHeader) -> Result<()> {
        self.sender.send_packet(&commands::acknowledge(header))
    }

    /// Register capabilities and create the virtual device.
    ///
    /// A repeated announce is logged and leaves the existing device alone.
    pub fn device_announced(&mut self, announce: &Announce) -> Result<()> {
        info!(
            product = product_name(announce.product_id).unwrap_or("unknown"),
            "Product ID: {:#06x}",
            announce.product_id
        );
        if !is_microsoft(announce.vendor_id) {
            warn!("Unrecognized vendor ID: {:#06x}", announce.vendor_id);
        }
        debug!(
            firmware = %announce.firmware_version,
            hardware = %announce.hardware_version,
            "Device versions"
        );

        if self.state != SessionState::Uninitialized {
            warn!("Device announced again, keeping existing input device");
            return Ok(());
        }

        for key in KEYS {
            self.device.add_key(key)?;
        }
        for (axis, config) in AXES {
            self.device.add_axis(axis, config)?;
        }
        self.device.add_feedback(FeedbackKind::Rumble)?;

        let identity = DeviceIdentity {
            vendor_id: announce.vendor_id,
            product_id: announce.product_id,
            name: self.config.device_name.clone(),
        };
        self.device.create(identity, self.rumble.clone())?;

        self.state = SessionState::Announced;
        Ok(())
    }

    pub fn status_received(&self, status: &Status) {
        debug!(
            battery_type = ?status.battery_type,
            battery_level = ?status.battery_level,
            "Battery status"
        );
    }

    pub fn guide_button_pressed(&mut self, button: &GuideButton) -> Result<()> {
        if self.state == SessionState::Uninitialized {
            debug!("Guide button before announce, dropping");
            return Ok(());
        }
        self.device.set_key(Key::Mode, button.pressed);
        self.device.report()?;
        Ok(())
    }

    pub fn serial_number_received(&self, serial: &SerialNumber) {
        info!(serial = %serial.as_string(), "Serial number");
    }

    /// Map one input snapshot onto the virtual device and report it.
    pub fn input_received(&mut self, input: &InputData) -> Result<()> {
        if self.state == SessionState::Uninitialized {
            debug!("Input before announce, dropping");
            return Ok(());
        }

        let buttons = input.buttons;
        for (key, bit) in INPUT_KEYS {
            self.device.set_key(key, buttons.contains(bit));
        }

        // Vertical axes are inverted on the wire.
        self.device.set_axis(Axis::X, i32::from(input.stick_left_x));
        self.device.set_axis(Axis::Rx, i32::from(input.stick_right_x));
        self.device.set_axis(Axis::Y, i32::from(!input.stick_left_y));
        self.device.set_axis(Axis::Ry, i32::from(!input.stick_right_y));
        self.device.set_axis(Axis::Z, i32::from(input.trigger_left));
        self.device.set_axis(Axis::Rz, i32::from(input.trigger_right));
        self.device.set_axis(
            Axis::Hat0X,
            dpad(buttons, Buttons::DPAD_RIGHT, Buttons::DPAD_LEFT),
        );
        self.device.set_axis(
            Axis::Hat0Y,
            dpad(buttons, Buttons::DPAD_DOWN, Buttons::DPAD_UP),
        );
        self.device.report()?;

        self.state = SessionState::Active;
        Ok(())
    }

    pub fn power_off(&self) -> Result<()> {
        self.set_power_mode(PowerMode::Off)
    }

    pub fn set_power_mode(&self, mode: PowerMode) -> Result<()> {
        self.sender.send_packet(&commands::power_mode(mode))
    }

    /// Brightness is clamped to the controller's maximum.
    pub fn set_led_mode(&self, mode: LedMode, brightness: u8) -> Result<()> {
        self.sender
            .send_packet(&commands::led_mode(&LedModeData::new(mode, brightness)))
    }

    /// Feedback handler bound to this session.
    pub fn feedback_handler(&self) -> Arc<RumbleMapper> {
        Arc::clone(&self.rumble)
    }
}

fn dpad(buttons: Buttons, positive: Buttons, negative: Buttons) -> i32 {
    i32::from(buttons.contains(positive)) - i32::from(buttons.contains(negative))
}
