//! GIP payload structures.
//!
//! # Payload sizes
//! | Command       | Size | Direction          |
//! |---------------|------|--------------------|
//! | Announce      | 28   | controller → host  |
//! | Status        | 4    | controller → host  |
//! | Guide button  | 2    | controller → host  |
//! | Serial number | 16   | controller → host  |
//! | Input         | ≥14  | controller → host  |
//! | Rumble        | 9    | host → controller  |
//! | LED mode      | 3    | host → controller  |
//! | Power mode    | 1    | host → controller  |

use bitflags::bitflags;
use opendongle_errors::ProtocolResult;
use opendongle_packet::{PacketBuffer, PacketReader, WireStruct};

/// Four-part version number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Version {
    pub major: u16,
    pub minor: u16,
    pub build: u16,
    pub revision: u16,
}

impl Version {
    fn parse(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            major: reader.read_u16_le()?,
            minor: reader.read_u16_le()?,
            build: reader.read_u16_le()?,
            revision: reader.read_u16_le()?,
        })
    }

    fn write_to(&self, buf: &mut PacketBuffer) {
        buf.append_u16_le(self.major)
            .append_u16_le(self.minor)
            .append_u16_le(self.build)
            .append_u16_le(self.revision);
    }
}

impl core::fmt::Display for Version {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

/// Identity and versions, sent once when a controller connects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Announce {
    pub mac_address: [u8; 6],
    pub unknown: u16,
    pub vendor_id: u16,
    pub product_id: u16,
    pub firmware_version: Version,
    pub hardware_version: Version,
}

impl Announce {
    pub const SIZE: usize = 28;

    pub fn parse(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            mac_address: reader.read_array()?,
            unknown: reader.read_u16_le()?,
            vendor_id: reader.read_u16_le()?,
            product_id: reader.read_u16_le()?,
            firmware_version: Version::parse(reader)?,
            hardware_version: Version::parse(reader)?,
        })
    }
}

impl WireStruct for Announce {
    const SIZE: usize = Announce::SIZE;

    fn write_to(&self, buf: &mut PacketBuffer) {
        buf.append_bytes(&self.mac_address)
            .append_u16_le(self.unknown)
            .append_u16_le(self.vendor_id)
            .append_u16_le(self.product_id);
        self.firmware_version.write_to(buf);
        self.hardware_version.write_to(buf);
    }
}

/// Battery chemistry reported in status packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryType {
    /// No batteries, powered over the cable
    None,
    Alkaline,
    Nimh,
    Unknown,
}

impl BatteryType {
    fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0x00 => Self::None,
            0x01 => Self::Alkaline,
            0x02 => Self::Nimh,
            _ => Self::Unknown,
        }
    }
}

/// Coarse battery charge level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BatteryLevel {
    Empty,
    Low,
    Medium,
    High,
}

impl BatteryLevel {
    fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0x00 => Self::Empty,
            0x01 => Self::Low,
            0x02 => Self::Medium,
            _ => Self::High,
        }
    }
}

/// Periodic battery telemetry.
///
/// Byte 0 packs the level (bits 0-1), type (bits 2-3) and connection info
/// (bits 4-7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub battery_level: BatteryLevel,
    pub battery_type: BatteryType,
    pub connection_info: u8,
    pub unknown1: u8,
    pub unknown2: u16,
}

impl Status {
    pub const SIZE: usize = 4;

    pub fn parse(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        let packed = reader.read_u8()?;
        Ok(Self {
            battery_level: BatteryLevel::from_bits(packed),
            battery_type: BatteryType::from_bits(packed >> 2),
            connection_info: packed >> 4,
            unknown1: reader.read_u8()?,
            unknown2: reader.read_u16_le()?,
        })
    }
}

/// Guide (Xbox) button state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuideButton {
    pub pressed: bool,
    pub unknown: u8,
}

impl GuideButton {
    pub const SIZE: usize = 2;

    pub fn parse(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            pressed: reader.read_u8()? != 0,
            unknown: reader.read_u8()?,
        })
    }
}

/// Controller serial number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialNumber {
    pub unknown: u16,
    pub serial: [u8; 14],
}

impl SerialNumber {
    pub const SIZE: usize = 16;

    pub fn parse(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            unknown: reader.read_u16_le()?,
            serial: reader.read_array()?,
        })
    }

    /// Serial as text, cut at the first NUL byte.
    pub fn as_string(&self) -> String {
        let end = self
            .serial
            .iter()
            .position(|b| *b == 0)
            .unwrap_or(self.serial.len());
        let text = self.serial.get(..end).unwrap_or(&self.serial);
        String::from_utf8_lossy(text).into_owned()
    }
}

bitflags! {
    /// Button bits of an input packet (LSB first).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Buttons: u16 {
        const START = 1 << 2;
        const SELECT = 1 << 3;
        const A = 1 << 4;
        const B = 1 << 5;
        const X = 1 << 6;
        const Y = 1 << 7;
        const DPAD_UP = 1 << 8;
        const DPAD_DOWN = 1 << 9;
        const DPAD_LEFT = 1 << 10;
        const DPAD_RIGHT = 1 << 11;
        const BUMPER_LEFT = 1 << 12;
        const BUMPER_RIGHT = 1 << 13;
        const STICK_LEFT = 1 << 14;
        const STICK_RIGHT = 1 << 15;
    }
}

/// Full input snapshot.
///
/// Triggers are 10-bit (`0..=1023`). Stick Y axes point up for positive
/// values on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputData {
    pub buttons: Buttons,
    pub trigger_left: u16,
    pub trigger_right: u16,
    pub stick_left_x: i16,
    pub stick_left_y: i16,
    pub stick_right_x: i16,
    pub stick_right_y: i16,
}

impl InputData {
    pub const SIZE: usize = 14;

    pub fn parse(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            buttons: Buttons::from_bits_retain(reader.read_u16_le()?),
            trigger_left: reader.read_u16_le()?,
            trigger_right: reader.read_u16_le()?,
            stick_left_x: reader.read_i16_le()?,
            stick_left_y: reader.read_i16_le()?,
            stick_right_x: reader.read_i16_le()?,
            stick_right_y: reader.read_i16_le()?,
        })
    }
}

impl WireStruct for InputData {
    const SIZE: usize = InputData::SIZE;

    fn write_to(&self, buf: &mut PacketBuffer) {
        buf.append_u16_le(self.buttons.bits())
            .append_u16_le(self.trigger_left)
            .append_u16_le(self.trigger_right)
            .append_i16_le(self.stick_left_x)
            .append_i16_le(self.stick_left_y)
            .append_i16_le(self.stick_right_x)
            .append_i16_le(self.stick_right_y);
    }
}

bitflags! {
    /// Motors addressed by a rumble command.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct RumbleMotors: u8 {
        const RIGHT = 0x01;
        const LEFT = 0x02;
        const TRIGGER_LEFT = 0x04;
        const TRIGGER_RIGHT = 0x08;
        const ALL = 0x0F;
    }
}

/// Rumble command payload.
///
/// `left`/`right` drive the main motors, `trigger_left`/`trigger_right` the
/// impulse triggers. A duration of `0xFF` holds the vibration until the
/// next command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RumbleData {
    pub unknown: u8,
    pub motors: RumbleMotors,
    pub trigger_left: u8,
    pub trigger_right: u8,
    pub left: u8,
    pub right: u8,
    pub duration: u8,
    pub delay: u8,
    pub repeat: u8,
}

impl RumbleData {
    pub const SIZE: usize = 9;
}

impl WireStruct for RumbleData {
    const SIZE: usize = RumbleData::SIZE;

    fn write_to(&self, buf: &mut PacketBuffer) {
        buf.append_u8(self.unknown)
            .append_u8(self.motors.bits())
            .append_u8(self.trigger_left)
            .append_u8(self.trigger_right)
            .append_u8(self.left)
            .append_u8(self.right)
            .append_u8(self.duration)
            .append_u8(self.delay)
            .append_u8(self.repeat);
    }
}

/// Guide button LED animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LedMode {
    Off = 0x00,
    On = 0x01,
    BlinkFast = 0x02,
    BlinkMedium = 0x03,
    BlinkSlow = 0x04,
    FadeSlow = 0x08,
    FadeFast = 0x09,
}

/// LED mode command payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedModeData {
    pub unknown: u8,
    pub mode: LedMode,
    pub brightness: u8,
}

impl LedModeData {
    pub const SIZE: usize = 3;

    /// Highest brightness the controller accepts.
    pub const MAX_BRIGHTNESS: u8 = 0x20;

    /// Brightness is clamped to [`Self::MAX_BRIGHTNESS`].
    pub fn new(mode: LedMode, brightness: u8) -> Self {
        Self {
            unknown: 0,
            mode,
            brightness: brightness.min(Self::MAX_BRIGHTNESS),
        }
    }
}

impl WireStruct for LedModeData {
    const SIZE: usize = LedModeData::SIZE;

    fn write_to(&self, buf: &mut PacketBuffer) {
        buf.append_u8(self.unknown)
            .append_u8(self.mode as u8)
            .append_u8(self.brightness);
    }
}

/// Controller power state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PowerMode {
    On = 0x00,
    Sleep = 0x01,
    Off = 0x04,
}
