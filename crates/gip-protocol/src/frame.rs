//! GIP frame header and command/type constants.

use opendongle_errors::ProtocolResult;
use opendongle_packet::{PacketBuffer, PacketReader, WireStruct};

/// Frame command byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    Acknowledge = 0x01,
    Announce = 0x02,
    Status = 0x03,
    Authenticate = 0x04,
    PowerMode = 0x05,
    ReadEeprom = 0x06,
    GuideButton = 0x07,
    Rumble = 0x09,
    LedMode = 0x0A,
    SerialNumber = 0x1E,
    Input = 0x20,
}

impl Command {
    pub fn from_u8(value: u8) -> Option<Self> {
        Some(match value {
            0x01 => Self::Acknowledge,
            0x02 => Self::Announce,
            0x03 => Self::Status,
            0x04 => Self::Authenticate,
            0x05 => Self::PowerMode,
            0x06 => Self::ReadEeprom,
            0x07 => Self::GuideButton,
            0x09 => Self::Rumble,
            0x0A => Self::LedMode,
            0x1E => Self::SerialNumber,
            0x20 => Self::Input,
            _ => return None,
        })
    }
}

/// Frame type byte.
///
/// A *command* gets no response, a *request* is answered with data, and a
/// *request with ack* is answered with an acknowledgement followed by data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FrameType {
    Command = 0x00,
    Request = 0x20,
    RequestAck = 0x30,
}

/// 4-byte header preceding every GIP payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameHeader {
    pub command: u8,
    pub frame_type: u8,
    pub sequence: u8,
    pub length: u8,
}

impl FrameHeader {
    pub const SIZE: usize = 4;

    /// Header for an outbound packet. The sequence is left at zero.
    pub fn new(command: Command, frame_type: FrameType, length: u8) -> Self {
        Self {
            command: command as u8,
            frame_type: frame_type as u8,
            sequence: 0,
            length,
        }
    }

    pub fn parse(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        let [command, frame_type, sequence, length] = reader.read_array()?;
        Ok(Self {
            command,
            frame_type,
            sequence,
            length,
        })
    }

    /// Known command, if any.
    pub fn command(&self) -> Option<Command> {
        Command::from_u8(self.command)
    }
}

impl WireStruct for FrameHeader {
    const SIZE: usize = FrameHeader::SIZE;

    fn write_to(&self, buf: &mut PacketBuffer) {
        buf.append_u8(self.command)
            .append_u8(self.frame_type)
            .append_u8(self.sequence)
            .append_u8(self.length);
    }
}
