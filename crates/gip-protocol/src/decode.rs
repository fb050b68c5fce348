//! Inbound packet decoding.

use opendongle_errors::{ProtocolError, ProtocolResult};
use opendongle_packet::PacketReader;

use crate::frame::{Command, FrameHeader};
use crate::packets::{Announce, GuideButton, InputData, SerialNumber, Status};

/// Decoded payload of an inbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GipPayload {
    Announce(Announce),
    Status(Status),
    GuideButton(GuideButton),
    SerialNumber(SerialNumber),
    Input(InputData),
    /// Unknown command, or a known command with an unexpected length.
    Ignored,
}

/// Header plus decoded payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GipFrame {
    pub header: FrameHeader,
    pub payload: GipPayload,
}

/// Decode one controller packet.
///
/// Fails only when the packet is shorter than a frame header or shorter
/// than the length the header declares. Everything else decodes, with
/// unrecognised frames reported as [`GipPayload::Ignored`].
///
/// Input frames may be longer than [`InputData::SIZE`]; Elite controllers
/// append the unmapped input after the regular fields. Only the leading
/// fields are decoded.
pub fn decode(packet: &[u8]) -> ProtocolResult<GipFrame> {
    let mut reader = PacketReader::new(packet);
    let header = FrameHeader::parse(&mut reader)?;
    let declared = usize::from(header.length);
    if declared > reader.remaining() {
        return Err(ProtocolError::length_mismatch(
            header.command,
            declared,
            reader.remaining(),
        ));
    }

    let mut body = PacketReader::new(reader.read_bytes(declared)?);
    let payload = match (header.command(), declared) {
        (Some(Command::Announce), Announce::SIZE) => {
            GipPayload::Announce(Announce::parse(&mut body)?)
        }
        (Some(Command::Status), Status::SIZE) => GipPayload::Status(Status::parse(&mut body)?),
        (Some(Command::GuideButton), GuideButton::SIZE) => {
            GipPayload::GuideButton(GuideButton::parse(&mut body)?)
        }
        (Some(Command::SerialNumber), SerialNumber::SIZE) => {
            GipPayload::SerialNumber(SerialNumber::parse(&mut body)?)
        }
        (Some(Command::Input), len) if len >= InputData::SIZE => {
            GipPayload::Input(InputData::parse(&mut body)?)
        }
        _ => GipPayload::Ignored,
    };

    Ok(GipFrame { header, payload })
}
