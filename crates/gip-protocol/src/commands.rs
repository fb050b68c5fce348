//! Encoders for host → controller packets.
//!
//! Each function returns the complete GIP packet (header and payload),
//! ready to be wrapped in a radio frame.

use opendongle_packet::PacketBuffer;

use crate::frame::{Command, FrameHeader, FrameType};
use crate::packets::{LedModeData, PowerMode, RumbleData};

/// Payload of a serial number request.
const SERIAL_NUMBER_REQUEST: u8 = 0x04;

/// Zero bytes trailing the echoed header in an acknowledgement.
const ACK_TRAILER: usize = 5;

fn build(header: FrameHeader, payload: impl FnOnce(&mut PacketBuffer)) -> Vec<u8> {
    let mut buf = PacketBuffer::with_capacity(FrameHeader::SIZE + usize::from(header.length));
    buf.append(&header);
    payload(&mut buf);
    buf.into_inner()
}

/// `{0x05, 0x20, 0, 1}` followed by the mode byte.
pub fn power_mode(mode: PowerMode) -> Vec<u8> {
    build(
        FrameHeader::new(Command::PowerMode, FrameType::Request, 1),
        |buf| {
            buf.append_u8(mode as u8);
        },
    )
}

pub fn rumble(data: &RumbleData) -> Vec<u8> {
    build(
        FrameHeader::new(Command::Rumble, FrameType::Command, RumbleData::SIZE as u8),
        |buf| {
            buf.append(data);
        },
    )
}

pub fn led_mode(data: &LedModeData) -> Vec<u8> {
    build(
        FrameHeader::new(Command::LedMode, FrameType::Request, LedModeData::SIZE as u8),
        |buf| {
            buf.append(data);
        },
    )
}

/// The controller answers with an acknowledgement and a serial number packet.
pub fn serial_number_request() -> Vec<u8> {
    build(
        FrameHeader::new(Command::SerialNumber, FrameType::RequestAck, 1),
        |buf| {
            buf.append_u8(SERIAL_NUMBER_REQUEST);
        },
    )
}

/// Acknowledge a received frame.
///
/// The acknowledgement reuses the received sequence number and echoes the
/// command and length of the acknowledged frame.
pub fn acknowledge(received: &FrameHeader) -> Vec<u8> {
    let header = FrameHeader {
        command: Command::Acknowledge as u8,
        frame_type: FrameType::Request as u8,
        sequence: received.sequence,
        length: (FrameHeader::SIZE + ACK_TRAILER) as u8,
    };
    let inner = FrameHeader {
        command: 0x00,
        frame_type: received.command,
        sequence: FrameType::Request as u8,
        length: received.length,
    };
    build(header, |buf| {
        buf.append(&inner).pad(ACK_TRAILER);
    })
}
