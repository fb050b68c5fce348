//! Integration tests for packet assembly and parsing.

use opendongle_errors::ProtocolError;
use opendongle_packet::{PacketBuffer, PacketReader, WireStruct, padding};
use proptest::prelude::*;

struct Header {
    command: u8,
    kind: u8,
    sequence: u8,
    length: u8,
}

impl WireStruct for Header {
    const SIZE: usize = 4;

    fn write_to(&self, buf: &mut PacketBuffer) {
        buf.append_u8(self.command)
            .append_u8(self.kind)
            .append_u8(self.sequence)
            .append_u8(self.length);
    }
}

// ---------------------------------------------------------------------------
// PacketBuffer
// ---------------------------------------------------------------------------

#[test]
fn buffer_starts_empty() {
    let buf = PacketBuffer::new();
    assert!(buf.is_empty());
    assert_eq!(buf.len(), 0);
}

#[test]
fn buffer_struct_then_payload_then_alignment() {
    let mut buf = PacketBuffer::with_capacity(8);
    buf.append(&Header {
        command: 0x05,
        kind: 0x20,
        sequence: 0,
        length: 1,
    })
    .append_u8(0x04);
    let pad = buf.padding_to(4);
    buf.pad(pad);

    assert_eq!(buf.as_slice(), &[0x05, 0x20, 0x00, 0x01, 0x04, 0, 0, 0]);
}

#[test]
fn buffer_pad_zero_is_noop() {
    let mut buf = PacketBuffer::new();
    buf.append_bytes(&[1, 2]).pad(0);
    assert_eq!(buf.into_inner(), vec![1, 2]);
}

#[test]
fn static_padding_matches_free_function() {
    for size in 0..32 {
        assert_eq!(PacketBuffer::padding(size, 4), padding(size, 4));
    }
}

#[test]
fn radio_header_padding_is_two() {
    // TxWi + 802.11 header + QoS control
    assert_eq!(padding(20 + 24 + 2, 4), 2);
}

// ---------------------------------------------------------------------------
// PacketReader
// ---------------------------------------------------------------------------

#[test]
fn reader_reads_header_fields() -> Result<(), ProtocolError> {
    let mut reader = PacketReader::new(&[0x20, 0x00, 0x07, 0x0E]);
    let header: [u8; 4] = reader.read_array()?;
    assert_eq!(header, [0x20, 0x00, 0x07, 0x0E]);
    assert_eq!(reader.remaining(), 0);
    Ok(())
}

#[test]
fn reader_empty_fails() {
    let mut reader = PacketReader::new(&[]);
    assert_eq!(reader.read_u8(), Err(ProtocolError::truncated(0, 1, 0)));
}

#[test]
fn reader_read_bytes_past_end_keeps_position() -> Result<(), ProtocolError> {
    let mut reader = PacketReader::new(&[1, 2, 3]);
    reader.read_u8()?;
    assert_eq!(reader.read_bytes(3), Err(ProtocolError::truncated(1, 3, 2)));
    assert_eq!(reader.rest(), &[2, 3]);
    Ok(())
}

#[test]
fn reader_signed_extremes() -> Result<(), ProtocolError> {
    let mut reader = PacketReader::new(&[0x00, 0x80, 0xFF, 0x7F]);
    assert_eq!(reader.read_i16_le()?, i16::MIN);
    assert_eq!(reader.read_i16_le()?, i16::MAX);
    Ok(())
}

#[test]
fn reader_u32_le() -> Result<(), ProtocolError> {
    let mut reader = PacketReader::new(&[0x78, 0x56, 0x34, 0x12]);
    assert_eq!(reader.read_u32_le()?, 0x1234_5678);
    Ok(())
}

proptest! {
    #[test]
    fn prop_padding_aligns(size in 0usize..10_000, shift in 0u32..6) {
        let align = 1usize << shift;
        let pad = padding(size, align);
        prop_assert!(pad < align);
        prop_assert_eq!((size + pad) % align, 0);
    }

    #[test]
    fn prop_padded_buffer_is_aligned(payload in proptest::collection::vec(any::<u8>(), 0..128)) {
        let mut buf = PacketBuffer::new();
        buf.append_bytes(&payload);
        let pad = buf.padding_to(4);
        buf.pad(pad);
        prop_assert_eq!(buf.len() % 4, 0);
        prop_assert_eq!(&buf.as_slice()[..payload.len()], payload.as_slice());
    }

    #[test]
    fn prop_reader_never_panics(
        data in proptest::collection::vec(any::<u8>(), 0..32),
        reads in proptest::collection::vec(0usize..8, 0..16),
    ) {
        let mut reader = PacketReader::new(&data);
        for n in reads {
            let before = reader.remaining();
            match reader.read_bytes(n) {
                Ok(bytes) => prop_assert_eq!(bytes.len(), n),
                Err(_) => prop_assert_eq!(reader.remaining(), before),
            }
        }
    }
}
