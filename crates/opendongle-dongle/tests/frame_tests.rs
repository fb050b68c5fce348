//! Radio frame layout for outbound controller packets.

use opendongle_dongle::framing::{HEADER_SIZE, MAX_PAYLOAD};
use opendongle_dongle::{MacAddress, build_controller_frame};
use opendongle_packet::padding;
use proptest::prelude::*;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const CLIENT: MacAddress = MacAddress::new([0x7C, 0xED, 0x8D, 0x11, 0x22, 0x33]);
const DONGLE: MacAddress = MacAddress::new([0x62, 0x45, 0xB4, 0xAA, 0xBB, 0xCC]);

#[test]
fn power_on_frame_layout() -> TestResult {
    let payload = [0x05, 0x20, 0x00, 0x01, 0x00];
    let frame = build_controller_frame(1, CLIENT, DONGLE, &payload)?;

    assert_eq!(frame.len(), 64);

    // slot word, big-endian, then reserved word
    assert_eq!(&frame[0..4], &[0, 0, 0, 0]);
    assert_eq!(&frame[4..8], &[0, 0, 0, 0]);

    // TxWi: OFDM, ACK, MPDU = 24 + 2 + 5
    assert_eq!(&frame[8..12], &[0x00, 0x00, 0x00, 0x20]);
    assert_eq!(&frame[12..16], &[0x01, 0x00, 31, 0x00]);
    assert!(frame[16..28].iter().all(|b| *b == 0));

    // 802.11: QoS data, from-DS, duration 144
    assert_eq!(&frame[28..30], &[0x88, 0x02]);
    assert_eq!(&frame[30..32], &[144, 0]);
    assert_eq!(&frame[32..38], CLIENT.as_bytes());
    assert_eq!(&frame[38..44], DONGLE.as_bytes());
    assert_eq!(&frame[44..50], DONGLE.as_bytes());
    assert_eq!(&frame[50..52], &[0, 0]);

    // QoS control and frame padding
    assert_eq!(&frame[52..56], &[0, 0, 0, 0]);

    assert_eq!(&frame[56..61], &payload);
    assert_eq!(&frame[61..64], &[0, 0, 0]);
    Ok(())
}

#[test]
fn slot_word_is_big_endian() -> TestResult {
    let frame = build_controller_frame(16, CLIENT, DONGLE, &[0; 4])?;
    assert_eq!(&frame[0..4], &[0, 0, 0, 15]);
    Ok(())
}

#[test]
fn aligned_payload_gets_no_data_padding() -> TestResult {
    let frame = build_controller_frame(2, CLIENT, DONGLE, &[0xAB; 8])?;
    assert_eq!(frame.len(), HEADER_SIZE + 8);
    Ok(())
}

#[test]
fn empty_payload() -> TestResult {
    let frame = build_controller_frame(2, CLIENT, DONGLE, &[])?;
    assert_eq!(frame.len(), HEADER_SIZE);
    assert_eq!(&frame[12..16], &[0x01, 0x00, 26, 0x00]);
    Ok(())
}

proptest! {
    #[test]
    fn prop_frame_is_word_aligned(
        wcid in 1u8..=16,
        payload in proptest::collection::vec(any::<u8>(), 0..512),
    ) {
        let frame = build_controller_frame(wcid, CLIENT, DONGLE, &payload)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        prop_assert_eq!(frame.len() % 4, 0);
        prop_assert_eq!(frame.len(), HEADER_SIZE + payload.len() + padding(payload.len(), 4));
        prop_assert_eq!(&frame[HEADER_SIZE..HEADER_SIZE + payload.len()], payload.as_slice());
        prop_assert!(frame[HEADER_SIZE + payload.len()..].iter().all(|b| *b == 0));
        prop_assert_eq!(&frame[0..4], &u32::from(wcid - 1).to_be_bytes());

        let mpdu = u16::from_le_bytes([frame[14], frame[15]]);
        prop_assert_eq!(usize::from(mpdu), 26 + payload.len());
    }

    #[test]
    fn prop_oversized_payload_rejected(extra in 1usize..64) {
        let payload = vec![0u8; MAX_PAYLOAD + extra];
        prop_assert!(build_controller_frame(1, CLIENT, DONGLE, &payload).is_err());
    }
}
