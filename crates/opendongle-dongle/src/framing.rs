//! Outbound controller frame assembly.

use opendongle_errors::{ProtocolError, Result};
use opendongle_packet::{PacketBuffer, padding};

use crate::radio::{
    FrameControl, MacAddress, PhyType, QosFrame, TxWi, WLAN_SUBTYPE_QOS_DATA, WLAN_TYPE_DATA,
    WlanFrame,
};
use crate::registry::slot_index;

/// Duration field used for every controller data frame.
pub const FRAME_DURATION: u16 = 144;

/// Length of the slot word plus reserved word ahead of the TxWi.
pub const PREFIX_SIZE: usize = 8;

/// TxWi plus the 802.11 and QoS headers, before alignment.
const RADIO_HEADER_SIZE: usize = TxWi::SIZE + WlanFrame::SIZE + QosFrame::SIZE;

/// Zero bytes aligning the radio headers to four bytes.
const HEADER_PADDING: usize = padding(RADIO_HEADER_SIZE, 4);

/// Bytes between the start of the frame and the start of the payload.
pub const HEADER_SIZE: usize = PREFIX_SIZE + RADIO_HEADER_SIZE + HEADER_PADDING;

/// Largest GIP payload that fits the 14-bit MPDU byte count.
pub const MAX_PAYLOAD: usize =
    TxWi::MAX_MPDU_BYTE_COUNT as usize - WlanFrame::SIZE - QosFrame::SIZE;

/// Wraps a GIP payload for the client in slot `wcid`.
///
/// The slot index (`wcid - 1`) leads the frame as a big-endian word. The
/// 802.11 header is addressed from the dongle to the client with the
/// from-DS bit set. Both the header block and the payload are padded to a
/// four-byte boundary.
pub fn build_controller_frame(
    wcid: u8,
    client: MacAddress,
    dongle: MacAddress,
    payload: &[u8],
) -> Result<Vec<u8>> {
    slot_index(wcid)?;
    if payload.len() > MAX_PAYLOAD {
        return Err(ProtocolError::Oversized {
            size: payload.len(),
            max: MAX_PAYLOAD,
        }
        .into());
    }

    let mpdu_len = WlanFrame::SIZE + QosFrame::SIZE + payload.len();
    let txwi = TxWi {
        phy_type: PhyType::Ofdm,
        ack: true,
        mpdu_byte_count: u16::try_from(mpdu_len).unwrap_or(TxWi::MAX_MPDU_BYTE_COUNT),
        ..TxWi::default()
    };
    let header = WlanFrame {
        frame_control: FrameControl {
            frame_type: WLAN_TYPE_DATA,
            subtype: WLAN_SUBTYPE_QOS_DATA,
            from_ds: true,
            ..FrameControl::default()
        },
        duration: FRAME_DURATION,
        destination: client,
        source: dongle,
        bssid: dongle,
        sequence_control: 0,
    };

    let total = HEADER_SIZE + payload.len() + padding(payload.len(), 4);

    let mut buf = PacketBuffer::with_capacity(total);
    buf.append_u32_be(u32::from(wcid) - 1)
        .append_u32_le(0)
        .append(&txwi)
        .append(&header)
        .append(&QosFrame::default())
        .pad(HEADER_PADDING)
        .append_bytes(payload)
        .pad(padding(payload.len(), 4));

    debug_assert_eq!(buf.len(), total);
    Ok(buf.into_inner())
}
