//! Radio frame structures: transmit descriptor, 802.11 data header and QoS
//! control, written bit-exact in little-endian.

use core::fmt;
use core::str::FromStr;

use opendongle_packet::{PacketBuffer, WireStruct};
use serde::{Deserialize, Serialize};

/// 48-bit hardware address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl FromStr for MacAddress {
    type Err = String;

    /// Parses `aa:bb:cc:dd:ee:ff` (also accepts `-` as separator).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 6];
        let mut parts = s.split([':', '-']);
        for byte in &mut bytes {
            let part = parts
                .next()
                .ok_or_else(|| format!("MAC address '{s}' has fewer than 6 octets"))?;
            *byte = u8::from_str_radix(part, 16)
                .map_err(|e| format!("invalid octet '{part}' in MAC address '{s}': {e}"))?;
        }
        if parts.next().is_some() {
            return Err(format!("MAC address '{s}' has more than 6 octets"));
        }
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for MacAddress {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MacAddress> for String {
    fn from(value: MacAddress) -> Self {
        value.to_string()
    }
}

/// Modulation in the TxWi rate field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum PhyType {
    #[default]
    Cck = 0,
    Ofdm = 1,
    HtMixed = 2,
    HtGreenfield = 3,
    Vht = 4,
}

/// Transmit descriptor (TxWi), 20 bytes.
///
/// | Word | Bits  | Field                                         |
/// |------|-------|-----------------------------------------------|
/// | 0    | 0-15  | flags                                         |
/// | 0    | 16-21 | MCS                                           |
/// | 0    | 22    | LDPC                                          |
/// | 0    | 23-24 | bandwidth                                     |
/// | 0    | 25    | short guard interval                          |
/// | 0    | 26    | STBC                                          |
/// | 0    | 29-31 | PHY type                                      |
/// | 1    | 0     | ACK requested                                 |
/// | 1    | 1     | NSEQ                                          |
/// | 1    | 2-7   | block-ack window                              |
/// | 1    | 8-15  | wcid                                          |
/// | 1    | 16-29 | MPDU byte count                               |
/// | 1    | 30    | TXBF PT SCA                                   |
/// | 1    | 31    | TIM                                           |
///
/// followed by `iv`, `eiv` (u32 each) and `aid`, `tx_stream`, `ctl2`,
/// `pkt_id` (u8 each).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TxWi {
    pub flags: u16,
    pub mcs: u8,
    pub ldpc: bool,
    pub bandwidth: u8,
    pub short_gi: bool,
    pub stbc: bool,
    pub phy_type: PhyType,
    pub ack: bool,
    pub nseq: bool,
    pub ba_window_size: u8,
    pub wcid: u8,
    pub mpdu_byte_count: u16,
    pub txbf_pt_sca: bool,
    pub tim: bool,
    pub iv: u32,
    pub eiv: u32,
    pub aid: u8,
    pub tx_stream: u8,
    pub ctl2: u8,
    pub pkt_id: u8,
}

impl TxWi {
    pub const SIZE: usize = 20;

    /// Largest value of the 14-bit MPDU byte count.
    pub const MAX_MPDU_BYTE_COUNT: u16 = 0x3FFF;

    fn rate(&self) -> u16 {
        u16::from(self.mcs & 0x3F)
            | u16::from(self.ldpc) << 6
            | u16::from(self.bandwidth & 0x03) << 7
            | u16::from(self.short_gi) << 9
            | u16::from(self.stbc) << 10
            | u16::from(self.phy_type as u8 & 0x07) << 13
    }

    fn word0(&self) -> u32 {
        u32::from(self.flags) | u32::from(self.rate()) << 16
    }

    fn word1(&self) -> u32 {
        u32::from(self.ack)
            | u32::from(self.nseq) << 1
            | u32::from(self.ba_window_size & 0x3F) << 2
            | u32::from(self.wcid) << 8
            | u32::from(self.mpdu_byte_count & Self::MAX_MPDU_BYTE_COUNT) << 16
            | u32::from(self.txbf_pt_sca) << 30
            | u32::from(self.tim) << 31
    }
}

impl WireStruct for TxWi {
    const SIZE: usize = TxWi::SIZE;

    fn write_to(&self, buf: &mut PacketBuffer) {
        buf.append_u32_le(self.word0())
            .append_u32_le(self.word1())
            .append_u32_le(self.iv)
            .append_u32_le(self.eiv)
            .append_u8(self.aid)
            .append_u8(self.tx_stream)
            .append_u8(self.ctl2)
            .append_u8(self.pkt_id);
    }
}

/// 802.11 frame type: data.
pub const WLAN_TYPE_DATA: u8 = 2;
/// 802.11 data subtype: QoS data.
pub const WLAN_SUBTYPE_QOS_DATA: u8 = 8;

/// 802.11 frame control field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameControl {
    pub protocol_version: u8,
    pub frame_type: u8,
    pub subtype: u8,
    pub to_ds: bool,
    pub from_ds: bool,
    pub more_fragments: bool,
    pub retry: bool,
    pub power_management: bool,
    pub more_data: bool,
    pub protected: bool,
    pub order: bool,
}

impl FrameControl {
    pub fn bits(&self) -> u16 {
        u16::from(self.protocol_version & 0x03)
            | u16::from(self.frame_type & 0x03) << 2
            | u16::from(self.subtype & 0x0F) << 4
            | u16::from(self.to_ds) << 8
            | u16::from(self.from_ds) << 9
            | u16::from(self.more_fragments) << 10
            | u16::from(self.retry) << 11
            | u16::from(self.power_management) << 12
            | u16::from(self.more_data) << 13
            | u16::from(self.protected) << 14
            | u16::from(self.order) << 15
    }
}

/// 802.11 data frame header, 24 bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WlanFrame {
    pub frame_control: FrameControl,
    pub duration: u16,
    pub destination: MacAddress,
    pub source: MacAddress,
    pub bssid: MacAddress,
    pub sequence_control: u16,
}

impl WlanFrame {
    pub const SIZE: usize = 24;
}

impl WireStruct for WlanFrame {
    const SIZE: usize = WlanFrame::SIZE;

    fn write_to(&self, buf: &mut PacketBuffer) {
        buf.append_u16_le(self.frame_control.bits())
            .append_u16_le(self.duration)
            .append_bytes(self.destination.as_bytes())
            .append_bytes(self.source.as_bytes())
            .append_bytes(self.bssid.as_bytes())
            .append_u16_le(self.sequence_control);
    }
}

/// QoS control field, 2 bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QosFrame {
    pub qos_control: u16,
}

impl QosFrame {
    pub const SIZE: usize = 2;
}

impl WireStruct for QosFrame {
    const SIZE: usize = QosFrame::SIZE;

    fn write_to(&self, buf: &mut PacketBuffer) {
        buf.append_u16_le(self.qos_control);
    }
}
