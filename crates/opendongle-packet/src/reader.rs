//! Bounds-checked parsing of inbound packets.

use opendongle_errors::{ProtocolError, ProtocolResult};

/// Cursor over a borrowed packet.
///
/// Every read checks the remaining length first and reports
/// [`ProtocolError::Truncated`] rather than reading past the end.
#[derive(Debug, Clone)]
pub struct PacketReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> PacketReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Bytes not yet consumed.
    pub fn rest(&self) -> &'a [u8] {
        self.data.get(self.position..).unwrap_or(&[])
    }

    pub fn read_u8(&mut self) -> ProtocolResult<u8> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    pub fn read_u16_le(&mut self) -> ProtocolResult<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_i16_le(&mut self) -> ProtocolResult<i16> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32_le(&mut self) -> ProtocolResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_bytes(&mut self, count: usize) -> ProtocolResult<&'a [u8]> {
        let bytes = self
            .position
            .checked_add(count)
            .and_then(|end| self.data.get(self.position..end))
            .ok_or_else(|| ProtocolError::truncated(self.position, count, self.remaining()))?;
        self.position += count;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> ProtocolResult<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Advance past `count` bytes, clamped to the end of the packet.
    pub fn skip(&mut self, count: usize) {
        self.position = self.position.saturating_add(count).min(self.data.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_reads() -> Result<(), ProtocolError> {
        let mut reader = PacketReader::new(&[0x01, 0x34, 0x12, 0xFF, 0xFF]);
        assert_eq!(reader.read_u8()?, 0x01);
        assert_eq!(reader.read_u16_le()?, 0x1234);
        assert_eq!(reader.read_i16_le()?, -1);
        assert_eq!(reader.remaining(), 0);
        Ok(())
    }

    #[test]
    fn test_truncated_read_reports_offset() {
        let mut reader = PacketReader::new(&[0xAA]);
        assert_eq!(
            reader.read_u16_le(),
            Err(ProtocolError::truncated(0, 2, 1))
        );
        // failed read does not advance
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_skip_clamps() {
        let mut reader = PacketReader::new(&[1, 2, 3]);
        reader.skip(10);
        assert_eq!(reader.remaining(), 0);
        assert!(reader.rest().is_empty());
    }
}
