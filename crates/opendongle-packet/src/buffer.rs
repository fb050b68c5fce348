//! Outbound packet assembly.

/// A fixed-size structure with a defined wire layout.
///
/// Implementors must write exactly [`WireStruct::SIZE`] bytes in
/// [`WireStruct::write_to`]. Multi-byte fields are little-endian.
pub trait WireStruct {
    /// Serialized size in bytes.
    const SIZE: usize;

    /// Append the wire representation to `buf`.
    fn write_to(&self, buf: &mut PacketBuffer);
}

/// Number of zero bytes needed to grow `size` to a multiple of `align`.
///
/// `align` must be non-zero; the dongle only ever uses powers of two.
pub const fn padding(size: usize, align: usize) -> usize {
    (align - size % align) % align
}

/// Growable byte buffer for one outbound packet.
///
/// A buffer is built once per send and handed to the transport. Appending
/// never fails.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PacketBuffer {
    bytes: Vec<u8>,
}

impl PacketBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Append a typed wire structure.
    pub fn append<T: WireStruct>(&mut self, value: &T) -> &mut Self {
        let start = self.bytes.len();
        value.write_to(self);
        debug_assert_eq!(
            self.bytes.len() - start,
            T::SIZE,
            "wire structure wrote an unexpected number of bytes"
        );
        self
    }

    pub fn append_u8(&mut self, value: u8) -> &mut Self {
        self.bytes.push(value);
        self
    }

    pub fn append_u16_le(&mut self, value: u16) -> &mut Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn append_i16_le(&mut self, value: i16) -> &mut Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn append_u32_le(&mut self, value: u32) -> &mut Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn append_u32_be(&mut self, value: u32) -> &mut Self {
        self.bytes.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn append_bytes(&mut self, data: &[u8]) -> &mut Self {
        self.bytes.extend_from_slice(data);
        self
    }

    /// Append `count` zero bytes.
    pub fn pad(&mut self, count: usize) -> &mut Self {
        self.bytes.resize(self.bytes.len() + count, 0);
        self
    }

    /// Padding needed to align `size` to `align`. Same as [`padding`].
    pub fn padding(size: usize, align: usize) -> usize {
        padding(size, align)
    }

    /// Padding needed to align the current length to `align`.
    pub fn padding_to(&self, align: usize) -> usize {
        padding(self.bytes.len(), align)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.bytes
    }
}

impl AsRef<[u8]> for PacketBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair {
        a: u8,
        b: u16,
    }

    impl WireStruct for Pair {
        const SIZE: usize = 3;

        fn write_to(&self, buf: &mut PacketBuffer) {
            buf.append_u8(self.a).append_u16_le(self.b);
        }
    }

    #[test]
    fn test_append_struct_is_packed_little_endian() {
        let mut buf = PacketBuffer::new();
        buf.append(&Pair { a: 0x01, b: 0x1234 });
        assert_eq!(buf.as_slice(), &[0x01, 0x34, 0x12]);
    }

    #[test]
    fn test_padding_values() {
        assert_eq!(padding(0, 4), 0);
        assert_eq!(padding(1, 4), 3);
        assert_eq!(padding(2, 4), 2);
        assert_eq!(padding(3, 4), 1);
        assert_eq!(padding(4, 4), 0);
        assert_eq!(padding(46, 4), 2);
    }

    #[test]
    fn test_pad_appends_zeros() {
        let mut buf = PacketBuffer::new();
        buf.append_u8(0xFF).pad(3);
        assert_eq!(buf.as_slice(), &[0xFF, 0, 0, 0]);
        assert_eq!(buf.padding_to(4), 0);
    }

    #[test]
    fn test_big_endian_word() {
        let mut buf = PacketBuffer::new();
        buf.append_u32_be(2);
        assert_eq!(buf.into_inner(), vec![0, 0, 0, 2]);
    }
}
