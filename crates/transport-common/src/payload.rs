//! Bit-exact packing and unpacking of parameter payloads.
//!
//! IPMI parameter data is a little-endian bit stream: fields fill each
//! byte starting from the least significant bit, and multi-byte fields
//! land in little-endian byte order. [`Payload`] implements both
//! directions over one buffer so request decoding can assert that every
//! bit was consumed.

/// Raised when a request is too short for the field being unpacked.
///
/// Length errors are distinct from field-value errors: they always map to
/// the request-data-length-invalid completion code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnpackError;

/// A parameter payload with a bit-granular read/write cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    data: Vec<u8>,
    /// Number of valid bits in `data`.
    bit_len: usize,
    /// Number of bits consumed by unpack calls.
    read_bits: usize,
    /// When set, leftover request bytes are not treated as an error.
    pub trailing_ok: bool,
}

impl Payload {
    /// Creates an empty payload for packing a response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps raw request bytes for unpacking.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        let bit_len = data.len() * 8;
        Self {
            data,
            bit_len,
            read_bits: 0,
            trailing_ok: false,
        }
    }

    /// Consumes the payload, returning the packed bytes.
    ///
    /// A partially filled trailing byte is padded with zero bits.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Number of packed bytes (including a partial trailing byte).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when nothing has been packed.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Appends `width` bits of `value`, LSB first.
    pub fn pack_bits(&mut self, width: usize, value: u32) {
        debug_assert!(width <= 32);
        for i in 0..width {
            if self.bit_len % 8 == 0 {
                self.data.push(0);
            }
            if (value >> i) & 1 != 0 {
                self.data[self.bit_len / 8] |= 1 << (self.bit_len % 8);
            }
            self.bit_len += 1;
        }
    }

    /// Appends a full byte.
    pub fn pack_u8(&mut self, value: u8) {
        self.pack_bits(8, u32::from(value));
    }

    /// Appends a 16-bit value in little-endian order.
    pub fn pack_u16_le(&mut self, value: u16) {
        self.pack_bits(16, u32::from(value));
    }

    /// Appends a byte slice.
    pub fn pack_bytes(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.pack_u8(*b);
        }
    }

    /// Reads `width` bits, LSB first.
    pub fn unpack_bits(&mut self, width: usize) -> Result<u32, UnpackError> {
        debug_assert!(width <= 32);
        if self.read_bits + width > self.bit_len {
            return Err(UnpackError);
        }
        let mut value = 0u32;
        for i in 0..width {
            let bit = self.read_bits + i;
            if (self.data[bit / 8] >> (bit % 8)) & 1 != 0 {
                value |= 1 << i;
            }
        }
        self.read_bits += width;
        Ok(value)
    }

    /// Reads one full byte.
    pub fn unpack_u8(&mut self) -> Result<u8, UnpackError> {
        Ok(self.unpack_bits(8)? as u8)
    }

    /// Reads a 16-bit little-endian value.
    pub fn unpack_u16_le(&mut self) -> Result<u16, UnpackError> {
        Ok(self.unpack_bits(16)? as u16)
    }

    /// Reads one bit as a flag.
    pub fn unpack_bool(&mut self) -> Result<bool, UnpackError> {
        Ok(self.unpack_bits(1)? != 0)
    }

    /// Reads a fixed-size byte array.
    pub fn unpack_array<const N: usize>(&mut self) -> Result<[u8; N], UnpackError> {
        let mut out = [0u8; N];
        for b in out.iter_mut() {
            *b = self.unpack_u8()?;
        }
        Ok(out)
    }

    /// True when every request bit was consumed (or trailing data was
    /// explicitly allowed).
    pub fn fully_unpacked(&self) -> bool {
        self.trailing_ok || self.read_bits == self.bit_len
    }

    /// Asserts the request was consumed exactly.
    pub fn finish(&self) -> Result<(), UnpackError> {
        if self.fully_unpacked() {
            Ok(())
        } else {
            Err(UnpackError)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_sub_byte_fields() {
        // 2-bit status followed by 6 reserved bits lands in one byte.
        let mut p = Payload::new();
        p.pack_bits(2, 0b10);
        p.pack_bits(6, 0);
        assert_eq!(p.into_bytes(), vec![0x02]);
    }

    #[test]
    fn test_pack_vlan_layout() {
        // 12-bit id + 3 reserved + enable bit = two little-endian bytes.
        let mut p = Payload::new();
        p.pack_bits(12, 100);
        p.pack_bits(3, 0);
        p.pack_bits(1, 1);
        assert_eq!(p.into_bytes(), vec![100, 0x80]);
    }

    #[test]
    fn test_unpack_vlan_layout() {
        let mut p = Payload::from_bytes(vec![100, 0x80]);
        assert_eq!(p.unpack_bits(12).unwrap(), 100);
        assert_eq!(p.unpack_bits(3).unwrap(), 0);
        assert!(p.unpack_bool().unwrap());
        assert!(p.fully_unpacked());
    }

    #[test]
    fn test_u16_le_roundtrip() {
        let mut p = Payload::new();
        p.pack_u16_le(0x8064);
        let mut q = Payload::from_bytes(p.into_bytes());
        assert_eq!(q.unpack_u16_le().unwrap(), 0x8064);
    }

    #[test]
    fn test_short_data_is_length_error() {
        let mut p = Payload::from_bytes(vec![0x01]);
        assert_eq!(p.unpack_u16_le(), Err(UnpackError));
    }

    #[test]
    fn test_trailing_data_fails_finish() {
        let mut p = Payload::from_bytes(vec![0x01, 0x02]);
        p.unpack_u8().unwrap();
        assert_eq!(p.finish(), Err(UnpackError));
    }

    #[test]
    fn test_trailing_ok_escape() {
        let mut p = Payload::from_bytes(vec![0x01, 0x02]);
        p.trailing_ok = true;
        assert!(p.fully_unpacked());
    }

    #[test]
    fn test_unpack_array() {
        let mut p = Payload::from_bytes(vec![1, 2, 3, 4]);
        let arr: [u8; 4] = p.unpack_array().unwrap();
        assert_eq!(arr, [1, 2, 3, 4]);
        assert!(p.finish().is_ok());
    }
}
