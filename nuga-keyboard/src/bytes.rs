//! Key-code packing
//!
//! Key codes travel as 4 big-endian bytes. All codecs go through these
//! helpers so the byte order is defined in exactly one place.

use nuga_transport::protocol::keys::CODE_SIZE;

use crate::error::KeyboardError;

/// Pack 4 wire bytes into a key code
#[inline]
pub fn pack(bytes: [u8; CODE_SIZE]) -> u32 {
    u32::from_be_bytes(bytes)
}

/// Unpack a key code into its 4 wire bytes
#[inline]
pub fn unpack(code: u32) -> [u8; CODE_SIZE] {
    code.to_be_bytes()
}

/// Read `count` packed codes starting at `offset`
pub fn read_codes(buf: &[u8], offset: usize, count: usize) -> Result<Vec<u32>, KeyboardError> {
    let end = offset + count * CODE_SIZE;
    let data = buf
        .get(offset..end)
        .ok_or_else(|| KeyboardError::length("key code buffer", end, buf.len()))?;
    Ok(data
        .chunks_exact(CODE_SIZE)
        .map(|c| pack([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// Append packed codes to `out`
pub fn write_codes(codes: &[u32], out: &mut Vec<u8>) {
    out.reserve(codes.len() * CODE_SIZE);
    for &code in codes {
        out.extend_from_slice(&unpack(code));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_order() {
        assert_eq!(pack([0x00, 0x00, 0x00, 0x29]), 0x29);
        assert_eq!(pack([0x12, 0x34, 0x56, 0x78]), 0x1234_5678);
        assert_eq!(unpack(0x1234_5678), [0x12, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn test_pack_unpack_edges() {
        for code in [0, 1, 0xff, 0x100, 0x8000_0000, u32::MAX] {
            assert_eq!(pack(unpack(code)), code);
        }
    }

    #[test]
    fn test_read_codes_at_offset() {
        let mut buf = vec![0xaa; 3];
        write_codes(&[1, 0x0200_0000], &mut buf);
        assert_eq!(buf.len(), 11);
        assert_eq!(read_codes(&buf, 3, 2).unwrap(), vec![1, 0x0200_0000]);
    }

    #[test]
    fn test_read_codes_short_buffer() {
        let buf = vec![0u8; 10];
        let err = read_codes(&buf, 3, 2).unwrap_err();
        assert!(matches!(
            err,
            KeyboardError::BufferLength {
                expected: 11,
                actual: 10,
                ..
            }
        ));
    }
}
