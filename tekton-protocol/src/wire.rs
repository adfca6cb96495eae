//! Inbound payload field readers and transport fault taxonomy
//!
//! Handlers read fixed-offset little-endian fields out of the packet
//! payload. The readers are fallible so a truncated packet can be
//! rejected instead of read out of bounds.

/// Faults the transport layer can report for an inbound packet
///
/// The transport owns framing, CRC and length enforcement; this core
/// only maps the fault to a response code and resets for the next
/// packet. Faults are never retried board-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Packet reception stalled past the receive deadline
    Timeout,
    /// CRC check failed
    CrcMismatch,
    /// Packet exceeded the maximum length
    Oversize,
    /// Line noise outside a frame
    Noise,
    /// Receive buffer overflowed
    Overflow,
}

/// Read a u8 at `offset`
pub fn read_u8(payload: &[u8], offset: usize) -> Option<u8> {
    payload.get(offset).copied()
}

/// Read a little-endian u16 at `offset`
pub fn read_u16(payload: &[u8], offset: usize) -> Option<u16> {
    let bytes = payload.get(offset..offset + 2)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Read a little-endian i16 at `offset`
pub fn read_i16(payload: &[u8], offset: usize) -> Option<i16> {
    read_u16(payload, offset).map(|v| v as i16)
}

/// Read a little-endian u32 at `offset`
pub fn read_u32(payload: &[u8], offset: usize) -> Option<u32> {
    let bytes = payload.get(offset..offset + 4)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_read_u16_le() {
        let payload = [0x00, 0x34, 0x12];
        assert_eq!(read_u16(&payload, 1), Some(0x1234));
    }

    #[test]
    fn test_read_i16_sign() {
        let payload = [0xFE, 0xFF];
        assert_eq!(read_i16(&payload, 0), Some(-2));
    }

    #[test]
    fn test_truncated_reads_fail() {
        let payload = [0x01, 0x02];
        assert_eq!(read_u16(&payload, 1), None);
        assert_eq!(read_u32(&payload, 0), None);
        assert_eq!(read_u8(&payload, 2), None);
    }

    proptest! {
        #[test]
        fn prop_u32_roundtrip(value: u32, prefix in 0usize..4) {
            let mut payload = [0u8; 8];
            payload[prefix..prefix + 4].copy_from_slice(&value.to_le_bytes());
            prop_assert_eq!(read_u32(&payload, prefix), Some(value));
        }
    }
}
