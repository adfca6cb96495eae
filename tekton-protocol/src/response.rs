//! Outbound response construction
//!
//! A response is a status byte followed by a command-specific payload.
//! Multi-byte fields are little-endian on the wire. The builder is a
//! bounded buffer; the transport layer frames and escapes it.

use heapless::Vec;

/// Largest response body this core ever produces (EEPROM reads are the
/// widest: code + 255 data bytes)
pub const MAX_RESPONSE_PAYLOAD: usize = 256;

/// Response status byte, first byte of every reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ResponseCode {
    /// Generic malformed-packet fault (framing noise, truncation)
    PacketError = 0x80,
    /// Command accepted / query answered
    Ok = 0x81,
    /// Command queue cannot hold the action packet
    BufferOverflow = 0x82,
    /// Transport reported a CRC mismatch
    CrcMismatch = 0x83,
    /// Inbound packet exceeded the maximum length
    PacketLength = 0x84,
    /// Opcode not recognized by either dispatch path
    CmdUnsupported = 0x85,
    /// Tool bus lock or transaction timed out
    DownstreamTimeout = 0x87,
    /// One-time notification that the build was cancelled board-side
    CancelBuild = 0x89,
    /// Action rejected because an SD build is playing
    BotBuilding = 0x8A,
    /// Inbound packet reception timed out mid-packet
    PacketTimeout = 0x8C,
}

/// Builder for one outbound response
///
/// Appends saturate silently at capacity; the capacity is sized so
/// that no handler in this core can reach it with well-formed input.
#[derive(Debug, Clone, Default)]
pub struct Response {
    buf: Vec<u8, MAX_RESPONSE_PAYLOAD>,
}

impl Response {
    /// Create an empty response
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Discard any partially built content
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    /// Append the status byte
    pub fn code(&mut self, code: ResponseCode) {
        self.append_u8(code as u8);
    }

    pub fn append_u8(&mut self, value: u8) {
        let _ = self.buf.push(value);
    }

    pub fn append_u16(&mut self, value: u16) {
        let _ = self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn append_u32(&mut self, value: u32) {
        let _ = self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn append_i32(&mut self, value: i32) {
        let _ = self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Append raw bytes verbatim (tool response copy-back, names)
    pub fn append_bytes(&mut self, bytes: &[u8]) {
        let _ = self.buf.extend_from_slice(bytes);
    }

    /// Bytes built so far, status byte first
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}
