//! Fixed-layout header encoding and decoding.
//!
//! The header is serialized field-by-field in network byte order, never by
//! reinterpreting an in-memory struct, so the wire layout is identical on
//! every host and carries no padding.

use crate::error::{ProtocolError, ProtocolResult};

/// Header size in bytes (fixed, exactly 13).
pub const HEADER_SIZE: usize = 13;

/// Fixed-size binary prefix describing a message's routing, sequencing,
/// control flags, and payload length.
///
/// Flag bytes are 0 or 1 on a well-formed sender; the decoder passes other
/// values through and the accessors treat any nonzero byte as set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    /// Sender's logical endpoint.
    pub source_port: u16,
    /// Intended receiver's logical endpoint.
    pub dest_port: u16,
    /// Assigned per message by the sender; the responder only logs it.
    pub sequence: u32,
    /// Acknowledgment flag.
    pub ack: u8,
    /// Connection-initiation flag.
    pub syn: u8,
    /// Connection-termination flag.
    pub fin: u8,
    /// Exact byte length of the payload following the header.
    pub payload_len: u16,
}

impl MessageHeader {
    /// Encodes the header to its wire form (big-endian).
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        self.encode_into(&mut buf);
        buf
    }

    /// Encodes the header into an existing buffer.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is smaller than [`HEADER_SIZE`].
    pub fn encode_into(&self, buf: &mut [u8]) {
        buf[0..2].copy_from_slice(&self.source_port.to_be_bytes());
        buf[2..4].copy_from_slice(&self.dest_port.to_be_bytes());
        buf[4..8].copy_from_slice(&self.sequence.to_be_bytes());
        buf[8] = self.ack;
        buf[9] = self.syn;
        buf[10] = self.fin;
        buf[11..13].copy_from_slice(&self.payload_len.to_be_bytes());
    }

    /// Decodes a header from the first [`HEADER_SIZE`] bytes of `buf`.
    ///
    /// Bytes beyond the header length are ignored. Fails only when fewer
    /// than [`HEADER_SIZE`] bytes are supplied.
    pub fn decode(buf: &[u8]) -> ProtocolResult<Self> {
        if buf.len() < HEADER_SIZE {
            return Err(ProtocolError::TruncatedHeader {
                expected: HEADER_SIZE,
                received: buf.len(),
            });
        }
        Ok(Self {
            source_port: u16::from_be_bytes([buf[0], buf[1]]),
            dest_port: u16::from_be_bytes([buf[2], buf[3]]),
            sequence: u32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]),
            ack: buf[8],
            syn: buf[9],
            fin: buf[10],
            payload_len: u16::from_be_bytes([buf[11], buf[12]]),
        })
    }

    /// Returns true if the acknowledgment flag is set.
    #[inline]
    pub fn is_ack(&self) -> bool {
        self.ack != 0
    }

    /// Returns true if the connection-initiation flag is set.
    #[inline]
    pub fn is_syn(&self) -> bool {
        self.syn != 0
    }

    /// Returns true if the connection-termination flag is set.
    #[inline]
    pub fn is_fin(&self) -> bool {
        self.fin != 0
    }
}

/// A complete wire message: header plus raw payload bytes.
///
/// Messages are constructed fresh per send and decoded fresh per receive;
/// they carry no identity beyond their fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: MessageHeader,
    pub payload: Vec<u8>,
}

impl Message {
    /// Builds a message around a payload, setting `payload_len` to match.
    pub fn with_payload(mut header: MessageHeader, payload: impl Into<Vec<u8>>) -> Self {
        let payload = payload.into();
        header.payload_len = payload.len() as u16;
        Self { header, payload }
    }

    /// The full wire encoding: header immediately followed by the payload.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_SIZE + self.payload.len());
        buf.extend_from_slice(&self.header.encode());
        buf.extend_from_slice(&self.payload);
        buf
    }
}
