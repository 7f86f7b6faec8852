//! Wire framing and session primitives for the framelink protocol.
//!
//! This crate defines the framing layer shared by the framelink initiator
//! and responder: a fixed 13-byte binary header followed by a
//! variable-length payload.
//!
//! # Wire Format
//!
//! ```text
//! offset 0   source port     u16 big-endian
//! offset 2   dest port       u16 big-endian
//! offset 4   sequence        u32 big-endian
//! offset 8   ack flag        u8
//! offset 9   syn flag        u8
//! offset 10  fin flag        u8
//! offset 11  payload length  u16 big-endian
//! ```
//!
//! followed immediately by `payload length` raw bytes (no terminator on the
//! wire). Multi-byte fields are always serialized most-significant-byte
//! first so hosts of differing native endianness interoperate.
//!
//! # Example
//!
//! ```rust
//! use framelink_protocol::{Message, MessageHeader, select_response};
//!
//! let header = MessageHeader { syn: 1, sequence: 1, ..Default::default() };
//! let message = Message::with_payload(header, "hello");
//! assert_eq!(message.header.payload_len, 5);
//! assert_eq!(
//!     select_response(&message.header),
//!     "SYN received - connection was initiated"
//! );
//! ```

mod error;
mod header;
mod io;
mod response;

pub use error::{ProtocolError, ProtocolResult};
pub use header::{HEADER_SIZE, Message, MessageHeader};
pub use io::{payload_buffer, read_exact, write_all};
pub use response::select_response;
