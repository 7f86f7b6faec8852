//! Exact-length read/write over a duplex byte channel.
//!
//! A connected stream may deliver or accept fewer bytes than requested per
//! call. These helpers absorb short reads and short writes so callers
//! always move whole headers and payloads.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{ProtocolError, ProtocolResult};

/// Reads exactly `buf.len()` bytes from the channel.
///
/// Accumulates across as many underlying reads as needed. A zero-byte read
/// before the buffer is full means the peer closed its write side and
/// fails with [`ProtocolError::ConnectionClosed`]; partial progress is
/// discarded, since a session cannot resume a short read.
pub async fn read_exact<R>(reader: &mut R, buf: &mut [u8]) -> ProtocolResult<()>
where
    R: AsyncRead + Unpin,
{
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..]).await?;
        if n == 0 {
            return Err(ProtocolError::ConnectionClosed {
                expected: buf.len(),
                received: filled,
            });
        }
        filled += n;
    }
    Ok(())
}

/// Writes all of `bytes` to the channel and flushes it.
///
/// On success every byte has been handed to the channel; a short write is
/// retried until the remainder is accepted.
pub async fn write_all<W>(writer: &mut W, bytes: &[u8]) -> ProtocolResult<()>
where
    W: AsyncWrite + Unpin,
{
    let mut written = 0;
    while written < bytes.len() {
        let n = writer.write(&bytes[written..]).await?;
        if n == 0 {
            return Err(ProtocolError::Io(std::io::Error::new(
                std::io::ErrorKind::WriteZero,
                "channel accepted zero bytes",
            )));
        }
        written += n;
    }
    writer.flush().await?;
    Ok(())
}

/// Allocates a zeroed payload buffer of exactly `len` bytes.
///
/// Allocation failure surfaces as [`ProtocolError::Allocation`] instead of
/// aborting the process.
pub fn payload_buffer(len: usize) -> ProtocolResult<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| ProtocolError::Allocation { bytes: len })?;
    buf.resize(len, 0);
    Ok(buf)
}
