//! Length framing for DNS over TCP: every message is preceded by its size as a
//! big-endian `u16`.

use crate::error::ProtocolError;

pub const FRAME_HDR_LEN: usize = 2;

pub fn frame(message: &[u8]) -> Result<Vec<u8>, ProtocolError> {
    let len: u16 = u16::try_from(message.len()).map_err(|_| ProtocolError::Oversize(message.len()))?;
    let mut buffer: Vec<u8> = Vec::with_capacity(FRAME_HDR_LEN + message.len());
    buffer.extend_from_slice(&len.to_be_bytes());
    buffer.extend_from_slice(message);
    Ok(buffer)
}
