//! UDP transport with GELF chunking
//!
//! Datagram delivery is fire-and-forget: no acknowledgment, no retry on
//! loss. Events larger than the configured chunk size are split into
//! numbered chunks the collector reassembles by shared message id.

use super::{Transport, TransportConfig};
use crate::core::{GelfError, Result};
use rand::RngCore;
use std::net::UdpSocket;

/// GELF chunked-message magic bytes
const CHUNK_MAGIC: [u8; 2] = [0x1e, 0x0f];

/// Magic + 8-byte message id + sequence byte + total byte
const CHUNK_HEADER_LEN: usize = 12;

/// Collectors discard messages split into more chunks than this
const MAX_CHUNKS: usize = 128;

/// Split an encoded event into GELF chunk datagrams.
///
/// Each datagram is at most `chunk_size` bytes: a 12-byte header (magic,
/// shared message id, sequence index, chunk count) followed by a slice of
/// the payload. Returns an error when the payload would need more than 128
/// chunks.
pub fn chunk_payload(
    payload: &[u8],
    chunk_size: usize,
    message_id: [u8; 8],
) -> Result<Vec<Vec<u8>>> {
    let data_per_chunk = chunk_size - CHUNK_HEADER_LEN;
    let count = payload.len().div_ceil(data_per_chunk);
    if count > MAX_CHUNKS {
        return Err(GelfError::TooManyChunks {
            required: count,
            max: MAX_CHUNKS,
        });
    }

    let mut chunks = Vec::with_capacity(count);
    for (seq, piece) in payload.chunks(data_per_chunk).enumerate() {
        let mut datagram = Vec::with_capacity(CHUNK_HEADER_LEN + piece.len());
        datagram.extend_from_slice(&CHUNK_MAGIC);
        datagram.extend_from_slice(&message_id);
        datagram.push(seq as u8);
        datagram.push(count as u8);
        datagram.extend_from_slice(piece);
        chunks.push(datagram);
    }
    Ok(chunks)
}

/// Sends encoded events as UDP datagrams, chunking oversized ones
pub struct UdpTransport {
    addr: String,
    chunk_size: usize,
    socket: Option<UdpSocket>,
}

impl UdpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self> {
        if config.chunk_size <= CHUNK_HEADER_LEN {
            return Err(GelfError::config(
                "udp",
                format!(
                    "chunk size {} leaves no room for payload (header is {} bytes)",
                    config.chunk_size, CHUNK_HEADER_LEN
                ),
            ));
        }
        Ok(Self {
            addr: config.addr(),
            chunk_size: config.chunk_size,
            socket: None,
        })
    }

    fn socket(&self) -> Result<&UdpSocket> {
        self.socket
            .as_ref()
            .ok_or_else(|| GelfError::transport("udp", "socket not open"))
    }
}

impl Transport for UdpTransport {
    fn open(&mut self) -> Result<()> {
        let socket = UdpSocket::bind("0.0.0.0:0")
            .map_err(|e| GelfError::transport("udp", format!("bind failed: {}", e)))?;
        socket
            .connect(&self.addr)
            .map_err(|e| GelfError::transport("udp", format!("cannot resolve '{}': {}", self.addr, e)))?;
        self.socket = Some(socket);
        Ok(())
    }

    fn send(&mut self, payload: &[u8]) -> Result<()> {
        let socket = self.socket()?;

        if payload.len() <= self.chunk_size {
            socket
                .send(payload)
                .map_err(|e| GelfError::transport("udp", e.to_string()))?;
            return Ok(());
        }

        let mut message_id = [0u8; 8];
        rand::thread_rng().fill_bytes(&mut message_id);

        for datagram in chunk_payload(payload, self.chunk_size, message_id)? {
            socket
                .send(&datagram)
                .map_err(|e| GelfError::transport("udp", e.to_string()))?;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.socket = None;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "udp"
    }
}
