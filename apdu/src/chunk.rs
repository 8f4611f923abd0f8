// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Chunked transfer codec for fields exceeding a single message.
//!
//! Oversized payloads (inline datums, reference scripts) are split into an
//! inline head, sent within the message initiating the field, followed by a
//! series of continuation chunks each encoded as:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                      CHUNK_LEN (u32, BE)                      |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! /                             CHUNK                             /
//! /                  (CHUNK_LEN bytes, <= MAX_CHUNK_SIZE)         /
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```

use byteorder::{BigEndian, ByteOrder};

use crate::ApduError;

/// Maximum chunk size in bytes, shared by datum and reference script chunking
pub const MAX_CHUNK_SIZE: usize = 240;

/// Length of the chunk length prefix
pub const CHUNK_PREFIX_LEN: usize = 4;

/// Payload split into an inline head and continuation chunks
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Chunked<'a> {
    data: &'a [u8],
    chunk_size: usize,
}

impl<'a> Chunked<'a> {
    /// Split `data` using the provided maximum chunk size
    pub fn new(data: &'a [u8], chunk_size: usize) -> Self {
        Self {
            data,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Total payload length in bytes
    pub fn total_len(&self) -> usize {
        self.data.len()
    }

    /// Inline head, at most one chunk
    pub fn head(&self) -> &'a [u8] {
        &self.data[..self.data.len().min(self.chunk_size)]
    }

    /// Continuation chunks following the head
    pub fn chunks(&self) -> core::slice::Chunks<'a, u8> {
        self.data[self.head().len()..].chunks(self.chunk_size)
    }

    /// Number of continuation chunks
    pub fn num_chunks(&self) -> usize {
        let rest = self.data.len() - self.head().len();
        (rest + self.chunk_size - 1) / self.chunk_size
    }

    /// Length-prefixed continuation chunk payloads
    pub fn encoded_chunks(&self) -> impl Iterator<Item = Vec<u8>> + 'a {
        self.chunks().map(encode_chunk)
    }

    /// Reassemble head and continuation chunks
    pub fn join(&self) -> Vec<u8> {
        let mut v = self.head().to_vec();
        self.chunks().for_each(|c| v.extend_from_slice(c));
        v
    }
}

/// Encode a continuation chunk with its length prefix
pub fn encode_chunk(chunk: &[u8]) -> Vec<u8> {
    let mut buff = vec![0u8; CHUNK_PREFIX_LEN + chunk.len()];

    BigEndian::write_u32(&mut buff[..CHUNK_PREFIX_LEN], chunk.len() as u32);
    buff[CHUNK_PREFIX_LEN..].copy_from_slice(chunk);

    buff
}

/// Decode a length-prefixed continuation chunk
pub fn decode_chunk(buff: &[u8]) -> Result<&[u8], ApduError> {
    if buff.len() < CHUNK_PREFIX_LEN {
        return Err(ApduError::InvalidLength);
    }

    let n = BigEndian::read_u32(&buff[..CHUNK_PREFIX_LEN]) as usize;
    if n > MAX_CHUNK_SIZE || buff.len() != CHUNK_PREFIX_LEN + n {
        return Err(ApduError::InvalidLength);
    }

    Ok(&buff[CHUNK_PREFIX_LEN..])
}

/// Split a hex-encoded payload into an inline head and encoded continuation chunks,
/// the first `2 * chunk_size` hex characters forming the head
pub fn split_hex(s: &str, chunk_size: usize) -> Result<(Vec<u8>, Vec<Vec<u8>>), hex::FromHexError> {
    let data = hex::decode(s)?;
    let c = Chunked::new(&data, chunk_size);

    Ok((c.head().to_vec(), c.encoded_chunks().collect()))
}
