//! Core types for Stegpack frames and container chunks

use crate::constants::{CHUNK_OVERHEAD, FRAME_OVERHEAD, MAX_CHUNK_LEN};
use crate::error::StegError;
use bytes::Bytes;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// A named file payload, the record both embedding strategies carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// File name (stored as UTF-8)
    pub name: String,

    /// File contents
    pub data: Bytes,
}

impl Frame {
    /// Create a new frame
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Serialized length: magic, both length fields, name and data
    pub fn encoded_len(&self) -> usize {
        FRAME_OVERHEAD + self.name.len() + self.data.len()
    }
}

/// Result of a decode attempt
///
/// The empty value is the single failure signal for every decode path:
/// "no payload here" and "payload damaged" are reported the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageFile {
    name: Option<String>,
    data: Option<Bytes>,
}

impl ImageFile {
    /// A recovered file
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: Some(name.into()),
            data: Some(data.into()),
        }
    }

    /// The "not recognized or not recoverable" result
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when nothing was recovered
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.data.is_none()
    }

    /// Recovered file name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Recovered file contents
    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// Split into name and contents, `None` for the empty result
    pub fn into_parts(self) -> Option<(String, Bytes)> {
        match (self.name, self.data) {
            (Some(name), Some(data)) => Some((name, data)),
            _ => None,
        }
    }
}

impl From<Frame> for ImageFile {
    fn from(frame: Frame) -> Self {
        Self::new(frame.name, frame.data)
    }
}

/// Four-byte chunk type tag
///
/// The case of each letter carries a property bit (bit 5 set means
/// lowercase). Container logic only compares tags exactly; the property
/// accessors exist for reporting and for validating custom payload tags.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkType([u8; 4]);

impl ChunkType {
    /// Wrap a raw tag
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Raw tag bytes
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Uppercase first letter: decoders must understand this chunk
    pub const fn is_critical(&self) -> bool {
        self.0[0] & 0x20 == 0
    }

    /// Uppercase second letter: registered public chunk
    pub const fn is_public(&self) -> bool {
        self.0[1] & 0x20 == 0
    }

    /// Uppercase third letter, as every current PNG version requires
    pub const fn is_reserved_valid(&self) -> bool {
        self.0[2] & 0x20 == 0
    }

    /// Lowercase fourth letter: editors may copy it unmodified
    pub const fn is_safe_to_copy(&self) -> bool {
        self.0[3] & 0x20 != 0
    }
}

impl From<&[u8; 4]> for ChunkType {
    fn from(bytes: &[u8; 4]) -> Self {
        Self(*bytes)
    }
}

impl PartialEq<[u8; 4]> for ChunkType {
    fn eq(&self, other: &[u8; 4]) -> bool {
        &self.0 == other
    }
}

impl FromStr for ChunkType {
    type Err = StegError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes: [u8; 4] = s
            .as_bytes()
            .try_into()
            .map_err(|_| StegError::InvalidChunkType(s.to_string()))?;
        if !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(StegError::InvalidChunkType(s.to_string()));
        }
        Ok(Self(bytes))
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02x}", b)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkType(\"{}\")", self)
    }
}

/// One length-type-data-CRC record of a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Byte count of `data` as stored
    pub length: u32,

    /// Type tag
    pub chunk_type: ChunkType,

    /// Chunk body
    pub data: Bytes,

    /// Stored CRC-32 over type + data
    pub crc: u32,
}

impl Chunk {
    /// Create a chunk, computing its length and CRC
    pub fn new(chunk_type: ChunkType, data: Bytes) -> Result<Self, StegError> {
        let length = u32::try_from(data.len())
            .ok()
            .filter(|&len| len <= MAX_CHUNK_LEN)
            .ok_or(StegError::FieldOverflow(data.len()))?;
        let crc = Self::compute_crc(&chunk_type, &data);

        Ok(Self {
            length,
            chunk_type,
            data,
            crc,
        })
    }

    /// CRC-32 as the PNG format defines it (covers type and data, not length)
    pub fn compute_crc(chunk_type: &ChunkType, data: &[u8]) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(chunk_type.as_bytes());
        hasher.update(data);
        hasher.finalize()
    }

    /// Whether the stored CRC matches the type and data
    pub fn crc_is_valid(&self) -> bool {
        self.crc == Self::compute_crc(&self.chunk_type, &self.data)
    }

    /// Check the chunk type tag
    pub fn is_type(&self, tag: &[u8; 4]) -> bool {
        self.chunk_type == *tag
    }

    /// Serialized size in bytes
    pub fn encoded_len(&self) -> usize {
        CHUNK_OVERHEAD + self.data.len()
    }
}
