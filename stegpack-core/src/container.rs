//! PNG chunk container reading, writing and payload insertion
//!
//! A container is the 8-byte PNG signature followed by chunk records:
//!
//! ```text
//! length (u32 BE) | type (4) | data (length bytes) | crc32 (u32 BE)
//! ```
//!
//! The first chunk must be `IHDR` and the last `IEND`. Payloads go into an
//! ancillary chunk placed directly after `IHDR`, which image decoders skip.

use crate::constants::{
    DEFAULT_PAYLOAD_CHUNK_TYPE, HEADER_CHUNK_TYPE, MAX_CHUNK_LEN, PNG_SIGNATURE,
    TERMINATOR_CHUNK_TYPE,
};
use crate::error::StegError;
use crate::frame::{decode_frame_zero_copy, encode_frame_struct};
use crate::types::{Chunk, ChunkType, Frame, ImageFile};
use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use std::io::{ErrorKind, Read, Write};

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// Index at which payload chunks are inserted (right after `IHDR`)
pub const PAYLOAD_CHUNK_INDEX: usize = 1;

/// Read the signature and chunk records from a stream
///
/// Returns an empty list when the signature is absent or wrong; that is a
/// normal outcome for non-PNG input, not an error. Reading stops after the
/// `IEND` chunk or when the stream runs out. A record cut short by the end
/// of the stream is dropped, so the list may lack its terminator.
///
/// I/O errors other than end-of-stream are returned unchanged.
pub fn read_chunks<R: Read>(reader: &mut R) -> Result<Vec<Chunk>, StegError> {
    let mut signature = [0u8; 8];
    match reader.read_exact(&mut signature) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    }

    if &signature != PNG_SIGNATURE {
        #[cfg(feature = "logging")]
        debug!("Signature mismatch, not a PNG container");
        return Ok(Vec::new());
    }

    let mut chunks = Vec::new();
    while let Some(chunk) = read_chunk(reader)? {
        let is_terminator = chunk.is_type(TERMINATOR_CHUNK_TYPE);
        chunks.push(chunk);
        if is_terminator {
            break;
        }
    }

    #[cfg(feature = "logging")]
    debug!("Read {} chunks", chunks.len());

    Ok(chunks)
}

/// Read chunks from an in-memory buffer
pub fn read_chunks_from_bytes(data: &[u8]) -> Result<Vec<Chunk>, StegError> {
    let mut cursor = std::io::Cursor::new(data);
    read_chunks(&mut cursor)
}

/// Read one chunk record, `None` once the stream is exhausted
fn read_chunk<R: Read>(reader: &mut R) -> Result<Option<Chunk>, StegError> {
    let mut head = [0u8; 8];
    match reader.read_exact(&mut head) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    }

    let length = u32::from_be_bytes([head[0], head[1], head[2], head[3]]);
    let chunk_type = ChunkType::new([head[4], head[5], head[6], head[7]]);

    if length > MAX_CHUNK_LEN {
        #[cfg(feature = "logging")]
        warn!("Chunk {} declares length {} above the PNG limit", chunk_type, length);
        return Ok(None);
    }

    // Grow the buffer as bytes arrive rather than trusting the declared length.
    let mut data = Vec::new();
    reader.by_ref().take(u64::from(length)).read_to_end(&mut data)?;
    if data.len() != length as usize {
        #[cfg(feature = "logging")]
        debug!("Chunk {} cut short: {} of {} bytes", chunk_type, data.len(), length);
        return Ok(None);
    }

    let mut crc = [0u8; 4];
    match reader.read_exact(&mut crc) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    }

    Ok(Some(Chunk {
        length,
        chunk_type,
        data: Bytes::from(data),
        crc: u32::from_be_bytes(crc),
    }))
}

/// Check that a chunk list forms a writable container
///
/// The list must open with IHDR, close with IEND, and every chunk's
/// `length` must match its data.
pub fn validate_layout(chunks: &[Chunk]) -> Result<(), StegError> {
    if chunks.len() < 2 {
        return Err(StegError::InvalidContainer(format!(
            "need at least 2 chunks, got {}",
            chunks.len()
        )));
    }

    let first = &chunks[0];
    if !first.is_type(HEADER_CHUNK_TYPE) {
        return Err(StegError::InvalidContainer(format!(
            "first chunk is {}, expected IHDR",
            first.chunk_type
        )));
    }

    let last = &chunks[chunks.len() - 1];
    if !last.is_type(TERMINATOR_CHUNK_TYPE) {
        return Err(StegError::InvalidContainer(format!(
            "last chunk is {}, expected IEND",
            last.chunk_type
        )));
    }

    if let Some(bad) = chunks.iter().find(|c| c.length as usize != c.data.len()) {
        return Err(StegError::InvalidContainer(format!(
            "{} chunk declares {} bytes but holds {}",
            bad.chunk_type,
            bad.length,
            bad.data.len()
        )));
    }

    Ok(())
}

/// Serialize a chunk list behind the PNG signature
///
/// Chunks are written exactly as stored, including their CRC fields.
pub fn write_chunks(chunks: &[Chunk]) -> Result<Bytes, StegError> {
    validate_layout(chunks)?;

    let total = PNG_SIGNATURE.len() + chunks.iter().map(Chunk::encoded_len).sum::<usize>();
    let mut buf = BytesMut::with_capacity(total);

    buf.put_slice(PNG_SIGNATURE);
    for chunk in chunks {
        buf.put_u32(chunk.length);
        buf.put_slice(chunk.chunk_type.as_bytes());
        buf.put_slice(&chunk.data);
        buf.put_u32(chunk.crc);
    }

    Ok(buf.freeze())
}

/// Serialize a chunk list into a writer
pub fn write_chunks_to<W: Write>(writer: &mut W, chunks: &[Chunk]) -> Result<(), StegError> {
    let bytes = write_chunks(chunks)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Insert a chunk carrying `frame` directly after the header chunk
///
/// Every other chunk keeps its position relative to the rest, so a list that
/// satisfied [`validate_layout`] still does. Inserting into a container that
/// already carries a payload adds a second payload chunk in front of the
/// first; nothing is replaced.
pub fn insert_payload_chunk(
    mut chunks: Vec<Chunk>,
    frame: &Frame,
    chunk_type: ChunkType,
) -> Result<Vec<Chunk>, StegError> {
    let payload = Chunk::new(chunk_type, encode_frame_struct(frame)?)?;

    #[cfg(feature = "logging")]
    debug!(
        "Inserting {} chunk with {} byte frame for {:?}",
        chunk_type, payload.length, frame.name
    );

    let index = PAYLOAD_CHUNK_INDEX.min(chunks.len());
    chunks.insert(index, payload);
    Ok(chunks)
}

/// Embed a file into a PNG by inserting a payload chunk
pub fn embed(cover: &[u8], frame: &Frame, chunk_type: ChunkType) -> Result<Bytes, StegError> {
    let chunks = read_chunks_from_bytes(cover)?;
    if chunks.is_empty() {
        return Err(StegError::InvalidContainer(
            "cover image is not a PNG".to_string(),
        ));
    }

    let chunks = insert_payload_chunk(chunks, frame, chunk_type)?;
    write_chunks(&chunks)
}

/// Embed using the default payload chunk tag
pub fn embed_default(cover: &[u8], frame: &Frame) -> Result<Bytes, StegError> {
    embed(cover, frame, ChunkType::from(DEFAULT_PAYLOAD_CHUNK_TYPE))
}

/// Recover the payload from a PNG
///
/// Never fails: absence, damage and read errors all give the empty result.
pub fn extract(data: &[u8], chunk_type: ChunkType) -> ImageFile {
    match read_chunks_from_bytes(data) {
        Ok(chunks) => extract_from_chunks(&chunks, chunk_type),
        Err(_e) => {
            #[cfg(feature = "logging")]
            debug!("Failed to read chunks: {}", _e);
            ImageFile::empty()
        }
    }
}

/// Recover the payload from an already parsed chunk list
///
/// The first chunk of `chunk_type` wins; after repeated embedding that is
/// the most recently inserted one.
pub fn extract_from_chunks(chunks: &[Chunk], chunk_type: ChunkType) -> ImageFile {
    let Some(chunk) = chunks.iter().find(|c| c.chunk_type == chunk_type) else {
        #[cfg(feature = "logging")]
        debug!("No {} chunk present", chunk_type);
        return ImageFile::empty();
    };

    if !chunk.crc_is_valid() {
        #[cfg(feature = "logging")]
        warn!("Payload chunk {} failed its CRC check", chunk_type);
        return ImageFile::empty();
    }

    match decode_frame_zero_copy(chunk.data.clone()) {
        Ok(frame) => frame.into(),
        Err(_e) => {
            #[cfg(feature = "logging")]
            debug!("Payload chunk {} holds no valid frame: {}", chunk_type, _e);
            ImageFile::empty()
        }
    }
}

/// One line of a container listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSummary {
    /// Byte offset of the chunk's length field
    pub offset: usize,
    /// Type tag, with non-printable bytes escaped
    pub chunk_type: String,
    /// Data length
    pub length: u32,
    /// Stored CRC
    pub crc: u32,
    /// Whether the stored CRC matches
    pub crc_valid: bool,
    /// Critical (uppercase first letter)
    pub critical: bool,
    /// Public (uppercase second letter)
    pub public: bool,
    /// Safe to copy (lowercase fourth letter)
    pub safe_to_copy: bool,
}

/// Describe each chunk with its byte offset in the serialized container
pub fn summarize(chunks: &[Chunk]) -> Vec<ChunkSummary> {
    let mut offset = PNG_SIGNATURE.len();
    chunks
        .iter()
        .map(|chunk| {
            let summary = ChunkSummary {
                offset,
                chunk_type: chunk.chunk_type.to_string(),
                length: chunk.length,
                crc: chunk.crc,
                crc_valid: chunk.crc_is_valid(),
                critical: chunk.chunk_type.is_critical(),
                public: chunk.chunk_type.is_public(),
                safe_to_copy: chunk.chunk_type.is_safe_to_copy(),
            };
            offset += chunk.encoded_len();
            summary
        })
        .collect()
}
