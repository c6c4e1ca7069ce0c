//! Constants for the frame, container and pixel formats

/// Frame magic - 6 ASCII bytes that open every embedded frame
pub const FRAME_MAGIC: &[u8; 6] = b"STGPAK";

/// Size of each big-endian length field in a frame
pub const LENGTH_FIELD_SIZE: usize = 4;

/// Fixed frame bytes surrounding name and data
/// 6 (magic) + 4 (name length) + 4 (data length) = 14 bytes
pub const FRAME_OVERHEAD: usize = FRAME_MAGIC.len() + 2 * LENGTH_FIELD_SIZE;

/// PNG file signature
pub const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";

/// Chunk type that must open a container
pub const HEADER_CHUNK_TYPE: &[u8; 4] = b"IHDR";

/// Chunk type that must close a container
pub const TERMINATOR_CHUNK_TYPE: &[u8; 4] = b"IEND";

/// Default tag of the inserted payload chunk
///
/// Ancillary (`h`), private (`i`), reserved bit clear (`D`), safe-to-copy (`e`).
pub const DEFAULT_PAYLOAD_CHUNK_TYPE: &[u8; 4] = b"hiDe";

/// Length + type + CRC surrounding chunk data
pub const CHUNK_OVERHEAD: usize = 12;

/// Largest chunk data length the PNG format allows (2^31 - 1)
pub const MAX_CHUNK_LEN: u32 = 0x7FFF_FFFF;

/// Bytes per pixel in a packed grid (R, G, B)
pub const BYTES_PER_PIXEL: usize = 3;

/// Row alignment of a packed grid, in pixels
pub const GRID_WIDTH_ALIGNMENT: u32 = 4;
