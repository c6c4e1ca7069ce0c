//! # Stegpack Core
//!
//! Hide a file inside raster image data so the result still opens as an
//! ordinary image, then recover it byte for byte.
//!
//! Two independent strategies share one record format:
//!
//! - **Container**: the frame rides in an ancillary PNG chunk inserted right
//!   after `IHDR`; the visible image is untouched.
//! - **Pixel**: the frame bytes become the RGB channels of a new image.
//!
//! ## Modules
//!
//! - `constants`: Format constants (magic, signature, chunk tags)
//! - `types`: Core types (Frame, ImageFile, Chunk, ChunkType)
//! - `frame`: Frame encoding and decoding
//! - `container`: PNG chunk reader/writer and payload chunk insertion
//! - `raster`: Pixel grids and the raster codec boundary
//! - `pixel`: Pixel packing encode/decode
//! - `crypto`: Password-based payload encryption (feature `encryption`)

#![warn(missing_docs)]

pub mod constants;
pub mod container;
#[cfg(feature = "encryption")]
pub mod crypto;
pub mod error;
pub mod frame;
pub mod pixel;
pub mod raster;
pub mod types;

// Re-export commonly used types
pub use error::StegError;
pub use raster::{Grid, RasterCodec, RasterFormat};
pub use types::{Chunk, ChunkType, Frame, ImageFile};

#[cfg(feature = "image-raster")]
pub use raster::ImageRaster;

/// Result type alias for Stegpack operations
pub type Result<T> = core::result::Result<T, StegError>;
