//! Pixel packing: frame bytes stored directly as RGB channel values
//!
//! Encoding lays the frame out row-major over a roughly square grid whose
//! width is a multiple of 4 pixels, three bytes per pixel, zero-filling
//! whatever capacity is left. Decoding reverses that, with one fallback for
//! raster paths that hand the buffer back in the opposite order.

use crate::constants::{BYTES_PER_PIXEL, GRID_WIDTH_ALIGNMENT};
use crate::error::StegError;
use crate::frame::{decode_frame_zero_copy, encode_frame, has_magic};
use crate::raster::{Grid, RasterCodec, RasterFormat};
use crate::types::ImageFile;
use bytes::Bytes;

#[cfg(feature = "image-raster")]
use crate::raster::ImageRaster;

#[cfg(feature = "logging")]
use tracing::debug;

/// Grid size chosen for a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDims {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl GridDims {
    /// Bytes the grid can hold
    pub fn capacity(&self) -> usize {
        self.width as usize * self.height as usize * BYTES_PER_PIXEL
    }
}

/// Compute the grid for a frame of `frame_len` bytes
///
/// Width is `floor(sqrt(frame_len / 3))` rounded down to a multiple of 4
/// (at least 4); height is the number of rows needed at that width.
pub fn grid_dimensions(frame_len: usize) -> Result<GridDims, StegError> {
    let pixels_needed = frame_len as f64 / BYTES_PER_PIXEL as f64;
    let side = pixels_needed.sqrt().floor() as u32;
    let width = (side - side % GRID_WIDTH_ALIGNMENT).max(GRID_WIDTH_ALIGNMENT);

    let row_bytes = width as usize * BYTES_PER_PIXEL;
    let rows = frame_len.div_ceil(row_bytes).max(1);
    let height = u32::try_from(rows)
        .map_err(|_| StegError::InvalidGrid(format!("{} rows exceed the raster limit", rows)))?;

    Ok(GridDims { width, height })
}

/// Lay frame bytes into a grid of the given size
///
/// Consecutive bytes fill R, G, B of consecutive pixels, row by row. The
/// rest of the grid is zero.
pub fn pack_frame(frame: &[u8], dims: GridDims) -> Result<Grid, StegError> {
    if dims.width == 0 || dims.width % GRID_WIDTH_ALIGNMENT != 0 {
        return Err(StegError::InvalidGrid(format!(
            "width {} is not a positive multiple of {}",
            dims.width, GRID_WIDTH_ALIGNMENT
        )));
    }

    let capacity = dims.capacity();
    if frame.len() > capacity {
        return Err(StegError::CapacityExceeded {
            needed: frame.len(),
            capacity,
        });
    }

    let mut grid = Grid::zeroed(dims.width, dims.height)?;
    grid.pixels_mut()[..frame.len()].copy_from_slice(frame);
    Ok(grid)
}

/// Build the frame for `name`/`data` and pack it into a freshly sized grid
pub fn pack(name: &str, data: &[u8]) -> Result<Grid, StegError> {
    let frame = encode_frame(name, data)?;
    let dims = grid_dimensions(frame.len())?;

    #[cfg(feature = "logging")]
    debug!(
        "Packing {} byte frame into {}x{} grid ({} bytes)",
        frame.len(),
        dims.width,
        dims.height,
        dims.capacity()
    );

    pack_frame(&frame, dims)
}

/// Encode a file as a synthesized image
///
/// Input errors and capacity problems fail before the raster codec runs.
pub fn encode<C: RasterCodec + ?Sized>(
    codec: &C,
    name: &str,
    data: &[u8],
    format: RasterFormat,
) -> Result<Bytes, StegError> {
    let grid = pack(name, data)?;
    codec.save_grid(&grid, format)
}

/// [`encode`] with the `image` crate backend
#[cfg(feature = "image-raster")]
pub fn encode_image(name: &str, data: &[u8], format: RasterFormat) -> Result<Bytes, StegError> {
    encode(&ImageRaster, name, data, format)
}

/// Recover a file from image bytes
///
/// Never fails; anything unreadable or unrecognized gives the empty result.
/// See [`unpack_grid`] for the meaning of `allow_direct_decode`.
pub fn decode<C: RasterCodec + ?Sized>(
    codec: &C,
    raster: &[u8],
    allow_direct_decode: bool,
) -> ImageFile {
    match codec.load_grid(raster) {
        Ok(grid) => unpack_grid(grid, allow_direct_decode),
        Err(_e) => {
            #[cfg(feature = "logging")]
            debug!("Raster decode failed: {}", _e);
            ImageFile::empty()
        }
    }
}

/// [`decode`] with the `image` crate backend
#[cfg(feature = "image-raster")]
pub fn decode_image(raster: &[u8], allow_direct_decode: bool) -> ImageFile {
    decode(&ImageRaster, raster, allow_direct_decode)
}

/// Recover a file from a decoded grid
///
/// If the flat buffer does not open with the frame magic and
/// `allow_direct_decode` is false, the whole buffer is reversed end to end
/// and checked again. This compensates for raster paths that return the
/// pixel data in opposite order; it is only meaningful because the grid
/// buffer is exactly `width * height * 3` bytes with no row padding. With
/// `allow_direct_decode` set, only the stored order is tried.
pub fn unpack_grid(grid: Grid, allow_direct_decode: bool) -> ImageFile {
    let mut buf = grid.into_pixels();

    if !has_magic(&buf) {
        if allow_direct_decode {
            #[cfg(feature = "logging")]
            debug!("No frame magic in stored pixel order");
            return ImageFile::empty();
        }

        buf.reverse();
        if !has_magic(&buf) {
            #[cfg(feature = "logging")]
            debug!("No frame magic in either pixel order");
            return ImageFile::empty();
        }

        #[cfg(feature = "logging")]
        debug!("Frame magic found after reversing the pixel buffer");
    }

    match decode_frame_zero_copy(Bytes::from(buf)) {
        Ok(frame) => frame.into(),
        Err(_e) => {
            #[cfg(feature = "logging")]
            debug!("Pixel buffer holds a damaged frame: {}", _e);
            ImageFile::empty()
        }
    }
}
