//! Pixel grids and the raster codec boundary
//!
//! The pixel packing codec only needs two capabilities from an image
//! library: turn encoded image bytes into an RGB grid, and turn a grid back
//! into PNG or BMP bytes. [`RasterCodec`] names exactly that, and
//! [`ImageRaster`] provides it on top of the `image` crate.

use crate::constants::BYTES_PER_PIXEL;
use crate::error::StegError;
use bytes::Bytes;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Row-major RGB raster, 3 bytes per pixel, no padding between rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Grid {
    /// Wrap a pixel buffer; its length must be exactly `width * height * 3`
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, StegError> {
        let expected = buffer_len(width, height)?;
        if pixels.len() != expected {
            return Err(StegError::InvalidGrid(format!(
                "{}x{} grid needs {} bytes, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// All-black grid
    pub fn zeroed(width: u32, height: u32) -> Result<Self, StegError> {
        let len = buffer_len(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![0u8; len],
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Flat row-major channel bytes
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable flat row-major channel bytes
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Take the flat buffer
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// RGB triple at column `x`, row `y`
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]])
    }
}

fn buffer_len(width: u32, height: u32) -> Result<usize, StegError> {
    if width == 0 || height == 0 {
        return Err(StegError::InvalidGrid(format!(
            "dimensions must be positive, got {}x{}",
            width, height
        )));
    }

    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
        .ok_or_else(|| StegError::InvalidGrid(format!("{}x{} grid is too large", width, height)))
}

/// Output image format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterFormat {
    /// Portable Network Graphics
    #[default]
    Png,
    /// Uncompressed 24-bit Windows bitmap
    Bmp,
}

impl RasterFormat {
    /// Conventional file extension
    pub const fn extension(&self) -> &'static str {
        match self {
            RasterFormat::Png => "png",
            RasterFormat::Bmp => "bmp",
        }
    }

    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for RasterFormat {
    type Err = StegError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(RasterFormat::Png),
            "bmp" | "dib" => Ok(RasterFormat::Bmp),
            other => Err(StegError::Raster(format!("unsupported format: {}", other))),
        }
    }
}

impl fmt::Display for RasterFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Capability boundary between the pixel codec and an image library
pub trait RasterCodec {
    /// Decode image bytes into an RGB grid (alpha, if any, is dropped)
    fn load_grid(&self, bytes: &[u8]) -> Result<Grid, StegError>;

    /// Encode a grid as `format`
    fn save_grid(&self, grid: &Grid, format: RasterFormat) -> Result<Bytes, StegError>;
}

/// [`RasterCodec`] backed by the `image` crate's PNG and BMP codecs
#[cfg(feature = "image-raster")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageRaster;

#[cfg(feature = "image-raster")]
impl RasterCodec for ImageRaster {
    fn load_grid(&self, bytes: &[u8]) -> Result<Grid, StegError> {
        let rgb = image::load_from_memory(bytes)
            .map_err(|e| StegError::Raster(e.to_string()))?
            .to_rgb8();
        let (width, height) = rgb.dimensions();
        Grid::new(width, height, rgb.into_raw())
    }

    fn save_grid(&self, grid: &Grid, format: RasterFormat) -> Result<Bytes, StegError> {
        let image_format = match format {
            RasterFormat::Png => image::ImageFormat::Png,
            RasterFormat::Bmp => image::ImageFormat::Bmp,
        };

        let mut out = std::io::Cursor::new(Vec::new());
        image::write_buffer_with_format(
            &mut out,
            grid.pixels(),
            grid.width(),
            grid.height(),
            image::ExtendedColorType::Rgb8,
            image_format,
        )
        .map_err(|e| StegError::Raster(e.to_string()))?;

        Ok(Bytes::from(out.into_inner()))
    }
}
