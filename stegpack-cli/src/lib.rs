//! Library entry for stegpack-cli used by integration tests and embedding.

pub mod commands;
pub mod context;

// Re-export commands for convenience
pub use commands::*;
pub use context::Context;

use stegpack_core::RasterFormat;

/// Image format selectable on the command line
#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum FormatArg {
    /// PNG output
    Png,
    /// Uncompressed 24-bit BMP output
    Bmp,
}

impl From<FormatArg> for RasterFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => RasterFormat::Png,
            FormatArg::Bmp => RasterFormat::Bmp,
        }
    }
}
