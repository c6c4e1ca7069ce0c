use super::{read_input, seal, stored_name, write_output};
use crate::Context;
use anyhow::{Context as _, Result};
use std::path::Path;
use stegpack_core::{pixel, ImageRaster, RasterCodec, RasterFormat};
use tracing::info;

/// Pick the output format: explicit choice, else the output extension, else PNG
pub fn resolve_format(format: Option<RasterFormat>, output: &str) -> RasterFormat {
    format
        .or_else(|| RasterFormat::from_path(Path::new(output)))
        .unwrap_or_default()
}

/// Store `input` as the pixels of a new image
pub fn execute(
    ctx: &Context,
    input: &str,
    output: &str,
    format: Option<RasterFormat>,
    name: Option<&str>,
    password: Option<&str>,
) -> Result<()> {
    let format = resolve_format(format, output);
    info!("Packing {} into {} ({})", input, output, format);

    let data = seal(read_input(input)?, password)?;
    let name = stored_name(input, name);

    let grid = pixel::pack(&name, &data)
        .with_context(|| format!("Failed to pack {} into a pixel grid", input))?;
    info!("Grid is {}x{} pixels", grid.width(), grid.height());

    let image = ImageRaster
        .save_grid(&grid, format)
        .with_context(|| format!("Failed to encode {} image", format))?;

    write_output(Path::new(output), &image)?;

    println!(
        "{}: packed {:?} ({} bytes) into {}x{} {} image {} ({} bytes)",
        ctx.display_name,
        name,
        data.len(),
        grid.width(),
        grid.height(),
        format,
        output,
        image.len()
    );

    Ok(())
}
