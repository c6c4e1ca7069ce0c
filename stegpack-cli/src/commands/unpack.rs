use super::{read_input, recovered_path, unseal, write_output};
use crate::Context;
use anyhow::Result;
use colored::*;
use std::path::PathBuf;
use stegpack_core::pixel;
use tracing::info;

/// Recover a file stored in an image's pixels
///
/// With `direct` set only the stored pixel order is tried. Returns the path
/// written, or `None` when nothing was recovered.
pub fn execute(
    ctx: &Context,
    input: &str,
    output: Option<&str>,
    output_dir: Option<&str>,
    direct: bool,
    password: Option<&str>,
) -> Result<Option<PathBuf>> {
    info!("Unpacking pixels of {} (direct: {})", input, direct);

    let data = read_input(input)?;

    let Some((name, payload)) = pixel::decode_image(&data, direct).into_parts() else {
        println!(
            "{} {}: no packed payload found in {}",
            "✗".red(),
            ctx.display_name,
            input
        );
        return Ok(None);
    };

    let contents = unseal(&payload, password)?;
    let path = recovered_path(&name, output, output_dir);
    write_output(&path, &contents)?;

    println!(
        "{} {}: recovered {:?} ({} bytes) to {}",
        "✓".green(),
        ctx.display_name,
        name,
        contents.len(),
        path.display()
    );

    Ok(Some(path))
}
