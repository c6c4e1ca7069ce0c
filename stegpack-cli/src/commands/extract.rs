use super::{payload_chunk_type, read_input, recovered_path, unseal, write_output};
use crate::Context;
use anyhow::Result;
use colored::*;
use std::path::PathBuf;
use stegpack_core::container;
use tracing::info;

/// Recover a file hidden in a PNG chunk
///
/// Returns the path written, or `None` when the image carries no payload.
pub fn execute(
    ctx: &Context,
    input: &str,
    output: Option<&str>,
    output_dir: Option<&str>,
    chunk_type: Option<&str>,
    password: Option<&str>,
) -> Result<Option<PathBuf>> {
    info!("Extracting payload from {}", input);

    let chunk_type = payload_chunk_type(chunk_type)?;
    let data = read_input(input)?;

    let Some((name, payload)) = container::extract(&data, chunk_type).into_parts() else {
        println!(
            "{} {}: no {} payload found in {}",
            "✗".red(),
            ctx.display_name,
            chunk_type,
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
