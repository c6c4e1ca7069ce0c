use super::{payload_chunk_type, read_input, seal, stored_name, write_output};
use crate::Context;
use anyhow::{Context as _, Result};
use std::path::Path;
use stegpack_core::{container, Frame};
use tracing::info;

/// Hide `input` inside an ancillary chunk of the PNG `cover`
pub fn execute(
    ctx: &Context,
    cover: &str,
    input: &str,
    output: &str,
    chunk_type: Option<&str>,
    name: Option<&str>,
    password: Option<&str>,
) -> Result<()> {
    info!("Embedding {} into {} as {}", input, cover, output);

    let chunk_type = payload_chunk_type(chunk_type)?;
    let cover_bytes = read_input(cover)?;
    let data = seal(read_input(input)?, password)?;
    let frame = Frame::new(stored_name(input, name), data);

    let stego = container::embed(&cover_bytes, &frame, chunk_type)
        .with_context(|| format!("Failed to embed payload into {}", cover))?;

    write_output(Path::new(output), &stego)?;

    println!(
        "{}: embedded {:?} ({} bytes) in {} chunk of {} ({} -> {} bytes)",
        ctx.display_name,
        frame.name,
        frame.data.len(),
        chunk_type,
        output,
        cover_bytes.len(),
        stego.len()
    );

    Ok(())
}
