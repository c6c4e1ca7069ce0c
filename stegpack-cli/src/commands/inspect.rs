use super::{payload_chunk_type, read_input};
use crate::Context;
use anyhow::{Context as _, Result};
use colored::*;
use serde::{Deserialize, Serialize};
use stegpack_core::container::{self, ChunkSummary};
use tracing::info;

/// Data bytes shown per chunk in the listing
const PREVIEW_LEN: usize = 8;

#[derive(Debug, Serialize, Deserialize)]
pub struct PayloadInfo {
    pub chunk_type: String,
    pub name: String,
    pub size: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InspectReport {
    pub input: String,
    pub is_png: bool,
    pub chunks: Vec<ChunkSummary>,
    pub payload: Option<PayloadInfo>,
}

/// List the chunks of a PNG and report whether it carries a payload
pub fn execute(
    ctx: &Context,
    input: &str,
    chunk_type: Option<&str>,
    json: bool,
) -> Result<InspectReport> {
    info!("Inspecting file: {}", input);

    let chunk_type = payload_chunk_type(chunk_type)?;
    let data = read_input(input)?;
    let chunks = container::read_chunks_from_bytes(&data)
        .with_context(|| format!("Failed to read chunks from {}", input))?;

    let payload = container::extract_from_chunks(&chunks, chunk_type)
        .into_parts()
        .map(|(name, data)| PayloadInfo {
            chunk_type: chunk_type.to_string(),
            name,
            size: data.len(),
        });

    let report = InspectReport {
        input: input.to_string(),
        is_png: !chunks.is_empty(),
        chunks: container::summarize(&chunks),
        payload,
    };

    if json {
        let out = serde_json::to_string_pretty(&report)
            .with_context(|| "Failed to serialize inspect report")?;
        println!("{}", out);
        return Ok(report);
    }

    if !report.is_png {
        println!("{} {}: {} is not a PNG container", "✗".red(), ctx.display_name, input);
        return Ok(report);
    }

    println!("\n=== Chunks ===");
    println!(
        "{:>10}  {:<6} {:>10}  {:<8} {:<4} {:<16}",
        "offset", "type", "length", "crc", "flag", "data"
    );
    for (summary, chunk) in report.chunks.iter().zip(&chunks) {
        let crc = if summary.crc_valid {
            format!("{:08x}", summary.crc).normal()
        } else {
            format!("{:08x}", summary.crc).red()
        };
        let flags = format!(
            "{}{}{}",
            if summary.critical { 'C' } else { 'a' },
            if summary.public { 'P' } else { 'p' },
            if summary.safe_to_copy { 's' } else { '-' },
        );
        let preview = hex::encode(&chunk.data[..chunk.data.len().min(PREVIEW_LEN)]);
        println!(
            "{:>10}  {:<6} {:>10}  {} {:<4} {:<16}",
            summary.offset, summary.chunk_type, summary.length, crc, flags, preview
        );
    }

    let terminated = chunks
        .last()
        .is_some_and(|c| c.is_type(stegpack_core::constants::TERMINATOR_CHUNK_TYPE));
    if !terminated {
        println!("{} Container ends without IEND", "!".yellow());
    }

    println!("\n=== Payload ===");
    match &report.payload {
        Some(info) => println!(
            "{} {:?} ({} bytes) in {} chunk",
            "✓".green(),
            info.name,
            info.size,
            info.chunk_type
        ),
        None => println!("{} No {} payload", "✗".red(), chunk_type),
    }

    Ok(report)
}
