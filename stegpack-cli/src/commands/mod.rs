//! Subcommand implementations and the helpers they share

pub mod embed;
pub mod extract;
pub mod inspect;
pub mod pack;
pub mod unpack;

use anyhow::{bail, Context as _, Result};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use stegpack_core::{constants::DEFAULT_PAYLOAD_CHUNK_TYPE, crypto, ChunkType};
use tracing::info;

/// Name used when a recovered name has no usable final component
const FALLBACK_NAME: &str = "recovered.bin";

/// Read a file, or stdin when `path` is "-"
pub(crate) fn read_input(path: &str) -> Result<Vec<u8>> {
    if path == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        fs::read(path).with_context(|| format!("Failed to read input file: {}", path))
    }
}

/// Name to store in the frame: the override, else the input's base name
///
/// Stdin input has no name of its own and gets the fallback name.
pub(crate) fn stored_name(input: &str, name: Option<&str>) -> String {
    if let Some(name) = name {
        return name.to_string();
    }
    if input == "-" {
        return FALLBACK_NAME.to_string();
    }
    Path::new(input)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(FALLBACK_NAME)
        .to_string()
}

/// Parse a payload chunk tag, defaulting to `hiDe`
///
/// Only ancillary tags are accepted so that image decoders skip the chunk.
pub(crate) fn payload_chunk_type(tag: Option<&str>) -> Result<ChunkType> {
    let Some(tag) = tag else {
        return Ok(ChunkType::from(DEFAULT_PAYLOAD_CHUNK_TYPE));
    };

    let chunk_type: ChunkType = tag.parse()?;
    if chunk_type.is_critical() {
        bail!(
            "Chunk type {} is critical (uppercase first letter); payload chunks must be ancillary",
            chunk_type
        );
    }
    Ok(chunk_type)
}

/// Encrypt file contents when a password is given
pub(crate) fn seal(data: Vec<u8>, password: Option<&str>) -> Result<Vec<u8>> {
    match password {
        Some(password) => {
            let sealed = crypto::encrypt(password, &data).context("Failed to encrypt payload")?;
            info!("Encrypted {} bytes into {} bytes", data.len(), sealed.len());
            Ok(sealed)
        }
        None => Ok(data),
    }
}

/// Decrypt recovered contents when a password is given
pub(crate) fn unseal(data: &[u8], password: Option<&str>) -> Result<Vec<u8>> {
    match password {
        Some(password) => crypto::decrypt(password, data)
            .context("Failed to decrypt payload (wrong password or corrupted data)"),
        None => Ok(data.to_vec()),
    }
}

/// Where a recovered file goes
///
/// An explicit `output` wins. Otherwise the recovered name is reduced to its
/// final component and placed in `output_dir` (default: current directory),
/// so a stored name can never point outside that directory.
pub(crate) fn recovered_path(
    recovered_name: &str,
    output: Option<&str>,
    output_dir: Option<&str>,
) -> PathBuf {
    if let Some(output) = output {
        return PathBuf::from(output);
    }

    let file_name = Path::new(recovered_name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or(FALLBACK_NAME);

    Path::new(output_dir.unwrap_or(".")).join(file_name)
}

/// Write bytes, reporting the path on failure
pub(crate) fn write_output(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data)
        .with_context(|| format!("Failed to write output file: {}", path.display()))
}
