//! Basic embedding example: one file, both strategies

use bytes::Bytes;
use stegpack_core::{
    constants::DEFAULT_PAYLOAD_CHUNK_TYPE,
    container::{embed_default, extract},
    pixel::{decode_image, encode_image},
    ChunkType, Frame, Grid, ImageRaster, RasterCodec, RasterFormat,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Stegpack Basic Embedding Example\n");

    let name = "notes.txt";
    let data = Bytes::from_static(b"The quick brown fox jumps over the lazy dog.");

    // Pixel strategy: the payload becomes the image
    for format in [RasterFormat::Png, RasterFormat::Bmp] {
        let image = encode_image(name, &data, format)?;
        let path = format!("example_pixels.{}", format.extension());
        std::fs::write(&path, &image)?;

        let recovered = decode_image(&image, false);
        println!(
            "{}: {} bytes, recovered {:?} ({} bytes)",
            path,
            image.len(),
            recovered.name(),
            recovered.data().map_or(0, <[u8]>::len)
        );
    }

    // Container strategy: the payload rides along in an ancillary chunk
    let cover_grid = Grid::new(32, 32, vec![0xC0; 32 * 32 * 3])?;
    let cover = ImageRaster.save_grid(&cover_grid, RasterFormat::Png)?;
    let stego = embed_default(&cover, &Frame::new(name, data.clone()))?;
    std::fs::write("example_chunk.png", &stego)?;

    let recovered = extract(&stego, ChunkType::from(DEFAULT_PAYLOAD_CHUNK_TYPE));
    println!(
        "\nexample_chunk.png: cover {} bytes -> {} bytes, recovered {:?}",
        cover.len(),
        stego.len(),
        recovered.name()
    );

    println!("Use 'stegpack inspect --input example_chunk.png' to list its chunks");

    Ok(())
}
