//! Integration tests for both embedding strategies against real PNG/BMP bytes

use bytes::Bytes;
use stegpack_core::{
    constants::DEFAULT_PAYLOAD_CHUNK_TYPE,
    container::{
        embed_default, extract, extract_from_chunks, insert_payload_chunk, read_chunks,
        read_chunks_from_bytes, write_chunks, write_chunks_to,
    },
    frame::{decode_frame, encode_frame_struct},
    pixel::{decode_image, encode_image},
    ChunkType, Frame, Grid, ImageRaster, RasterCodec, RasterFormat,
};

/// A small gradient PNG with no payload, produced by the raster backend
fn cover_png() -> Bytes {
    let (w, h) = (16u32, 9u32);
    let pixels: Vec<u8> = (0..w * h)
        .flat_map(|i| [(i * 3) as u8, (i * 5) as u8, (i * 11) as u8])
        .collect();
    let grid = Grid::new(w, h, pixels).unwrap();
    ImageRaster.save_grid(&grid, RasterFormat::Png).unwrap()
}

fn payload_tag() -> ChunkType {
    ChunkType::from(DEFAULT_PAYLOAD_CHUNK_TYPE)
}

#[test]
fn test_container_insertion_reparses() {
    let cover = cover_png();
    let frame = Frame::new("report.pdf", Bytes::from_static(b"%PDF-1.7 fake"));

    let chunks = read_chunks_from_bytes(&cover).unwrap();
    assert!(chunks.len() >= 3);

    let inserted = insert_payload_chunk(chunks.clone(), &frame, payload_tag()).unwrap();
    let written = write_chunks(&inserted).unwrap();
    let reparsed = read_chunks_from_bytes(&written).unwrap();

    assert_eq!(reparsed.len(), chunks.len() + 1);
    assert!(reparsed[0].is_type(b"IHDR"));
    assert!(reparsed.last().unwrap().is_type(b"IEND"));

    let embedded = decode_frame(&reparsed[1].data).unwrap();
    assert_eq!(embedded, frame);
    assert_eq!(reparsed[1].data, encode_frame_struct(&frame).unwrap());
}

#[test]
fn test_container_embed_keeps_image_pixels() {
    let cover = cover_png();
    let frame = Frame::new("hidden.txt", Bytes::from_static(b"meet at noon"));
    let stego = embed_default(&cover, &frame).unwrap();

    // Image decoders skip the ancillary chunk
    let before = ImageRaster.load_grid(&cover).unwrap();
    let after = ImageRaster.load_grid(&stego).unwrap();
    assert_eq!(before, after);

    let file = extract(&stego, payload_tag());
    assert_eq!(file.name(), Some("hidden.txt"));
    assert_eq!(file.data(), Some(&b"meet at noon"[..]));
}

#[test]
fn test_container_unmodified_rewrite_is_identical() {
    let cover = cover_png();
    let chunks = read_chunks_from_bytes(&cover).unwrap();
    assert_eq!(write_chunks(&chunks).unwrap(), cover);
}

#[test]
fn test_repeated_insertion_duplicates_and_newest_wins() {
    let cover = cover_png();
    let first = Frame::new("v1.txt", Bytes::from_static(b"old"));
    let second = Frame::new("v2.txt", Bytes::from_static(b"new"));

    let once = embed_default(&cover, &first).unwrap();
    let twice = embed_default(&once, &second).unwrap();

    let chunks = read_chunks_from_bytes(&twice).unwrap();
    let payloads: Vec<usize> = chunks
        .iter()
        .enumerate()
        .filter(|(_, c)| c.chunk_type == payload_tag())
        .map(|(i, _)| i)
        .collect();
    assert_eq!(payloads, vec![1, 2]);

    let file = extract_from_chunks(&chunks, payload_tag());
    assert_eq!(file.name(), Some("v2.txt"));

    // The older payload is still intact behind it
    assert_eq!(decode_frame(&chunks[2].data).unwrap(), first);
}

#[test]
fn test_custom_chunk_tag_is_isolated() {
    let cover = cover_png();
    let tag: ChunkType = "prVt".parse().unwrap();
    let frame = Frame::new("k", Bytes::from_static(b"v"));

    let stego = stegpack_core::container::embed(&cover, &frame, tag).unwrap();

    assert!(extract(&stego, payload_tag()).is_empty());
    assert_eq!(extract(&stego, tag).data(), Some(&b"v"[..]));
}

#[test]
fn test_streaming_reader_and_writer() {
    let cover = cover_png();
    let mut reader = std::io::Cursor::new(cover.to_vec());
    let chunks = read_chunks(&mut reader).unwrap();

    let mut out = Vec::new();
    write_chunks_to(&mut out, &chunks).unwrap();
    assert_eq!(out, cover.to_vec());
}

#[test]
fn test_pixel_round_trip_both_formats() {
    let data: Vec<u8> = (0..4096u32).map(|i| (i * 31 % 256) as u8).collect();

    for format in [RasterFormat::Png, RasterFormat::Bmp] {
        let image = encode_image("data.bin", &data, format).unwrap();
        let file = decode_image(&image, false);
        assert_eq!(file.name(), Some("data.bin"), "{}", format);
        assert_eq!(file.data(), Some(&data[..]), "{}", format);
    }
}

#[test]
fn test_plain_image_has_no_payload() {
    let cover = cover_png();
    assert!(decode_image(&cover, false).is_empty());
    assert!(decode_image(&cover, true).is_empty());
    assert!(extract(&cover, payload_tag()).is_empty());
}

#[test]
fn test_strategies_are_independent() {
    // A pixel-packed PNG can also carry a chunk payload
    let packed = encode_image("pixels.txt", b"in the pixels", RasterFormat::Png).unwrap();
    let both = embed_default(&packed, &Frame::new("chunk.txt", Bytes::from_static(b"in a chunk")))
        .unwrap();

    let from_pixels = decode_image(&both, true);
    assert_eq!(from_pixels.name(), Some("pixels.txt"));

    let from_chunk = extract(&both, payload_tag());
    assert_eq!(from_chunk.name(), Some("chunk.txt"));
}

#[test]
fn test_bmp_is_not_a_container() {
    let bmp = encode_image("x", b"y", RasterFormat::Bmp).unwrap();
    assert!(read_chunks_from_bytes(&bmp).unwrap().is_empty());
    assert!(embed_default(&bmp, &Frame::new("a", Bytes::new())).is_err());
}
