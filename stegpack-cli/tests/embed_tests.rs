use std::fs;
use tempfile::tempdir;

use stegpack_cli::{
    commands::{embed, extract, inspect},
    Context,
};
use stegpack_core::{
    container::read_chunks_from_bytes, Grid, ImageRaster, RasterCodec, RasterFormat,
};

fn write_cover(path: &std::path::Path) {
    let pixels: Vec<u8> = (0..12 * 12 * 3).map(|i| (i % 200) as u8).collect();
    let grid = Grid::new(12, 12, pixels).unwrap();
    fs::write(path, ImageRaster.save_grid(&grid, RasterFormat::Png).unwrap()).unwrap();
}

#[test]
fn embed_then_extract_round_trip() {
    let td = tempdir().unwrap();
    let cover = td.path().join("cover.png");
    let input = td.path().join("letter.txt");
    let stego = td.path().join("stego.png");
    let out_dir = td.path().join("out");
    fs::create_dir(&out_dir).unwrap();

    write_cover(&cover);
    fs::write(&input, b"Dear reader,\nhello.\n").unwrap();

    embed::execute(
        &Context::default(),
        cover.to_str().unwrap(),
        input.to_str().unwrap(),
        stego.to_str().unwrap(),
        /*chunk_type*/ None,
        /*name*/ None,
        /*password*/ None,
    )
    .unwrap();

    // Still a readable image with the same pixels
    let before = ImageRaster.load_grid(&fs::read(&cover).unwrap()).unwrap();
    let after = ImageRaster.load_grid(&fs::read(&stego).unwrap()).unwrap();
    assert_eq!(before, after);

    let chunks = read_chunks_from_bytes(&fs::read(&stego).unwrap()).unwrap();
    assert!(chunks[1].is_type(b"hiDe"));

    let written = extract::execute(
        &Context::default(),
        stego.to_str().unwrap(),
        None,
        Some(out_dir.to_str().unwrap()),
        None,
        None,
    )
    .unwrap()
    .unwrap();

    assert_eq!(written, out_dir.join("letter.txt"));
    assert_eq!(fs::read(written).unwrap(), b"Dear reader,\nhello.\n");
}

#[test]
fn embed_custom_chunk_and_password() {
    let td = tempdir().unwrap();
    let cover = td.path().join("cover.png");
    let input = td.path().join("key.bin");
    let stego = td.path().join("stego.png");
    let restored = td.path().join("restored.bin");

    write_cover(&cover);
    fs::write(&input, [0xAAu8; 64]).unwrap();

    embed::execute(
        &Context::default(),
        cover.to_str().unwrap(),
        input.to_str().unwrap(),
        stego.to_str().unwrap(),
        Some("stSh"),
        Some("vault.key"),
        Some("correct horse"),
    )
    .unwrap();

    // Default tag finds nothing
    let none = extract::execute(
        &Context::default(),
        stego.to_str().unwrap(),
        Some(restored.to_str().unwrap()),
        None,
        None,
        Some("correct horse"),
    )
    .unwrap();
    assert!(none.is_none());

    extract::execute(
        &Context::default(),
        stego.to_str().unwrap(),
        Some(restored.to_str().unwrap()),
        None,
        Some("stSh"),
        Some("correct horse"),
    )
    .unwrap();
    assert_eq!(fs::read(&restored).unwrap(), vec![0xAAu8; 64]);

    let report = inspect::execute(&Context::default(), stego.to_str().unwrap(), Some("stSh"), true)
        .unwrap();
    let payload = report.payload.unwrap();
    assert_eq!(payload.name, "vault.key");
    assert_eq!(payload.chunk_type, "stSh");
}

#[test]
fn embed_rejects_critical_chunk_type() {
    let td = tempdir().unwrap();
    let cover = td.path().join("cover.png");
    let input = td.path().join("f.txt");
    let stego = td.path().join("stego.png");

    write_cover(&cover);
    fs::write(&input, b"x").unwrap();

    let result = embed::execute(
        &Context::default(),
        cover.to_str().unwrap(),
        input.to_str().unwrap(),
        stego.to_str().unwrap(),
        Some("ZZZZ"),
        None,
        None,
    );
    assert!(result.is_err());
    assert!(!stego.exists());
}

#[test]
fn embed_rejects_non_png_cover() {
    let td = tempdir().unwrap();
    let cover = td.path().join("cover.bmp");
    let input = td.path().join("f.txt");
    let stego = td.path().join("stego.png");

    let grid = Grid::new(4, 4, vec![0; 48]).unwrap();
    fs::write(&cover, ImageRaster.save_grid(&grid, RasterFormat::Bmp).unwrap()).unwrap();
    fs::write(&input, b"x").unwrap();

    let result = embed::execute(
        &Context::default(),
        cover.to_str().unwrap(),
        input.to_str().unwrap(),
        stego.to_str().unwrap(),
        None,
        None,
        None,
    );
    assert!(result.is_err());
}

#[test]
fn inspect_reports_plain_png() {
    let td = tempdir().unwrap();
    let cover = td.path().join("cover.png");
    write_cover(&cover);

    let report =
        inspect::execute(&Context::default(), cover.to_str().unwrap(), None, false).unwrap();

    assert!(report.is_png);
    assert!(report.payload.is_none());
    assert_eq!(report.chunks.first().unwrap().chunk_type, "IHDR");
    assert_eq!(report.chunks.last().unwrap().chunk_type, "IEND");
    assert!(report.chunks.iter().all(|c| c.crc_valid));
}

#[test]
fn inspect_non_png_is_not_an_error() {
    let td = tempdir().unwrap();
    let path = td.path().join("notes.txt");
    fs::write(&path, b"just some text").unwrap();

    let report =
        inspect::execute(&Context::default(), path.to_str().unwrap(), None, false).unwrap();
    assert!(!report.is_png);
    assert!(report.chunks.is_empty());
}
