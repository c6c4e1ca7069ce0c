//! Reversal fallback example
//!
//! Simulates a raster path that returns the pixel buffer in opposite order
//! and shows how `allow_direct_decode` controls the fallback.

use stegpack_core::{
    pixel::{pack, unpack_grid},
    Grid,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Stegpack Reversal Fallback Example\n");

    let grid = pack("flipped.txt", b"stored back to front")?;
    println!("Packed into {}x{} grid", grid.width(), grid.height());

    let (width, height) = (grid.width(), grid.height());
    let mut pixels = grid.into_pixels();
    pixels.reverse();
    let reversed = Grid::new(width, height, pixels)?;

    let direct = unpack_grid(reversed.clone(), true);
    println!("Direct decode:   {}", if direct.is_empty() { "nothing found" } else { "recovered" });

    let fallback = unpack_grid(reversed, false);
    match fallback.into_parts() {
        Some((name, data)) => println!(
            "Fallback decode: {} = {:?}",
            name,
            String::from_utf8_lossy(&data)
        ),
        None => println!("Fallback decode: nothing found"),
    }

    Ok(())
}
