//! SMS tile output side.
//!
//! A tile is 8x8 pixels stored as 32 bytes: 8 rows of 4 bytes, one byte per
//! bit-plane (plane 0 first), most significant bit = leftmost pixel. Tiles
//! are emitted left to right across a tile row, tile rows top to bottom.

pub mod planar;

use alloc::vec;
use alloc::vec::Vec;

use crate::pcx::scanline::Scanline;
pub use planar::{pack_planes, unpack_planes};

/// Tile edge length in pixels.
pub const TILE_DIM: usize = 8;
/// Bit-planes per pixel.
pub const PLANES: usize = 4;
/// Bytes per pixel row within a tile (one per plane).
pub const BYTES_PER_TILE_ROW: usize = PLANES;
pub const BYTES_PER_TILE: usize = TILE_DIM * BYTES_PER_TILE_ROW;

/// Packed output for 8 scanlines: `width / 8` consecutive tiles.
pub struct TileRow {
    data: Vec<u8>,
}

impl TileRow {
    /// `width` must be a multiple of 8.
    pub fn new(width: usize) -> Self {
        Self {
            data: vec![0; width / TILE_DIM * BYTES_PER_TILE],
        }
    }

    /// Tiles in this row.
    pub fn tiles(&self) -> usize {
        self.data.len() / BYTES_PER_TILE
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The 32 bytes of tile `column`.
    pub fn tile(&self, column: usize) -> Option<&[u8]> {
        let start = column.checked_mul(BYTES_PER_TILE)?;
        self.data.get(start..start + BYTES_PER_TILE)
    }

    /// Pack a freshly assembled scanline into pixel row `row` (0..8) of every
    /// tile, consuming the scanline 8 pixels at a time.
    ///
    /// Returns the number of tiles written.
    pub fn pack_scanline(&mut self, row: usize, scanline: &mut Scanline) -> usize {
        debug_assert!(row < TILE_DIM);
        let mut column = 0;
        while let Some(pixels) = scanline.take_segment() {
            let at = column * BYTES_PER_TILE + row * BYTES_PER_TILE_ROW;
            let Some(dst) = self.data.get_mut(at..at + BYTES_PER_TILE_ROW) else {
                break;
            };
            dst.copy_from_slice(&pack_planes(&pixels));
            column += 1;
        }
        column
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::Permissiveness;
    use crate::pcx::rle::RunDecoder;
    use crate::pcx::source::InputWindow;

    #[test]
    fn geometry() {
        assert_eq!(BYTES_PER_TILE, 32);
        let row = TileRow::new(24);
        assert_eq!(row.tiles(), 3);
        assert_eq!(row.as_bytes().len(), 96);
        assert!(row.tile(2).is_some());
        assert!(row.tile(3).is_none());
    }

    #[test]
    fn scanline_lands_at_row_offset_of_each_tile() {
        // 16 wide: left tile value 1, right tile value 8.
        let data = [0xC8, 0x01, 0xC8, 0x08];
        let mut dec = RunDecoder::new(InputWindow::new(&data[..], 0).unwrap());
        let mut line = Scanline::new(16);
        line.refill(&mut dec, Permissiveness::Standard).unwrap();

        let mut tiles = TileRow::new(16);
        assert_eq!(tiles.pack_scanline(3, &mut line), 2);
        assert!(line.is_consumed());

        let left = tiles.tile(0).unwrap();
        assert_eq!(&left[12..16], &[0xFF, 0, 0, 0]);
        assert!(left[..12].iter().chain(&left[16..]).all(|&b| b == 0));

        let right = tiles.tile(1).unwrap();
        assert_eq!(&right[12..16], &[0, 0, 0, 0xFF]);
    }
}
