//! Bit-plane transpose between packed nibbles and SMS plane bytes.

use super::{PLANES, TILE_DIM};

/// Pack 8 horizontally adjacent pixels into one byte per bit-plane.
///
/// Bit `7 - x` of plane `p` is bit `p` of pixel `x`, so the leftmost pixel
/// lands in the most significant bit. Pixel bits above the low nibble are
/// ignored.
pub fn pack_planes(pixels: &[u8; TILE_DIM]) -> [u8; PLANES] {
    let mut planes = [0u8; PLANES];
    for (x, &pixel) in pixels.iter().enumerate() {
        let shift = TILE_DIM - 1 - x;
        for (p, plane) in planes.iter_mut().enumerate() {
            *plane |= ((pixel >> p) & 1) << shift;
        }
    }
    planes
}

/// Inverse of [`pack_planes`]: recover 8 nibble pixels from 4 plane bytes.
pub fn unpack_planes(planes: &[u8; PLANES]) -> [u8; TILE_DIM] {
    let mut pixels = [0u8; TILE_DIM];
    for (x, pixel) in pixels.iter_mut().enumerate() {
        let shift = TILE_DIM - 1 - x;
        for (p, &plane) in planes.iter().enumerate() {
            *pixel |= ((plane >> shift) & 1) << p;
        }
    }
    pixels
}
