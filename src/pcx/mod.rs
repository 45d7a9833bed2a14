//! PCX input side: header, buffered byte source, run-length decoder and
//! scanline assembler.
//!
//! Only the four image-window words of the 128-byte header are consumed.
//! Palette, plane count and bits-per-pixel fields are not read; the pixel
//! stream is taken to decode to one byte per pixel with the colour index in
//! the low nibble.

pub mod rle;
pub mod scanline;
pub mod source;

use std::io::{ErrorKind, Read};

use crate::error::ConvertError;
use crate::sms::{BYTES_PER_TILE, TILE_DIM};

/// Size of the fixed PCX header block that precedes the pixel data.
pub const HEADER_LEN: usize = 128;

/// The image window stored in header words 2..=5.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcxWindow {
    pub xmin: u16,
    pub ymin: u16,
    pub xmax: u16,
    pub ymax: u16,
}

/// Extract the image window from a raw header (little-endian words at byte
/// offsets 4, 6, 8 and 10).
pub fn header_window(header: &[u8; HEADER_LEN]) -> PcxWindow {
    let word = |at: usize| u16::from_le_bytes([header[at], header[at + 1]]);
    PcxWindow {
        xmin: word(4),
        ymin: word(6),
        xmax: word(8),
        ymax: word(10),
    }
}

/// Image dimensions derived from the header window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderInfo {
    pub width: u32,
    pub height: u32,
}

impl HeaderInfo {
    /// Compute `width = xmax - xmin + 1` and `height = ymax - ymin + 1`.
    ///
    /// An inverted window is rejected rather than wrapped.
    pub fn from_window(window: PcxWindow) -> Result<Self, ConvertError> {
        if window.xmax < window.xmin {
            return Err(ConvertError::InvalidHeader(alloc::format!(
                "xmax {} is less than xmin {}",
                window.xmax,
                window.xmin
            )));
        }
        if window.ymax < window.ymin {
            return Err(ConvertError::InvalidHeader(alloc::format!(
                "ymax {} is less than ymin {}",
                window.ymax,
                window.ymin
            )));
        }
        Ok(Self {
            width: u32::from(window.xmax - window.xmin) + 1,
            height: u32::from(window.ymax - window.ymin) + 1,
        })
    }

    /// Probe dimensions from an in-memory file without decoding pixels.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ConvertError> {
        let header: &[u8; HEADER_LEN] = data
            .get(..HEADER_LEN)
            .and_then(|h| h.try_into().ok())
            .ok_or(ConvertError::TruncatedHeader {
                available: data.len(),
            })?;
        Self::from_window(header_window(header))
    }

    /// Reject dimensions that cannot be cut into whole 8x8 tiles.
    pub fn validate(&self) -> Result<(), ConvertError> {
        let dim = TILE_DIM as u32;
        if self.width == 0 || self.height == 0 || self.width % dim != 0 || self.height % dim != 0
        {
            return Err(ConvertError::UnsupportedDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Tiles per tile row.
    pub fn tiles_across(&self) -> u32 {
        self.width / TILE_DIM as u32
    }

    /// Number of tile rows.
    pub fn tiles_down(&self) -> u32 {
        self.height / TILE_DIM as u32
    }

    pub fn tile_count(&self) -> u64 {
        u64::from(self.tiles_across()) * u64::from(self.tiles_down())
    }

    /// Packed bytes for one row of tiles (8 scanlines).
    pub fn tile_row_bytes(&self) -> usize {
        self.tiles_across() as usize * BYTES_PER_TILE
    }

    /// Total packed output size.
    pub fn output_len(&self) -> u64 {
        self.tile_count() * BYTES_PER_TILE as u64
    }
}

/// Read the header block and extract the image dimensions.
///
/// Short reads are retried until the block is complete or the stream ends.
pub(crate) fn read_header<R: Read>(reader: &mut R) -> Result<HeaderInfo, ConvertError> {
    let mut header = [0u8; HEADER_LEN];
    let mut available = 0;
    while available < HEADER_LEN {
        match reader.read(&mut header[available..]) {
            Ok(0) => return Err(ConvertError::TruncatedHeader { available }),
            Ok(n) => available += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    HeaderInfo::from_window(header_window(&header))
}
