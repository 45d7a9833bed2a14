//! # pcx2sms
//!
//! Streaming converter from PCX images to Sega Master System tiles.
//!
//! The input is a 128-byte PCX header followed by run-length encoded pixel
//! data that decodes to one byte per pixel. The output is the SMS/Game Gear
//! 4bpp planar tile format: 8x8 tiles of 32 bytes, each pixel row stored as
//! four bit-plane bytes.
//!
//! ## Pipeline
//!
//! Conversion never holds more than one row of tiles in memory:
//!
//! 1. [`pcx::source::InputWindow`] reads the file 256 bytes at a time.
//! 2. [`pcx::rle::RunDecoder`] turns window bytes into runs.
//! 3. [`pcx::scanline::Scanline`] expands runs into one row of pixels.
//! 4. [`sms::TileRow`] bit-plane packs 8 rows into `width / 8` tiles,
//!    which [`ConversionContext`] writes out before decoding the next 8.
//!
//! ## Non-Goals
//!
//! - Palette extraction or colour matching
//! - Multi-plane PCX layouts and bit depths other than 8
//! - Images whose width or height is not a multiple of 8
//!
//! ## Usage
//!
//! ```no_run
//! use pcx2sms::{ConvertRequest, HeaderInfo, Limits, Unstoppable};
//!
//! let data: &[u8] = &[]; // your PCX bytes
//!
//! // Probe without decoding
//! let info = HeaderInfo::from_bytes(data)?;
//! println!("{}x{}, {} tiles", info.width, info.height, info.tile_count());
//!
//! let limits = Limits {
//!     max_pixels: Some(256 * 224),
//!     ..Default::default()
//! };
//! let tiles = ConvertRequest::new()
//!     .with_limits(&limits)
//!     .convert_bytes(data, Unstoppable)?;
//! assert_eq!(tiles.len() as u64, info.output_len());
//! # Ok::<(), pcx2sms::ConvertError>(())
//! ```

#![forbid(unsafe_code)]

extern crate alloc;

mod convert;
mod error;
mod limits;

pub mod pcx;
pub mod sms;

// Re-exports
pub use convert::{
    ConversionContext, ConvertRequest, ConvertSummary, Permissiveness, convert, convert_bytes,
};
pub use enough::{Stop, Unstoppable};
pub use error::ConvertError;
pub use limits::Limits;
pub use pcx::HeaderInfo;
pub use pcx::rle::Run;
