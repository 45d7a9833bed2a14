//! Conversion driver: header, buffer allocation and the tile-row loop.

use alloc::vec::Vec;
use std::io::{Read, Write};

use enough::Stop;

use crate::error::ConvertError;
use crate::limits::Limits;
use crate::pcx::rle::{Run, RunDecoder};
use crate::pcx::scanline::Scanline;
use crate::pcx::source::{INPUT_WINDOW_CAPACITY, InputWindow};
use crate::pcx::{self, HEADER_LEN, HeaderInfo};
use crate::sms::{TILE_DIM, TileRow};

/// Controls how strictly decoded pixel values are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permissiveness {
    /// Reject any decoded pixel above `0x0F`.
    Strict,

    /// Accept any byte and pack only its low nibble.
    #[default]
    Standard,
}

/// Outcome of a successful conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConvertSummary {
    pub header: HeaderInfo,
    pub tile_rows: u32,
    pub tiles: u64,
    /// Input bytes consumed, header included.
    pub bytes_read: u64,
    pub bytes_written: u64,
}

/// All mutable state of one conversion: the three buffers, the run decoder
/// and both streams.
///
/// Buffers are sized once from the header and reused for every tile row.
pub struct ConversionContext<R, W> {
    header: HeaderInfo,
    decoder: RunDecoder<R>,
    scanline: Scanline,
    tiles: TileRow,
    output: W,
    permissiveness: Permissiveness,
    tile_rows: u32,
    bytes_written: u64,
}

impl<R: Read, W: Write> ConversionContext<R, W> {
    /// Read and validate the header, then allocate the buffers.
    ///
    /// Nothing is written to `output` here, so a rejected header leaves the
    /// output untouched.
    pub fn new(
        mut reader: R,
        output: W,
        limits: Option<&Limits>,
        permissiveness: Permissiveness,
    ) -> Result<Self, ConvertError> {
        let header = pcx::read_header(&mut reader)?;
        tracing::debug!(
            width = header.width,
            height = header.height,
            "parsed PCX header"
        );
        header.validate()?;

        let width = header.width as usize;
        let tile_row_bytes = header.tile_row_bytes();
        if let Some(limits) = limits {
            limits.check(header.width, header.height)?;
            limits.check_memory(INPUT_WINDOW_CAPACITY + width + tile_row_bytes)?;
        }
        tracing::debug!(
            scanline_bytes = width,
            tile_row_bytes,
            tile_rows = header.tiles_down(),
            "allocating conversion buffers"
        );

        let window = InputWindow::new(reader, HEADER_LEN as u64)?;
        Ok(Self {
            header,
            decoder: RunDecoder::new(window),
            scanline: Scanline::new(width),
            tiles: TileRow::new(width),
            output,
            permissiveness,
            tile_rows: 0,
            bytes_written: 0,
        })
    }

    pub fn header(&self) -> HeaderInfo {
        self.header
    }

    /// Decode one run from the input window.
    pub fn next_run(&mut self) -> Result<Run, ConvertError> {
        self.decoder.next_run()
    }

    /// Assemble the next scanline if the current one is consumed.
    pub fn next_8_pixels(&mut self) -> Result<(), ConvertError> {
        self.scanline.refill(&mut self.decoder, self.permissiveness)
    }

    /// Decode 8 scanlines and pack them into one full row of tiles.
    pub fn next_8_scanlines(&mut self) -> Result<&[u8], ConvertError> {
        for row in 0..TILE_DIM {
            self.next_8_pixels()?;
            let packed = self.tiles.pack_scanline(row, &mut self.scanline);
            debug_assert_eq!(packed, self.tiles.tiles());
        }
        Ok(self.tiles.as_bytes())
    }

    /// Write the current tile row to the output stream.
    pub fn write_tile_row(&mut self) -> Result<(), ConvertError> {
        let bytes = self.tiles.as_bytes();
        self.output.write_all(bytes)?;
        self.bytes_written += bytes.len() as u64;
        self.tile_rows += 1;
        tracing::trace!(
            tile_row = self.tile_rows,
            offset = self.decoder.offset(),
            "tile row written"
        );
        Ok(())
    }

    /// Convert every remaining tile row, checking `stop` before each one.
    pub fn run(mut self, stop: &dyn Stop) -> Result<(ConvertSummary, W), ConvertError> {
        while self.tile_rows < self.header.tiles_down() {
            stop.check()?;
            self.next_8_scanlines()?;
            self.write_tile_row()?;
        }
        self.finish()
    }

    /// Flush the output and report what was converted.
    pub fn finish(mut self) -> Result<(ConvertSummary, W), ConvertError> {
        self.output.flush()?;
        let summary = ConvertSummary {
            header: self.header,
            tile_rows: self.tile_rows,
            tiles: u64::from(self.tile_rows) * u64::from(self.header.tiles_across()),
            bytes_read: self.decoder.offset(),
            bytes_written: self.bytes_written,
        };
        tracing::debug!(?summary, "conversion finished");
        Ok((summary, self.output))
    }
}

/// Builder for a conversion with optional limits and strictness.
#[derive(Clone, Debug, Default)]
pub struct ConvertRequest<'a> {
    limits: Option<&'a Limits>,
    permissiveness: Permissiveness,
}

impl<'a> ConvertRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_permissiveness(mut self, permissiveness: Permissiveness) -> Self {
        self.permissiveness = permissiveness;
        self
    }

    /// Stream a PCX file from `reader` to packed tiles on `writer`.
    ///
    /// Output written before an error is left in place.
    pub fn convert<R: Read, W: Write>(
        &self,
        reader: R,
        writer: W,
        stop: impl Stop,
    ) -> Result<ConvertSummary, ConvertError> {
        let context = ConversionContext::new(reader, writer, self.limits, self.permissiveness)?;
        let (summary, _) = context.run(&stop)?;
        Ok(summary)
    }

    /// Convert an in-memory PCX file, returning the packed tiles.
    pub fn convert_bytes(&self, data: &[u8], stop: impl Stop) -> Result<Vec<u8>, ConvertError> {
        let mut out = Vec::new();
        self.convert(data, &mut out, stop)?;
        Ok(out)
    }
}

/// Stream-convert with default settings.
pub fn convert<R: Read, W: Write>(
    reader: R,
    writer: W,
    stop: impl Stop,
) -> Result<ConvertSummary, ConvertError> {
    ConvertRequest::new().convert(reader, writer, stop)
}

/// Convert an in-memory PCX file with default settings.
pub fn convert_bytes(data: &[u8], stop: impl Stop) -> Result<Vec<u8>, ConvertError> {
    ConvertRequest::new().convert_bytes(data, stop)
}
