//! Scanline assembly: expand runs into one row of pixel bytes.

use alloc::vec;
use alloc::vec::Vec;
use std::io::Read;

use super::rle::RunDecoder;
use crate::convert::Permissiveness;
use crate::error::ConvertError;
use crate::sms::TILE_DIM;

/// Largest pixel value that fits the 4bpp tile format.
pub const MAX_PIXEL_VALUE: u8 = 0x0F;

/// One decoded row, one byte per pixel, read out 8 pixels at a time.
///
/// The row is due for refill once the cursor reaches `width`; a fresh
/// `Scanline` starts in that state.
pub struct Scanline {
    pixels: Vec<u8>,
    cursor: usize,
    /// Image row the next refill decodes.
    row: u32,
}

impl Scanline {
    pub fn new(width: usize) -> Self {
        Self {
            pixels: vec![0; width],
            cursor: width,
            row: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.pixels.len()
    }

    /// Rows assembled so far.
    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn is_consumed(&self) -> bool {
        self.cursor == self.pixels.len()
    }

    /// Decode the next row if the current one is consumed; otherwise no-op.
    ///
    /// Runs must sum to exactly `width`. A run that would write past the end
    /// of the row is rejected with [`ConvertError::RunOverrun`].
    pub fn refill<R: Read>(
        &mut self,
        decoder: &mut RunDecoder<R>,
        permissiveness: Permissiveness,
    ) -> Result<(), ConvertError> {
        if !self.is_consumed() {
            return Ok(());
        }
        let width = self.pixels.len();
        self.cursor = 0;
        while self.cursor < width {
            let offset = decoder.offset();
            let run = decoder.next_run()?;
            let end = self
                .cursor
                .checked_add(run.length)
                .filter(|&end| end <= width)
                .ok_or(ConvertError::RunOverrun {
                    offset,
                    row: self.row,
                    cursor: self.cursor,
                    length: run.length,
                    width,
                })?;
            if run.is_empty() {
                continue;
            }
            if permissiveness == Permissiveness::Strict && run.value > MAX_PIXEL_VALUE {
                return Err(ConvertError::PixelOutOfRange {
                    row: self.row,
                    column: self.cursor,
                    value: run.value,
                });
            }
            self.pixels[self.cursor..end].fill(run.value);
            self.cursor = end;
        }
        self.cursor = 0;
        self.row += 1;
        Ok(())
    }

    /// Next 8 pixels under the cursor, advancing past them.
    ///
    /// Returns `None` once the row is consumed.
    pub fn take_segment(&mut self) -> Option<[u8; TILE_DIM]> {
        let end = self.cursor.checked_add(TILE_DIM)?;
        let segment: [u8; TILE_DIM] = self.pixels.get(self.cursor..end)?.try_into().ok()?;
        self.cursor = end;
        Some(segment)
    }

    /// The whole row as last assembled.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pcx::source::InputWindow;

    fn decoder(data: &[u8]) -> RunDecoder<&[u8]> {
        RunDecoder::new(InputWindow::new(data, 128).unwrap())
    }

    #[test]
    fn assembles_runs_into_row() {
        let mut dec = decoder(&[0xC4, 0xAA, 0xC4, 0xBB]);
        let mut line = Scanline::new(8);
        assert!(line.is_consumed());
        line.refill(&mut dec, Permissiveness::Standard).unwrap();
        assert_eq!(line.pixels(), &[0xAA, 0xAA, 0xAA, 0xAA, 0xBB, 0xBB, 0xBB, 0xBB]);
        assert_eq!(line.row(), 1);
        assert!(!line.is_consumed());
    }

    #[test]
    fn zero_length_run_writes_nothing() {
        let mut dec = decoder(&[0xC0, 0x07, 0xC8, 0x03]);
        let mut line = Scanline::new(8);
        line.refill(&mut dec, Permissiveness::Standard).unwrap();
        assert_eq!(line.pixels(), &[0x03; 8]);
    }

    #[test]
    fn mixed_literals_and_runs() {
        let mut dec = decoder(&[0x01, 0x02, 0xC3, 0x0F, 0x04, 0xC2, 0x05]);
        let mut line = Scanline::new(8);
        line.refill(&mut dec, Permissiveness::Standard).unwrap();
        assert_eq!(line.pixels(), &[1, 2, 15, 15, 15, 4, 5, 5]);
    }

    #[test]
    fn refill_is_noop_until_consumed() {
        let mut dec = decoder(&[0xC8, 0x01, 0xC8, 0x02]);
        let mut line = Scanline::new(8);
        line.refill(&mut dec, Permissiveness::Standard).unwrap();
        line.refill(&mut dec, Permissiveness::Standard).unwrap();
        assert_eq!(line.pixels(), &[0x01; 8]);

        assert_eq!(line.take_segment(), Some([0x01; 8]));
        assert!(line.is_consumed());
        assert_eq!(line.take_segment(), None);

        line.refill(&mut dec, Permissiveness::Standard).unwrap();
        assert_eq!(line.take_segment(), Some([0x02; 8]));
        assert_eq!(line.row(), 2);
    }

    #[test]
    fn segments_follow_cursor() {
        let row: Vec<u8> = (0..16).collect();
        let mut dec = decoder(&row);
        let mut line = Scanline::new(16);
        line.refill(&mut dec, Permissiveness::Standard).unwrap();
        assert_eq!(line.take_segment(), Some([0, 1, 2, 3, 4, 5, 6, 7]));
        assert_eq!(line.take_segment(), Some([8, 9, 10, 11, 12, 13, 14, 15]));
        assert_eq!(line.take_segment(), None);
    }

    #[test]
    fn overrun_is_rejected_with_position() {
        // 6 pixels, then a run of 4 into an 8-wide row.
        let mut dec = decoder(&[0xC6, 0x01, 0xC4, 0x02]);
        let mut line = Scanline::new(8);
        match line.refill(&mut dec, Permissiveness::Standard) {
            Err(ConvertError::RunOverrun {
                offset,
                row,
                cursor,
                length,
                width,
            }) => {
                assert_eq!(offset, 130);
                assert_eq!(row, 0);
                assert_eq!(cursor, 6);
                assert_eq!(length, 4);
                assert_eq!(width, 8);
            }
            other => panic!("expected RunOverrun, got {other:?}"),
        }
    }

    #[test]
    fn truncated_row_is_eof() {
        let mut dec = decoder(&[0xC4, 0x01]);
        let mut line = Scanline::new(8);
        assert!(matches!(
            line.refill(&mut dec, Permissiveness::Standard),
            Err(ConvertError::UnexpectedEof { offset: 130 })
        ));
    }

    #[test]
    fn strict_rejects_wide_pixels() {
        let data = [0xC2, 0x03, 0xC6, 0x10];
        let mut line = Scanline::new(8);
        line.refill(&mut decoder(&data), Permissiveness::Standard)
            .unwrap();
        assert_eq!(line.pixels()[2], 0x10);

        let mut line = Scanline::new(8);
        match line.refill(&mut decoder(&data), Permissiveness::Strict) {
            Err(ConvertError::PixelOutOfRange { row, column, value }) => {
                assert_eq!((row, column, value), (0, 2, 0x10));
            }
            other => panic!("expected PixelOutOfRange, got {other:?}"),
        }
    }
}
