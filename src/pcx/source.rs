//! Buffered byte source over the compressed pixel stream.

use std::io::{ErrorKind, Read};

use crate::error::ConvertError;

/// Bytes requested from the underlying reader per refill.
pub const INPUT_WINDOW_CAPACITY: usize = 256;

/// Fixed-capacity window over a reader, refilled when fully consumed.
///
/// `cursor <= filled <= INPUT_WINDOW_CAPACITY` always holds. A refill that
/// returns zero bytes leaves the window empty, and any further read fails
/// with [`ConvertError::UnexpectedEof`].
pub struct InputWindow<R> {
    reader: R,
    data: [u8; INPUT_WINDOW_CAPACITY],
    filled: usize,
    cursor: usize,
    /// Absolute stream offset of `data[0]`.
    start: u64,
    refills: u64,
}

impl<R: Read> InputWindow<R> {
    /// Wrap `reader` and perform the initial fill.
    ///
    /// `start_offset` is the absolute position of the reader in its stream,
    /// used only for error reporting.
    pub fn new(reader: R, start_offset: u64) -> Result<Self, ConvertError> {
        let mut window = Self {
            reader,
            data: [0; INPUT_WINDOW_CAPACITY],
            filled: 0,
            cursor: 0,
            start: start_offset,
            refills: 0,
        };
        window.fill()?;
        Ok(window)
    }

    /// The byte under the cursor.
    pub fn current(&self) -> Result<u8, ConvertError> {
        self.data[..self.filled]
            .get(self.cursor)
            .copied()
            .ok_or(ConvertError::UnexpectedEof {
                offset: self.offset(),
            })
    }

    /// Step past the current byte, refilling once the window is drained.
    pub fn advance(&mut self) -> Result<(), ConvertError> {
        if self.cursor >= self.filled {
            return Err(ConvertError::UnexpectedEof {
                offset: self.offset(),
            });
        }
        self.cursor += 1;
        if self.cursor == self.filled {
            self.fill()?;
            self.refills += 1;
        }
        Ok(())
    }

    /// Absolute stream offset of the cursor.
    pub fn offset(&self) -> u64 {
        self.start + self.cursor as u64
    }

    /// Bytes held by the last fill.
    pub fn filled(&self) -> usize {
        self.filled
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Refills performed after the initial fill.
    pub fn refills(&self) -> u64 {
        self.refills
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn fill(&mut self) -> Result<(), ConvertError> {
        self.start += self.filled as u64;
        let n = loop {
            match self.reader.read(&mut self.data) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };
        tracing::trace!(offset = self.start, bytes = n, "input window refilled");
        self.filled = n;
        self.cursor = 0;
        Ok(())
    }
}
