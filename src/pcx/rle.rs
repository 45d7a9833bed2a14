//! PCX run-length decoding.
//!
//! A byte with both high bits set is a run marker: its low six bits give the
//! repeat count and the following byte is the value. Any other byte is a
//! literal with an implicit count of one. A marker of exactly `0xC0` encodes
//! a legal zero-length run.

use std::io::Read;

use super::source::InputWindow;
use crate::error::ConvertError;

/// High bits that flag a run marker.
pub const RUN_MARKER: u8 = 0xC0;
/// Count bits of a run marker.
pub const RUN_LENGTH_MASK: u8 = 0x3F;

/// `value` repeated `length` times.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run {
    pub value: u8,
    pub length: usize,
}

impl Run {
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// Pulls one [`Run`] at a time out of an [`InputWindow`].
pub struct RunDecoder<R> {
    window: InputWindow<R>,
}

impl<R: Read> RunDecoder<R> {
    pub fn new(window: InputWindow<R>) -> Self {
        Self { window }
    }

    /// Decode the next run, consuming one byte for a literal or two for a
    /// marker plus value.
    pub fn next_run(&mut self) -> Result<Run, ConvertError> {
        let code = self.window.current()?;
        self.window.advance()?;
        if code & RUN_MARKER != RUN_MARKER {
            return Ok(Run {
                value: code,
                length: 1,
            });
        }
        let value = self.window.current()?;
        self.window.advance()?;
        Ok(Run {
            value,
            length: usize::from(code & RUN_LENGTH_MASK),
        })
    }

    /// Absolute stream offset of the next undecoded byte.
    pub fn offset(&self) -> u64 {
        self.window.offset()
    }

    pub fn window(&self) -> &InputWindow<R> {
        &self.window
    }
}
