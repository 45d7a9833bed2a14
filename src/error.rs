use alloc::string::String;
use enough::StopReason;

/// Errors from PCX to SMS tile conversion.
///
/// Every variant is terminal for the conversion that produced it: the input
/// is a single forward-only stream, so there is nothing to retry.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConvertError {
    #[error("truncated header: need 128 bytes, got {available}")]
    TruncatedHeader { available: usize },

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported dimensions: {width}x{height} (both must be non-zero multiples of 8)")]
    UnsupportedDimensions { width: u32, height: u32 },

    #[error("unexpected end of input at byte offset {offset}")]
    UnexpectedEof { offset: u64 },

    #[error(
        "run of {length} at byte offset {offset} overruns scanline {row} \
         (cursor {cursor}, width {width})"
    )]
    RunOverrun {
        offset: u64,
        row: u32,
        cursor: usize,
        length: usize,
        width: usize,
    },

    #[error("pixel value {value:#04x} out of range at row {row}, column {column}")]
    PixelOutOfRange { row: u32, column: usize, value: u8 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for ConvertError {
    fn from(r: StopReason) -> Self {
        ConvertError::Cancelled(r)
    }
}
