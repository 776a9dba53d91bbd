//! Decoder-specific error types

/// Result type for decoder operations
pub type DecoderResult<T> = Result<T, DecoderError>;

/// Structural failures raised while parsing a serialised transaction.
///
/// Every variant is terminal: a decode that hits one of these returns no
/// records at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecoderError {
    /// Fewer bytes remain than a field requires
    #[error("Truncated input at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// Varint marker does not agree with the encoded value (non-canonical width)
    #[error("Malformed varint at offset {offset}: marker 0x{marker:02x} encodes {value}")]
    MalformedVarint { offset: usize, marker: u8, value: u64 },

    /// Bytes left over after the locktime field
    #[error("Trailing bytes at offset {offset}: {count} unaccounted bytes after locktime")]
    TrailingBytes { offset: usize, count: usize },

    /// Declared length cannot be addressed on this platform
    #[error("Length {length} at offset {offset} exceeds addressable size")]
    LengthOverflow { offset: usize, length: u64 },
}

impl DecoderError {
    /// True for every "ran out of bytes" condition, including lengths that
    /// could never be satisfied by any buffer.
    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            DecoderError::TruncatedInput { .. } | DecoderError::LengthOverflow { .. }
        )
    }

    /// Short machine-readable kind, used in batch error lines
    pub fn kind(&self) -> &'static str {
        match self {
            DecoderError::TruncatedInput { .. } => "truncated_input",
            DecoderError::MalformedVarint { .. } => "malformed_varint",
            DecoderError::TrailingBytes { .. } => "trailing_bytes",
            DecoderError::LengthOverflow { .. } => "length_overflow",
        }
    }
}
