//! Bounds-checked cursor over a serialised transaction
//!
//! All multi-byte integers on the wire are little-endian. Variable-length
//! integers use the compact-size encoding:
//!
//! | Marker        | Width | Value range              |
//! |---------------|-------|--------------------------|
//! | `0x00..=0xfc` | 1     | the marker itself        |
//! | `0xfd`        | 3     | `0xfd..=0xffff`          |
//! | `0xfe`        | 5     | `0x1_0000..=0xffff_ffff` |
//! | `0xff`        | 9     | `0x1_0000_0000..`        |
//!
//! A wider encoding carrying a value that fits a narrower one is rejected as
//! `MalformedVarint`.

use byteorder::{ByteOrder, LittleEndian};

use super::error::{DecoderError, DecoderResult};

/// Read-only cursor over a caller-owned byte buffer
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current absolute offset from the start of the buffer
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Borrow the next `n` bytes and advance past them
    pub fn read_bytes(&mut self, n: usize) -> DecoderResult<&'a [u8]> {
        if n > self.remaining() {
            return Err(DecoderError::TruncatedInput {
                offset: self.pos,
                needed: n,
                remaining: self.remaining(),
            });
        }
        let start = self.pos;
        self.pos += n;
        Ok(&self.buf[start..self.pos])
    }

    /// Read a fixed-size array, e.g. a 32-byte outpoint hash
    pub fn read_array<const N: usize>(&mut self) -> DecoderResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> DecoderResult<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16(&mut self) -> DecoderResult<u16> {
        Ok(LittleEndian::read_u16(self.read_bytes(2)?))
    }

    pub fn read_u32(&mut self) -> DecoderResult<u32> {
        Ok(LittleEndian::read_u32(self.read_bytes(4)?))
    }

    pub fn read_i32(&mut self) -> DecoderResult<i32> {
        Ok(LittleEndian::read_i32(self.read_bytes(4)?))
    }

    pub fn read_u64(&mut self) -> DecoderResult<u64> {
        Ok(LittleEndian::read_u64(self.read_bytes(8)?))
    }

    /// Decode a compact-size varint
    pub fn read_varint(&mut self) -> DecoderResult<u64> {
        let start = self.pos;
        let marker = self.read_u8()?;

        let (value, minimum) = match marker {
            0x00..=0xfc => return Ok(u64::from(marker)),
            0xfd => (u64::from(self.read_u16()?), 0xfd),
            0xfe => (u64::from(self.read_u32()?), 0x1_0000),
            0xff => (self.read_u64()?, 0x1_0000_0000),
        };

        if value < minimum {
            return Err(DecoderError::MalformedVarint {
                offset: start,
                marker,
                value,
            });
        }

        Ok(value)
    }

    /// Read a varint as an in-memory length
    pub fn read_length(&mut self) -> DecoderResult<usize> {
        let offset = self.pos;
        let length = self.read_varint()?;
        usize::try_from(length).map_err(|_| DecoderError::LengthOverflow { offset, length })
    }

    /// Read a varint length prefix followed by that many bytes
    pub fn read_var_bytes(&mut self) -> DecoderResult<&'a [u8]> {
        let len = self.read_length()?;
        self.read_bytes(len)
    }
}
