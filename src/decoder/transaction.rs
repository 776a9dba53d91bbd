//! Structural model of a legacy-serialised transaction
//!
//! The model borrows every script from the input buffer, so it lives no longer
//! than the buffer it was parsed from. Only the output scripts and their
//! absolute offsets matter downstream; inputs are parsed to keep the cursor
//! aligned.

use super::error::{DecoderError, DecoderResult};
use super::reader::ByteReader;
use tracing::trace;

/// Smallest possible serialised input: outpoint (36) + empty script (1) + sequence (4)
const MIN_INPUT_SIZE: usize = 41;

/// Smallest possible serialised output: value (8) + empty script (1)
const MIN_OUTPUT_SIZE: usize = 9;

/// Reference to the output being spent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutPoint {
    pub txid: [u8; 32],
    pub vout: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxIn<'a> {
    pub previous_output: OutPoint,
    pub script_sig: &'a [u8],
    pub sequence: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOut<'a> {
    /// Amount in satoshis
    pub value: u64,
    pub script_pubkey: &'a [u8],
    /// Absolute offset of the first script byte within the transaction buffer
    pub script_offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTransaction<'a> {
    pub version: i32,
    pub inputs: Vec<TxIn<'a>>,
    pub outputs: Vec<TxOut<'a>>,
    pub lock_time: u32,
}

impl<'a> RawTransaction<'a> {
    /// Parse a complete transaction, consuming the whole buffer
    pub fn parse(buf: &'a [u8]) -> DecoderResult<Self> {
        let mut reader = ByteReader::new(buf);

        let version = reader.read_i32()?;

        let input_count = reader.read_length()?;
        trace!("version {} with {} inputs", version, input_count);
        let mut inputs = Vec::with_capacity(input_count.min(reader.remaining() / MIN_INPUT_SIZE));
        for _ in 0..input_count {
            inputs.push(read_input(&mut reader)?);
        }

        let output_count = reader.read_length()?;
        trace!("{} outputs starting at offset {}", output_count, reader.position());
        let mut outputs =
            Vec::with_capacity(output_count.min(reader.remaining() / MIN_OUTPUT_SIZE));
        for _ in 0..output_count {
            outputs.push(read_output(&mut reader)?);
        }

        let lock_time = reader.read_u32()?;

        if !reader.is_exhausted() {
            return Err(DecoderError::TrailingBytes {
                offset: reader.position(),
                count: reader.remaining(),
            });
        }

        Ok(Self {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }
}

fn read_input<'a>(reader: &mut ByteReader<'a>) -> DecoderResult<TxIn<'a>> {
    let txid = reader.read_array::<32>()?;
    let vout = reader.read_u32()?;
    let script_sig = reader.read_var_bytes()?;
    let sequence = reader.read_u32()?;

    Ok(TxIn {
        previous_output: OutPoint { txid, vout },
        script_sig,
        sequence,
    })
}

fn read_output<'a>(reader: &mut ByteReader<'a>) -> DecoderResult<TxOut<'a>> {
    let value = reader.read_u64()?;
    let script_len = reader.read_length()?;
    let script_offset = reader.position();
    let script_pubkey = reader.read_bytes(script_len)?;

    Ok(TxOut {
        value,
        script_pubkey,
        script_offset,
    })
}
