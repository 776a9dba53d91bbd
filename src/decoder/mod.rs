//! Graffiti Decoder
//!
//! Parses a serialised transaction, classifies every output script and
//! collects the concealed payloads it finds.
//!
//! ## Pipeline
//!
//! raw bytes -> [`ByteReader`] -> [`RawTransaction`] -> [`classify_script`]
//! per output -> [`Extraction`]
//!
//! Decoding is pure: no I/O, no shared state, and a structural failure anywhere
//! in the buffer aborts the whole decode. Independent decodes can run on as
//! many threads as the caller likes.

pub mod classifier;
pub mod error;
pub mod reader;
pub mod transaction;

pub use classifier::{classify_script, Classification};
pub use error::{DecoderError, DecoderResult};
pub use reader::ByteReader;
pub use transaction::{OutPoint, RawTransaction, TxIn, TxOut};

use crate::types::graffiti::{Extraction, GraffitiRecord, Location};
use tracing::debug;

/// Knobs applied after classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Report P2PKH hash slots as graffiti carriers
    pub include_p2pkh: bool,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            include_p2pkh: true,
        }
    }
}

/// Stateless decoder configured with [`DecoderOptions`]
#[derive(Debug, Clone, Copy, Default)]
pub struct GraffitiDecoder {
    options: DecoderOptions,
}

impl GraffitiDecoder {
    pub fn new(options: DecoderOptions) -> Self {
        Self { options }
    }

    /// Decode a serialised transaction
    pub fn decode(&self, raw: &[u8]) -> DecoderResult<Extraction> {
        let mut extraction = extract_graffiti(raw)?;
        if !self.options.include_p2pkh {
            extraction
                .records
                .retain(|record| record.location != Location::P2pkh);
        }
        Ok(extraction)
    }
}

/// Extract every graffiti record from a serialised transaction
///
/// Records follow output order, one per matching output.
pub fn extract_graffiti(raw: &[u8]) -> DecoderResult<Extraction> {
    let tx = RawTransaction::parse(raw)?;
    debug!(
        "Parsed transaction: version {}, {} inputs, {} outputs, {} bytes",
        tx.version,
        tx.inputs.len(),
        tx.outputs.len(),
        raw.len()
    );

    let mut records = Vec::new();
    for (vout, output) in tx.outputs.iter().enumerate() {
        let classification = classify_script(output.script_pubkey);
        let Classification::Match {
            location,
            relative_offset,
            ..
        } = classification
        else {
            continue;
        };
        let Some(payload) = classification.payload(output.script_pubkey) else {
            continue;
        };

        let offset = output.script_offset + relative_offset;
        debug!(
            "Output {} matches {} ({} bytes at offset {})",
            vout,
            location,
            payload.len(),
            offset
        );

        records.push(GraffitiRecord {
            location,
            vout,
            offset,
            payload: payload.to_vec(),
        });
    }

    Ok(Extraction { records })
}
