//! JSON report built from an extraction
//!
//! Payloads are hex-encoded. A `text` rendering is attached when the payload
//! is entirely printable ASCII, which is how most graffiti is written.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::graffiti::{Extraction, GraffitiRecord, Location};

/// Serialisable view of a single extraction record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordReport {
    #[serde(rename = "where")]
    pub location: Location,
    pub vout: usize,
    pub offset: usize,
    /// Hex-encoded payload
    pub payload: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub text: Option<String>,
}

impl From<&GraffitiRecord> for RecordReport {
    fn from(record: &GraffitiRecord) -> Self {
        Self {
            location: record.location,
            vout: record.vout,
            offset: record.offset,
            payload: hex::encode(&record.payload),
            text: printable_text(&record.payload),
        }
    }
}

/// Top-level report for one transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraffitiReport {
    pub graffiti: bool,
    pub txid: String,
    /// Serialised transaction size in bytes
    pub size: usize,
    pub records: Vec<RecordReport>,
}

impl GraffitiReport {
    /// Build the report for `raw`, the exact buffer the extraction came from
    pub fn build(raw: &[u8], extraction: &Extraction) -> Self {
        Self {
            graffiti: extraction.has_graffiti(),
            txid: compute_txid(raw),
            size: raw.len(),
            records: extraction.records.iter().map(RecordReport::from).collect(),
        }
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

/// Double-SHA256 of the serialised transaction, in display (reversed) byte order
pub fn compute_txid(raw: &[u8]) -> String {
    let first = Sha256::digest(raw);
    let mut hash = Sha256::digest(first).to_vec();
    hash.reverse();
    hex::encode(hash)
}

/// Render the payload as text if every byte is printable ASCII or whitespace
pub fn printable_text(payload: &[u8]) -> Option<String> {
    if payload.is_empty() {
        return None;
    }
    let printable = payload
        .iter()
        .all(|&b| b.is_ascii_graphic() || b == b' ' || b == b'\n' || b == b'\r' || b == b'\t');

    printable.then(|| String::from_utf8_lossy(payload).into_owned())
}
