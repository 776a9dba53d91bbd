//! Extraction records produced by the graffiti decoder

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where in an output the concealed data was found
///
/// `None` only exists as a per-output classification result. It never
/// appears in an aggregated `Extraction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Location {
    None,
    /// OP_RETURN data push
    NullData,
    /// Hash slot of a pay-to-pubkey-hash script
    P2pkh,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::None => "NONE",
            Location::NullData => "NULL_DATA",
            Location::P2pkh => "P2PKH",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One concealed payload found in one output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraffitiRecord {
    pub location: Location,
    /// Index of the carrying output
    pub vout: usize,
    /// Absolute offset of the first payload byte within the transaction buffer
    pub offset: usize,
    pub payload: Vec<u8>,
}

/// Aggregated result of decoding one transaction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Records in output order
    pub records: Vec<GraffitiRecord>,
}

impl Extraction {
    pub fn has_graffiti(&self) -> bool {
        !self.records.is_empty()
    }

    /// Number of records for a given location
    pub fn count(&self, location: Location) -> usize {
        self.records
            .iter()
            .filter(|record| record.location == location)
            .count()
    }
}
