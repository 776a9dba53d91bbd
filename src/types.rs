//! Graffiti Decoder - Type System
//!
//! - `graffiti`: Extraction records and the location tag
//! - `report`: Serialisable JSON report built from an extraction

pub mod graffiti;
pub mod report;

pub use graffiti::{Extraction, GraffitiRecord, Location};
pub use report::{compute_txid, GraffitiReport, RecordReport};
