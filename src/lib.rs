//! Bitcoin Transaction Graffiti Decoder
//!
//! Finds non-monetary data concealed in transaction outputs (OP_RETURN pushes
//! and P2PKH hash slots) and reports each payload with its exact byte offset.

pub mod cli;
pub mod config;
pub mod decoder;
pub mod errors;
pub mod types;

pub use decoder::{extract_graffiti, DecoderError, DecoderOptions, GraffitiDecoder};
pub use types::graffiti::{Extraction, GraffitiRecord, Location};
pub use types::report::GraffitiReport;
