use thiserror::Error;

use crate::decoder::DecoderError;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Structural decode failures
    #[error("Decoder error: {0}")]
    Decoder(#[from] DecoderError),

    /// Hex input that could not be turned into bytes
    #[error("Invalid hex input: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input that never reached the decoder
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Report serialisation
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl AppError {
    /// The decoder error behind this failure, if any
    pub fn as_decoder_error(&self) -> Option<&DecoderError> {
        match self {
            AppError::Decoder(err) => Some(err),
            _ => None,
        }
    }

    /// Short machine-readable kind, used in batch error lines
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Decoder(err) => err.kind(),
            AppError::InvalidHex(_) => "invalid_hex",
            AppError::Io(_) => "io",
            AppError::Config(_) => "config",
            AppError::InvalidData(_) => "invalid_data",
            AppError::Json(_) => "json",
        }
    }
}
