use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::decoder::DecoderOptions;

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_NAME: &str = "graffiti";

/// Application configuration loaded from graffiti.toml or environment variables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub decoder: DecoderConfig,
    pub output: OutputConfig,
    pub batch: BatchConfig,
}

/// How transactions are read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Hex text, as printed by `getrawtransaction`
    Hex,
    /// Serialised bytes
    Raw,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecoderConfig {
    pub include_p2pkh: bool,
    pub input_format: InputFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub pretty: bool,
    /// Print a report even when no graffiti was found
    pub always_print: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Worker threads for batch decoding (0 = available parallelism)
    pub workers: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            decoder: DecoderConfig {
                include_p2pkh: true,
                input_format: InputFormat::Hex,
            },
            output: OutputConfig {
                pretty: false,
                always_print: false,
            },
            batch: BatchConfig { workers: 0 },
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional file and environment variables
    ///
    /// Precedence (lowest to highest): built-in defaults, `graffiti.toml` in the
    /// working directory (or `path` when given, which must then exist),
    /// `GRAFFITI_<SECTION>__<KEY>` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let file_source = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let config = Config::builder()
            .set_default("decoder.include_p2pkh", defaults.decoder.include_p2pkh)?
            .set_default("decoder.input_format", "hex")?
            .set_default("output.pretty", defaults.output.pretty)?
            .set_default("output.always_print", defaults.output.always_print)?
            .set_default("batch.workers", defaults.batch.workers as i64)?
            .add_source(file_source)
            // GRAFFITI_DECODER__INCLUDE_P2PKH=false etc.
            .add_source(
                Environment::with_prefix("GRAFFITI")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn decoder_options(&self) -> DecoderOptions {
        DecoderOptions {
            include_p2pkh: self.decoder.include_p2pkh,
        }
    }

    /// Resolve `batch.workers`, mapping 0 to the machine's parallelism
    pub fn worker_count(&self) -> usize {
        if self.batch.workers > 0 {
            return self.batch.workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}
