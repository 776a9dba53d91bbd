use crate::config::{AppConfig, InputFormat};
use crate::decoder::{DecoderOptions, GraffitiDecoder};
use crate::errors::{AppError, AppResult};
use crate::types::report::GraffitiReport;
use clap::Args;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

/// Decode a single transaction read from a file or stdin
#[derive(Args)]
pub struct DecodeCommand {
    /// Read the transaction from this file instead of stdin
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Input encoding (overrides graffiti.toml)
    #[arg(long, value_enum)]
    pub format: Option<InputFormat>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,

    /// Print the report even when no graffiti is found
    #[arg(long)]
    pub always_print: bool,

    /// Do not report P2PKH hash slots
    #[arg(long)]
    pub no_p2pkh: bool,
}

impl DecodeCommand {
    pub fn run(&self, config: &AppConfig) -> AppResult<()> {
        let format = self.format.unwrap_or(config.decoder.input_format);
        let mut options = config.decoder_options();
        if self.no_p2pkh {
            options.include_p2pkh = false;
        }

        let input = read_input(self.input.as_deref())?;
        let report = decode_input(&input, format, options)?;
        info!(
            "Transaction {}: {} graffiti record(s)",
            report.txid,
            report.records.len()
        );

        let pretty = self.pretty || config.output.pretty;
        let always_print = self.always_print || config.output.always_print;
        if let Some(json) = render_report(&report, pretty, always_print)? {
            println!("{}", json);
        }

        Ok(())
    }
}

/// Read the whole input from `path`, or stdin when absent
pub fn read_input(path: Option<&Path>) -> AppResult<Vec<u8>> {
    match path {
        Some(path) => fs::read(path).map_err(AppError::from),
        None => {
            let mut buf = Vec::new();
            std::io::stdin().lock().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Decode one transaction given in `format` and build its report
pub fn decode_input(
    input: &[u8],
    format: InputFormat,
    options: DecoderOptions,
) -> AppResult<GraffitiReport> {
    let raw = match format {
        InputFormat::Raw => input.to_vec(),
        InputFormat::Hex => {
            let text = std::str::from_utf8(input)
                .map_err(|e| AppError::InvalidData(format!("hex input is not UTF-8: {}", e)))?;
            hex::decode(text.trim())?
        }
    };

    let extraction = GraffitiDecoder::new(options).decode(&raw)?;
    Ok(GraffitiReport::build(&raw, &extraction))
}

/// JSON to print for a report; `None` when there is nothing to say
pub fn render_report(
    report: &GraffitiReport,
    pretty: bool,
    always_print: bool,
) -> AppResult<Option<String>> {
    if !report.graffiti && !always_print {
        return Ok(None);
    }
    Ok(Some(report.to_json(pretty)?))
}
