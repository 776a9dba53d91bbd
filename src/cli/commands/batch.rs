//! Batch decoding: one hex transaction per line
//!
//! Lines are fanned out to a pool of scoped worker threads over a crossbeam
//! channel. Results are put back into input order before anything is printed,
//! so output is deterministic regardless of worker count.

use super::decode::decode_input;
use crate::config::{AppConfig, InputFormat};
use crate::decoder::DecoderOptions;
use crate::errors::{AppError, AppResult};
use crate::types::report::GraffitiReport;
use clap::Args;
use crossbeam::channel;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Decode one hex transaction per line, in parallel
#[derive(Args)]
pub struct BatchCommand {
    /// File with one hex-encoded transaction per line ('#' starts a comment)
    #[arg(long, short = 'i')]
    pub input: PathBuf,

    /// Worker threads (overrides graffiti.toml; 0 = available parallelism)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Do not report P2PKH hash slots
    #[arg(long)]
    pub no_p2pkh: bool,

    /// Also print transactions without graffiti
    #[arg(long)]
    pub always_print: bool,
}

/// Result of decoding one batch line
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    Decoded { line: usize, report: GraffitiReport },
    Failed {
        line: usize,
        kind: &'static str,
        message: String,
    },
}

impl BatchOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, BatchOutcome::Failed { .. })
    }
}

#[derive(Serialize)]
struct ReportLine<'a> {
    line: usize,
    #[serde(flatten)]
    report: &'a GraffitiReport,
}

#[derive(Serialize)]
struct ErrorLine<'a> {
    line: usize,
    error: &'a str,
    message: &'a str,
}

impl BatchCommand {
    pub fn run(&self, config: &AppConfig) -> AppResult<()> {
        let content = fs::read_to_string(&self.input)?;
        let lines = parse_batch_lines(&content);

        let workers = match self.workers {
            Some(n) if n > 0 => n,
            _ => config.worker_count(),
        };
        let mut options = config.decoder_options();
        if self.no_p2pkh {
            options.include_p2pkh = false;
        }
        let always_print = self.always_print || config.output.always_print;

        info!(
            "Decoding {} transactions from {} with {} workers",
            lines.len(),
            self.input.display(),
            workers
        );

        let outcomes = decode_batch(&lines, options, workers)?;

        let failures = outcomes.iter().filter(|o| o.is_failure()).count();
        for outcome in &outcomes {
            match outcome {
                BatchOutcome::Decoded { line, report } => {
                    if report.graffiti || always_print {
                        let json = serde_json::to_string(&ReportLine {
                            line: *line,
                            report,
                        })?;
                        println!("{}", json);
                    }
                }
                BatchOutcome::Failed {
                    line,
                    kind,
                    message,
                } => {
                    warn!("Line {}: {}", line, message);
                    let json = serde_json::to_string(&ErrorLine {
                        line: *line,
                        error: kind,
                        message,
                    })?;
                    println!("{}", json);
                }
            }
        }

        info!(
            "Batch complete: {} decoded, {} failed",
            outcomes.len() - failures,
            failures
        );

        if !outcomes.is_empty() && failures == outcomes.len() {
            return Err(AppError::InvalidData(format!(
                "all {} transactions failed to decode",
                failures
            )));
        }

        Ok(())
    }
}

/// Non-empty, non-comment lines with their 1-based line numbers
pub fn parse_batch_lines(content: &str) -> Vec<(usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

/// Decode every line on `workers` threads, returning outcomes in input order
pub fn decode_batch(
    lines: &[(usize, &str)],
    options: DecoderOptions,
    workers: usize,
) -> AppResult<Vec<BatchOutcome>> {
    let workers = workers.clamp(1, lines.len().max(1));

    let (job_tx, job_rx) = channel::unbounded::<(usize, usize, &str)>();
    let (result_tx, result_rx) = channel::unbounded::<(usize, BatchOutcome)>();

    for (idx, &(line, text)) in lines.iter().enumerate() {
        // Receiver is alive for the whole function
        let _ = job_tx.send((idx, line, text));
    }
    drop(job_tx);

    crossbeam::scope(|scope| {
        for worker in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move |_| {
                let mut handled = 0usize;
                for (idx, line, text) in job_rx.iter() {
                    let outcome = match decode_input(text.as_bytes(), InputFormat::Hex, options) {
                        Ok(report) => BatchOutcome::Decoded { line, report },
                        Err(error) => BatchOutcome::Failed {
                            line,
                            kind: error.kind(),
                            message: error.to_string(),
                        },
                    };
                    handled += 1;
                    if result_tx.send((idx, outcome)).is_err() {
                        break;
                    }
                }
                debug!("Worker {} handled {} transactions", worker, handled);
            });
        }
    })
    .map_err(|_| AppError::InvalidData("batch worker panicked".to_string()))?;
    drop(result_tx);

    let mut ordered: Vec<Option<BatchOutcome>> = vec![None; lines.len()];
    for (idx, outcome) in result_rx.iter() {
        ordered[idx] = Some(outcome);
    }

    Ok(ordered.into_iter().flatten().collect())
}
