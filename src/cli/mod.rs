use crate::config::AppConfig;
use crate::errors::AppResult;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

pub mod commands;

/// Transaction graffiti decoder
#[derive(Parser)]
#[command(name = "graffiti-decoder")]
#[command(about = "Detect and extract data hidden in Bitcoin transaction outputs")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ./graffiti.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log decoder activity to stderr (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Decode a single transaction read from a file or stdin
    Decode(commands::decode::DecodeCommand),
    /// Decode one hex transaction per line, in parallel
    Batch(commands::batch::BatchCommand),
}

pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Uses RUST_LOG when set, otherwise "error" (or "debug" with --verbose).
    // Logs go to stderr so stdout carries only JSON.
    let default_filter = if cli.verbose { "debug" } else { "error" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let config = AppConfig::load(cli.config.as_deref())?;
    debug!("Configuration: {:?}", config);

    match cli.command {
        Commands::Decode(command) => command.run(&config),
        Commands::Batch(command) => command.run(&config),
    }
}
