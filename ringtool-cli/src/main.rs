//! # ringtool
//!
//! CLI driver for the ringtool byte buffer.
//!
//! ## Commands
//!
//! - `run`: Execute an operation script and print each return code
//! - `crc`: Compute the bounded CRC-32 of some input
//! - `status`: Show the state of a freshly configured tool
//!
//! ## Example
//!
//! ```bash
//! # Checksum a string
//! ringtool crc 123456789
//!
//! # Drive a script, one JSON report per step
//! ringtool --json run ops.txt
//!
//! # Use a config file (initial mode, default tick count, log level)
//! ringtool --config ringtool.toml status
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod script;

use commands::{crc, run, status};
use config::Config;

/// CLI driver for the ringtool byte buffer.
#[derive(Parser, Debug)]
#[command(name = "ringtool")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Execute an operation script
    Run {
        /// Script file, one operation per line
        script: PathBuf,
    },

    /// Compute the CRC-32 of the input
    Crc {
        /// Input text (or hex with --hex)
        input: String,

        /// Treat the input as hex-encoded bytes
        #[arg(long)]
        hex: bool,

        /// Number of bytes to checksum (default: all, capped at 256)
        #[arg(long, short)]
        length: Option<usize>,
    },

    /// Show the state of a freshly configured tool
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&config.logging.level);

    match cli.command {
        Commands::Run { script } => {
            run::run(&config, &script, cli.json)?;
        }
        Commands::Crc { input, hex, length } => {
            crc::run(&input, hex, length)?;
        }
        Commands::Status => {
            status::run(&config, cli.json)?;
        }
    }

    Ok(())
}

/// Install the stderr subscriber. `RUST_LOG` overrides the configured level.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
