//! Lubba CLI - encode workouts into URL hashes and back
//!
//! # Commands
//!
//! - `lubba encode` - Encode a YAML/JSON workout file into a hash
//! - `lubba decode` - Decode a hash and print the workout as JSON
//!
//! # Usage
//!
//! ```bash
//! # Hash for a URL fragment ('/' escaped as %2F)
//! lubba encode workout.yaml --url-safe
//!
//! # Raw bytes, for comparing against other implementations
//! lubba encode workout.yaml --bytes
//!
//! # Back to JSON
//! lubba decode 'AQERTXkgY3VzdG9t...' --url
//! ```
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=lubba_encoder=trace`) to control logging.

mod decode;
mod encode;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Lubba CLI - encode workouts into URL hashes and back
#[derive(Parser)]
#[command(name = "lubba")]
#[command(about = "Encode workouts into URL hashes and back")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a YAML/JSON workout file into a hash
    Encode(encode::EncodeArgs),

    /// Decode a hash and print the workout as JSON
    Decode(decode::DecodeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging (stderr, so stdout carries only the result)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Encode(args) => encode::execute(args),
        Commands::Decode(args) => decode::execute(args),
    }
}
