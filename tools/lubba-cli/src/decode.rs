//! Decode a hash and print the workout

use anyhow::{Context, Result};
use clap::Args;

use lubba_encoder::{Workout, decode_workout, from_hash, from_url_hash};

#[derive(Args)]
pub struct DecodeArgs {
    /// Hash text (plain base64)
    pub hash: String,

    /// Hash is URL-escaped ('/' written as %2F)
    #[arg(long)]
    pub url: bool,
}

/// Decode and print as pretty JSON
pub fn execute(args: DecodeArgs) -> Result<()> {
    let workout = decode_hash(&args)?;
    println!("{}", serde_json::to_string_pretty(&workout)?);
    Ok(())
}

/// Decode the hash into a workout
pub fn decode_hash(args: &DecodeArgs) -> Result<Workout> {
    let bytes = if args.url {
        from_url_hash(&args.hash)
    } else {
        from_hash(&args.hash)
    }
    .context("Failed to decode hash")?;

    tracing::debug!("Hash decoded to {} bytes", bytes.len());

    let workout = decode_workout(&bytes).context("Failed to decode workout")?;
    match workout {
        Some(workout) => Ok(workout),
        None => anyhow::bail!("Unsupported encoding version: {}", bytes[0]),
    }
}
