//! Workout envelope codec - header fields followed by the top-level parts
//!
//! # Envelope Format (version 1)
//!
//! ```text
//! version:       u8
//! is_metric:     u8 (0 or 1)
//! title:         varuint length + UTF-8 bytes
//! activity_type: u32 (LE)
//! location_type: u8
//! part_count:    u8
//! parts:         [Part; part_count]
//! ```


use serde::{Deserialize, Serialize};
use std::io::Cursor;

use crate::ENCODING_VERSION;
use crate::error::LubbaError;
use crate::io::{
    read_u8, read_u32, read_var_string, write_count, write_u8, write_u32, write_var_string,
};
use crate::part::{Part, decode_part, encode_part};

/// A complete workout: header fields plus parts in playback order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    /// Not encoded. Always `true` on decoded workouts.
    #[serde(default)]
    pub is_custom: bool,

    #[serde(default)]
    pub is_metric: bool,

    pub title: String,

    pub activity_type: u32,

    pub location_type: u8,

    pub parts: Vec<Part>,
}

/// Encode a workout, tagging the output with `version`
///
/// The body is always written in the version 1 layout; only version 1 output
/// can be decoded by [`decode_workout`].
///
/// # Example
/// ```
/// use lubba_encoder::{ENCODING_VERSION, Part, Workout, decode_workout, encode_workout};
///
/// let workout = Workout {
///     title: "Intervals".to_string(),
///     activity_type: 37,
///     location_type: 3,
///     parts: vec![Part::titled("Warmup"), Part::titled("Cooldown")],
///     ..Workout::default()
/// };
///
/// let data = encode_workout(&workout, ENCODING_VERSION).unwrap();
/// assert_eq!(data[0], ENCODING_VERSION);
///
/// let decoded = decode_workout(&data).unwrap().unwrap();
/// assert_eq!(decoded.parts, workout.parts);
/// assert!(decoded.is_custom);
/// ```
///
/// # Errors
/// * `TooManyEntries` - more than 255 parts in any sequence
/// * `UnknownSymbol` - a part uses a layout or value kind outside its table
/// * `NestingTooDeep` - repeat parts nest too deeply
pub fn encode_workout(workout: &Workout, version: u8) -> Result<Vec<u8>, LubbaError> {
    if version != ENCODING_VERSION {
        tracing::warn!(
            "Encoding with version {} using the version {} layout",
            version,
            ENCODING_VERSION
        );
    }

    let mut output = Vec::with_capacity(64);

    // ========== Header ==========
    write_u8(&mut output, version);
    write_u8(&mut output, u8::from(workout.is_metric));
    write_var_string(&mut output, &workout.title);
    write_u32(&mut output, workout.activity_type);
    write_u8(&mut output, workout.location_type);

    // ========== Parts ==========
    write_count(&mut output, "parts", workout.parts.len())?;
    for part in &workout.parts {
        encode_part(part, &mut output)?;
    }

    tracing::debug!(
        "Encoded workout {:?}: {} parts, {} bytes",
        workout.title,
        workout.parts.len(),
        output.len()
    );

    Ok(output)
}

/// Decode an encoded workout
///
/// Returns `Ok(None)` when the version byte is not a supported version; that
/// is not treated as an error.
///
/// # Errors
/// * `UnexpectedEof` - the input is empty or truncated
/// * `UnknownCode` - a symbol code is not in its table
/// * `InvalidUtf8` - a text field is not UTF-8
pub fn decode_workout(data: &[u8]) -> Result<Option<Workout>, LubbaError> {
    let mut cursor = Cursor::new(data);

    let version = read_u8(&mut cursor)?;
    if version != ENCODING_VERSION {
        tracing::debug!("Unsupported encoding version: {}", version);
        return Ok(None);
    }

    let is_metric = read_u8(&mut cursor)? == 1;
    let title = read_var_string(&mut cursor)?;
    let activity_type = read_u32(&mut cursor)?;
    let location_type = read_u8(&mut cursor)?;

    let part_count = read_u8(&mut cursor)?;
    let mut parts = Vec::with_capacity(part_count as usize);
    for _ in 0..part_count {
        parts.push(decode_part(&mut cursor)?);
    }

    let trailing = data.len() as u64 - cursor.position();
    if trailing > 0 {
        tracing::debug!("Ignoring {} trailing bytes after workout", trailing);
    }

    Ok(Some(Workout {
        is_custom: true,
        is_metric,
        title,
        activity_type,
        location_type,
        parts,
    }))
}
