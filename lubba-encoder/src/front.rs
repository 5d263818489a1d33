//! YAML and JSON front-end
//!
//! Deserializes workout documents into [`Workout`] for the codec. Keys not in
//! the model (such as `id`) are ignored.

use crate::error::LubbaError;
use crate::workout::{Workout, encode_workout};

/// Parse a workout from a YAML document
pub fn parse_workout_yaml(yaml: &str) -> Result<Workout, LubbaError> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Parse a workout from a JSON document
pub fn parse_workout_json(json: &str) -> Result<Workout, LubbaError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a YAML workout and encode it
pub fn encode_yaml(yaml: &str, version: u8) -> Result<Vec<u8>, LubbaError> {
    let workout = parse_workout_yaml(yaml)?;
    encode_workout(&workout, version)
}
