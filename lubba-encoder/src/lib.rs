//! Lubba Encoder: compact binary workout encoding for URL fragments
//!
//! This crate converts a structured workout (header fields plus a tree of
//! timed or targeted parts) into a small, versioned binary payload and back,
//! and transcodes that payload to base64 text that fits in a URL hash.
//!
//! # Key Features
//!
//! - **Presence bitmaps**: absent optional fields cost one bit, not a sentinel
//! - **Symbol tables**: known titles, layouts and value kinds are one byte each
//! - **Bounds-checked decoding**: truncated or corrupt hashes fail with typed
//!   errors instead of reading past the buffer
//! - **Version tag**: decoding an unknown version yields `None`, not an error
//!
//! # Usage
//!
//! ```
//! use lubba_encoder::{ENCODING_VERSION, decode_workout, encode_yaml, from_hash, to_hash};
//!
//! let yaml = "
//! isMetric: true
//! title: Speed 04/13
//! activityType: 37
//! locationType: 3
//! parts:
//! - title: Warmup
//!   goalType: distance
//!   goalValue: 2e+3
//! - repeats: 4
//!   repeatParts:
//!   - title: Run
//!     goalType: duration
//!     goalValue: 300
//!   - title: Recover
//!     goalType: duration
//!     goalValue: 180
//! ";
//!
//! let data = encode_yaml(yaml, ENCODING_VERSION).unwrap();
//! let hash = to_hash(&data, false);
//!
//! let workout = decode_workout(&from_hash(&hash).unwrap()).unwrap().unwrap();
//! assert_eq!(workout.title, "Speed 04/13");
//! assert_eq!(workout.parts.len(), 2);
//! ```
//!
//! # Format Reference
//!
//! See [`workout`] for the envelope layout and [`part`] for the part record.

mod error;
mod front;
mod hash;
mod io;
pub mod part;
pub mod symbols;
pub mod workout;

pub use error::LubbaError;
pub use front::{encode_yaml, parse_workout_json, parse_workout_yaml};
pub use hash::{exceeds_url_limit, from_hash, from_url_hash, to_hash};
pub use part::{Part, decode_part, encode_part};
pub use symbols::{LAYOUTS, PART_TITLES, SymbolTable, VALUE_KINDS};
pub use workout::{Workout, decode_workout, encode_workout};

/// The only encoding version this crate can decode
pub const ENCODING_VERSION: u8 = 1;

/// Deepest `repeat_parts` nesting accepted by the encoder and decoder
pub const MAX_NESTING_DEPTH: usize = 32;

/// Hash length at which some browsers start dropping the URL fragment
pub const MAX_URL_HASH_LEN: usize = 2020;
