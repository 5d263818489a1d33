//! URL hash transcoding
//!
//! Encoded workouts travel in URL fragments as standard base64 (padded, with
//! `+` and `/`). The URL-safe variant only replaces `/` with `%2F`; `+` and
//! `=` are left as they are.
//!
//! [`from_hash`] expects plain base64 and does not undo the `%2F`
//! substitution. Use [`from_url_hash`] for text taken straight from a URL.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::MAX_URL_HASH_LEN;
use crate::error::LubbaError;

/// Standard alphabet, padded on encode, padding optional on decode
const HASH_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const SLASH: &str = "/";
const ESCAPED_SLASH: &str = "%2F";

/// Encode bytes as a hash string
///
/// # Example
/// ```
/// use lubba_encoder::to_hash;
///
/// assert_eq!(to_hash(&[0xFF, 0xFF, 0xFF], false), "////");
/// assert_eq!(to_hash(&[0xFF, 0xFF, 0xFF], true), "%2F%2F%2F%2F");
/// ```
pub fn to_hash(data: &[u8], url_safe: bool) -> String {
    let hash = HASH_ENGINE.encode(data);
    if url_safe {
        hash.replace(SLASH, ESCAPED_SLASH)
    } else {
        hash
    }
}

/// Decode a plain base64 hash string back to bytes
///
/// # Errors
/// * `InvalidHash` - the text is not base64 (including any `%2F` escapes)
pub fn from_hash(hash: &str) -> Result<Vec<u8>, LubbaError> {
    Ok(HASH_ENGINE.decode(hash)?)
}

/// Decode a hash taken from a URL, reversing the `%2F` escape first
///
/// # Errors
/// * `InvalidHash` - the unescaped text is not base64
pub fn from_url_hash(hash: &str) -> Result<Vec<u8>, LubbaError> {
    let unescaped = hash.replace(ESCAPED_SLASH, SLASH).replace("%2f", SLASH);
    from_hash(&unescaped)
}

/// Check if a hash is longer than browsers reliably keep in a URL fragment
pub fn exceeds_url_limit(hash: &str) -> bool {
    let exceeds = hash.len() >= MAX_URL_HASH_LEN;
    if exceeds {
        tracing::warn!(
            "Hash is {} characters, over the {} character URL limit",
            hash.len(),
            MAX_URL_HASH_LEN
        );
    }
    exceeds
}
