//! Encoding and decoding error types

/// Errors produced while encoding or decoding workout data
#[derive(Debug, thiserror::Error)]
pub enum LubbaError {
    /// Input ended before a field could be read
    #[error("Unexpected end of input at byte {offset}")]
    UnexpectedEof { offset: u64 },

    /// A string is not present in the symbol table it is encoded through
    #[error("Unknown {table} symbol: {symbol:?}")]
    UnknownSymbol { table: &'static str, symbol: String },

    /// A decoded code has no entry in the reverse symbol table
    #[error("Unknown {table} code: {code}")]
    UnknownCode { table: &'static str, code: u8 },

    /// A sequence does not fit in its 8-bit count
    #[error("Too many {field}: {count} (max {max})", max = u8::MAX)]
    TooManyEntries { field: &'static str, count: usize },

    /// Repeated parts are nested deeper than the codec allows
    #[error("Repeat parts nested deeper than {max} levels")]
    NestingTooDeep { max: usize },

    /// Variable-length integer does not fit in 64 bits
    #[error("Variable-length integer overflow at byte {offset}")]
    VarIntOverflow { offset: u64 },

    /// Length-prefixed text is not valid UTF-8
    #[error("Invalid UTF-8 in text field: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// Hash text is not valid base64
    #[error("Invalid hash encoding: {0}")]
    InvalidHash(#[from] base64::DecodeError),

    /// YAML front-end failed to parse a workout
    #[error("Failed to parse workout YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON front-end failed to parse a workout
    #[error("Failed to parse workout JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            LubbaError::UnexpectedEof { offset: 12 }.to_string(),
            "Unexpected end of input at byte 12"
        );
        assert_eq!(
            LubbaError::UnknownSymbol {
                table: "layout",
                symbol: "4+4".to_string(),
            }
            .to_string(),
            "Unknown layout symbol: \"4+4\""
        );
        assert_eq!(
            LubbaError::UnknownCode {
                table: "title",
                code: 42,
            }
            .to_string(),
            "Unknown title code: 42"
        );
        assert_eq!(
            LubbaError::TooManyEntries {
                field: "parts",
                count: 300,
            }
            .to_string(),
            "Too many parts: 300 (max 255)"
        );
    }
}
