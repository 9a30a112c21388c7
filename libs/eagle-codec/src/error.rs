//! Error types for eagle-codec

use thiserror::Error;

/// Hex field conversion errors
///
/// Both variants carry the offending input text so the rendering layer can
/// print the message in place of the value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HexError {
    /// Input does not look like `0x` followed by hex digits
    #[error("Invalid hex value {0}")]
    InvalidFormat(String),

    /// Digits decode to a value wider than the target integer
    #[error("Hex value out of range: {0}")]
    Overflow(String),
}

impl HexError {
    pub fn invalid_format(input: impl Into<String>) -> Self {
        Self::InvalidFormat(input.into())
    }

    pub fn overflow(input: impl Into<String>) -> Self {
        Self::Overflow(input.into())
    }

    /// The text that failed to convert
    pub fn input(&self) -> &str {
        match self {
            Self::InvalidFormat(s) | Self::Overflow(s) => s,
        }
    }
}

pub type Result<T> = std::result::Result<T, HexError>;
