//! Model Layer Error Types

use eagle_codec::HexError;
use thiserror::Error;

/// Result type for eagle-model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Packet decoding and command building errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    /// Malformed XML or a document quick-xml cannot map onto a record
    #[error("XML error: {0}")]
    Xml(String),

    /// Root element is neither `rainforest` nor a known record
    #[error("Unexpected name: {0}")]
    UnexpectedRoot(String),

    /// No element at all
    #[error("Empty document")]
    EmptyDocument,

    /// Field value conversion error
    #[error("Conversion error: {0}")]
    Conversion(#[from] HexError),
}

impl From<quick_xml::Error> for ModelError {
    fn from(err: quick_xml::Error) -> Self {
        ModelError::Xml(err.to_string())
    }
}

impl From<quick_xml::DeError> for ModelError {
    fn from(err: quick_xml::DeError) -> Self {
        ModelError::Xml(err.to_string())
    }
}

// Helper methods
impl ModelError {
    pub fn xml(msg: impl Into<String>) -> Self {
        ModelError::Xml(msg.into())
    }

    pub fn unexpected_root(name: impl Into<String>) -> Self {
        ModelError::UnexpectedRoot(name.into())
    }
}
