//! Error types for the conversion surfaces
//!
//! Format handlers never fail: a value they cannot read is treated as absent. Errors only come
//! from the edges around them (HTML serialization, JSON model documents, unsupported requests).

use std::fmt;

/// Errors that can occur around a conversion pass
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// Input (HTML or a serialized model) could not be read
    ParseError(String),
    /// Output could not be produced
    SerializationError(String),
    /// Requested operation is not available
    NotSupported(String),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConvertError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            ConvertError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
        }
    }
}

impl std::error::Error for ConvertError {}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            ConvertError::ParseError(err.to_string())
        } else {
            ConvertError::SerializationError(err.to_string())
        }
    }
}
