//! Error types for IET conversion
//!
//! Encoding never fails: anomalies become diagnostics. Decoding has a single
//! fatal kind, raised when the markup cannot be parsed as a document.

use thiserror::Error;

/// Fatal XML → script errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// XML is malformed (not well-formed, unbalanced, or missing required parts)
    #[error("Malformed document: {0}")]
    MalformedDocument(String),
}

impl DecodeError {
    pub fn malformed(message: impl Into<String>) -> Self {
        DecodeError::MalformedDocument(message.into())
    }

    /// quick-xml failure, tagged with the byte offset the reader had reached
    pub(crate) fn from_xml(err: quick_xml::Error, position: usize) -> Self {
        DecodeError::MalformedDocument(format!("XML error at position {}: {}", position, err))
    }
}

pub type DecodeResult<T> = Result<T, DecodeError>;
