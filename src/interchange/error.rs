//! Error types for interchange operations.

use thiserror::Error;

/// Errors that can occur while exporting a document.
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// XML serialization error.
    #[error("XML error: {0}")]
    Xml(String),

    /// The document cannot be expressed in the target format.
    #[error("Invalid {kind}: {message}")]
    Invalid { kind: &'static str, message: String },

    /// Unsupported operation or format variant.
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

impl InterchangeError {
    /// Create an XML error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    /// Create an invalid node error.
    pub fn invalid_node(message: impl Into<String>) -> Self {
        Self::Invalid {
            kind: "node",
            message: message.into(),
        }
    }
}
