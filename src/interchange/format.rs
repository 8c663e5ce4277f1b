//! Common trait for document interchange formats.

use super::InterchangeError;
use crate::document::Document;

/// Capabilities supported by a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatCapability {
    /// Can read/import documents.
    pub read: bool,
    /// Can write/export documents.
    pub write: bool,
    /// Preserves all semantic information.
    pub lossless: bool,
}

impl FormatCapability {
    /// Write-only capability.
    pub const WRITE_ONLY: Self = Self {
        read: false,
        write: true,
        lossless: true,
    };
}

/// Trait for document interchange formats.
///
/// Formats work on a [`Document`], whether it came from the text parser or
/// was built by a caller.
pub trait DocumentFormat: Send + Sync {
    /// Human-readable name of the format.
    fn name(&self) -> &'static str;

    /// File extension(s) for this format.
    fn extensions(&self) -> &'static [&'static str];

    /// MIME type for this format.
    fn mime_type(&self) -> &'static str;

    /// Capabilities of this format implementation.
    fn capabilities(&self) -> FormatCapability;

    /// Write a document to bytes.
    fn write(&self, document: &Document) -> Result<Vec<u8>, InterchangeError>;

    /// Read a document from bytes.
    fn read(&self, input: &[u8]) -> Result<Document, InterchangeError> {
        let _ = input;
        Err(InterchangeError::Unsupported(format!(
            "{} reading is not supported",
            self.name()
        )))
    }
}
