//! Foundation types for the CellML text toolchain.
//!
//! This module provides the source-location types shared by the scanner,
//! the parser, the diagnostics and the document:
//! - [`Position`] - 1-based line/column plus the byte offset
//! - [`Span`] - a start/end pair of positions
//!
//! This module has NO dependencies on other crate modules.

mod position;

pub use position::{Position, Span};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
