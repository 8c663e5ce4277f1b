//! # cellml-text
//!
//! Scanner, parser and unparser for the CellML text notation, a compact
//! human-writable form of CellML models.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! pipeline     → text ⇄ document round trips, validation
//!   ↓
//! unparse      → Document → canonical model text
//! interchange  → Document → CellML XML (feature "interchange")
//!   ↓
//! parser       → scanner, keyword tables, diagnostics, recursive descent
//!   ↓
//! document     → arena tree of typed nodes, equation expressions
//!   ↓
//! base         → Position, Span, TextRange
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use cellml_text::pipeline;
//!
//! let (document, issues) = pipeline::text_to_document("def model m as enddef;");
//! assert!(issues.is_empty());
//! let text = pipeline::document_to_text(&document.unwrap());
//! ```

// ============================================================================
// MODULES (dependency order: base → document → parser → unparse → pipeline)
// ============================================================================

/// Foundation types: Position, Span, TextRange
pub mod base;

/// The structured document: nodes, payloads and expressions
pub mod document;

/// Parser: scanner, keyword tables, diagnostics, grammar
pub mod parser;

/// Document → model text
pub mod unparse;

/// Round trips and validation for external callers
pub mod pipeline;

/// Document interchange formats: CellML XML
#[cfg(feature = "interchange")]
pub mod interchange;

// Re-export commonly needed items
pub use parser::keywords;

// Re-export foundation types
pub use base::{Position, Span, TextRange, TextSize};

pub use document::{Document, NodeId, NodeKind};
pub use parser::{Issue, Severity};
pub use pipeline::{document_to_text, reformat, text_to_document, validate, validate_all};
