//! Hand-written front end for the CellML text notation
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Scanner → Tokens with SyntaxKind (pulled one at a time)
//!     ↓
//! Parser → Document (+ Issues)
//! ```
//!
//! The scanner and the parser report into the same ordered list of
//! [`Issue`]s. Neither ever stops early: the parser resynchronizes after a
//! malformed statement and returns whatever document it could build.

#[allow(clippy::module_inception)]
mod parser;

pub mod errors;
pub mod grammar;
pub mod keywords;
mod scanner;
mod syntax_kind;

pub use errors::{Diagnostics, ErrorCode, Issue, ParseContext, Severity};
pub use parser::{Parse, parse, parse_expression};
pub use scanner::{Scanner, Token, tokenize};
pub use syntax_kind::{SyntaxKind, kind_to_name};
