//! Diagnostics for the CellML text front end
//!
//! This module provides:
//! - Categorized error codes for filtering and documentation
//! - [`Issue`] records with severity, position and message
//! - The [`Diagnostics`] sink shared by scanner and parser
//! - Parse contexts used to word messages and pick recovery points

mod codes;
mod context;
mod issue;
mod sink;

pub use codes::ErrorCode;
pub use context::ParseContext;
pub use issue::{Issue, Severity};
pub use sink::Diagnostics;
