//! Issues reported while scanning and parsing
//!
//! An issue carries:
//! - a severity (error or warning)
//! - a categorized code
//! - the 1-based line and column where it was raised
//! - a human-readable message and an optional hint

use std::fmt;

use crate::base::Position;

use super::codes::ErrorCode;

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// Makes the resulting document unusable as an authoritative model
    #[default]
    Error,
    /// Advisory only
    Warning,
}

impl Severity {
    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single diagnostic record
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Issue {
    pub severity: Severity,
    pub code: ErrorCode,
    pub position: Position,
    pub message: String,
    /// Optional suggestion for fixing the issue
    pub hint: Option<String>,
}

impl Issue {
    /// Create an error at a position
    pub fn error(code: ErrorCode, position: Position, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            position,
            message: message.into(),
            hint: None,
        }
    }

    /// Create a warning at a position
    pub fn warning(code: ErrorCode, position: Position, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(code, position, message)
        }
    }

    /// Add a hint to this issue
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn line(&self) -> usize {
        self.position.line
    }

    pub fn column(&self) -> usize {
        self.position.column
    }

    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}:{}] {}: {}",
            self.position.line, self.position.column, self.severity, self.message
        )
    }
}
