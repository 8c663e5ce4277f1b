//! Position tracking for tokens, issues and document nodes
//!
//! Lines and columns are 1-based. The byte offset is kept alongside so
//! callers can slice the source without recomputing it.

use text_size::{TextRange, TextSize};

/// A position in source code (1-indexed line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: TextSize,
}

/// A span representing a range in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Position {
    pub fn new(line: usize, column: usize, offset: TextSize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// The first character of a source text
    pub fn start() -> Self {
        Self::new(1, 1, TextSize::new(0))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create an empty span at a position
    pub fn empty(at: Position) -> Self {
        Self { start: at, end: at }
    }

    /// Byte range covered by this span
    pub fn range(&self) -> TextRange {
        TextRange::new(self.start.offset, self.end.offset)
    }

    /// Smallest span covering both `self` and `other`
    pub fn cover(self, other: Span) -> Span {
        let start = if other.start.offset < self.start.offset {
            other.start
        } else {
            self.start
        };
        let end = if other.end.offset > self.end.offset {
            other.end
        } else {
            self.end
        };
        Span { start, end }
    }

    /// Check if a position falls within this span
    pub fn contains(&self, position: Position) -> bool {
        if position.line < self.start.line || position.line > self.end.line {
            return false;
        }
        if position.line == self.start.line && position.column < self.start.column {
            return false;
        }
        if position.line == self.end.line && position.column > self.end.column {
            return false;
        }
        true
    }
}
