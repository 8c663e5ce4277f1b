//! Error code definitions for scanner and parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (strings, comments, numbers, characters)
//! - E02xx: Structural errors (terminators, trailing input)
//! - E03xx: Declaration errors (names, parameter blocks)
//! - E04xx: Expression errors
//! - E09xx: Generic/fallback errors
//!
//! Warnings use W{category}{number}.

use std::fmt;

/// Codes attached to every [`Issue`](super::Issue)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors
    // =========================================================================
    /// Character that cannot start any token
    E0101,
    /// Unterminated string literal
    E0102,
    /// Unterminated (possibly nested) multiline comment
    E0103,
    /// Malformed numeric literal
    E0104,
    /// Numeric literal outside the double precision range
    E0105,

    // =========================================================================
    // E02xx: Structural errors
    // =========================================================================
    /// Missing `;`
    E0201,
    /// Missing block terminator (`enddef`, `endcomp`, `endsel`)
    E0202,
    /// Input after the end of the model definition
    E0203,

    // =========================================================================
    // E03xx: Declaration errors
    // =========================================================================
    /// Missing identifier
    E0301,
    /// Missing unit name
    E0302,
    /// Parameter not allowed here
    E0303,
    /// Parameter given twice in the same block
    E0304,
    /// Invalid parameter value
    E0305,
    /// Unexpected token in a definition body
    E0306,

    // =========================================================================
    // E04xx: Expression errors
    // =========================================================================
    /// Missing expression where expected
    E0401,
    /// Wrong number of arguments for a mathematical function
    E0402,
    /// Chained comparison
    E0403,
    /// Piecewise expression without any `case`
    E0404,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Unexpected token in current context
    E0901,
    /// Expected a specific token
    E0902,

    // =========================================================================
    // W01xx: Warnings
    // =========================================================================
    /// Number without units
    W0101,
}

impl ErrorCode {
    /// Get the string representation of the code (e.g., "E0201")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            Self::E0104 => "E0104",
            Self::E0105 => "E0105",
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            Self::E0304 => "E0304",
            Self::E0305 => "E0305",
            Self::E0306 => "E0306",
            Self::E0401 => "E0401",
            Self::E0402 => "E0402",
            Self::E0403 => "E0403",
            Self::E0404 => "E0404",
            Self::E0901 => "E0901",
            Self::E0902 => "E0902",
            Self::W0101 => "W0101",
        }
    }

    /// Get a short description of the code's category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0102 | Self::E0103 | Self::E0104 | Self::E0105 => "lexical error",
            Self::E0201 | Self::E0202 | Self::E0203 => "structural error",
            Self::E0301 | Self::E0302 | Self::E0303 | Self::E0304 | Self::E0305 | Self::E0306 => {
                "declaration error"
            }
            Self::E0401 | Self::E0402 | Self::E0403 | Self::E0404 => "expression error",
            Self::E0901 | Self::E0902 => "syntax error",
            Self::W0101 => "warning",
        }
    }

    /// Get the default message for this code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "invalid character",
            Self::E0102 => "unterminated string",
            Self::E0103 => "unterminated comment",
            Self::E0104 => "invalid number",
            Self::E0105 => "number out of range",
            Self::E0201 => "missing ';'",
            Self::E0202 => "missing block terminator",
            Self::E0203 => "unexpected input after the model definition",
            Self::E0301 => "missing identifier",
            Self::E0302 => "missing unit name",
            Self::E0303 => "parameter not allowed here",
            Self::E0304 => "duplicate parameter",
            Self::E0305 => "invalid parameter value",
            Self::E0306 => "unexpected token in definition",
            Self::E0401 => "expected expression",
            Self::E0402 => "wrong number of arguments",
            Self::E0403 => "comparisons cannot be chained",
            Self::E0404 => "piecewise expression needs at least one case",
            Self::E0901 => "unexpected token",
            Self::E0902 => "expected token",
            Self::W0101 => "number without units",
        }
    }

    /// Check if this is a lexical error, i.e. raised by the scanner
    pub fn is_lexical(&self) -> bool {
        matches!(
            self,
            Self::E0101 | Self::E0102 | Self::E0103 | Self::E0104 | Self::E0105
        )
    }

    /// Check if this code denotes a warning rather than an error
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::W0101)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
