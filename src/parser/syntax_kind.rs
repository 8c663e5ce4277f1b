//! Token kinds for the CellML text scanner
//!
//! This enum defines every lexical category the scanner can produce. Keyword
//! families are laid out contiguously so that family checks are simple range
//! comparisons.

/// All token kinds of the CellML text notation
///
/// Trivia (comments) come first, then literals, punctuation, the language
/// keywords, the SI unit names and finally the keywords that are only
/// recognised inside a `{...}` parameter block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    SINGLE_LINE_COMMENT = 0, // // ...
    MULTILINE_COMMENT,       // /* ... */

    // =========================================================================
    // LITERALS
    // =========================================================================
    STRING,          // "file.cellml"
    IDENT,           // identifier, also usable as a cmeta id
    PROPER_CMETA_ID, // cmeta id that is not an identifier (e.g. `id-1.2`)
    NUMBER,          // 3, 3.5, 1e-3

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    COMMA,     // ,
    EQ,        // =
    EQ_EQ,     // ==
    NEQ,       // <>
    LT,        // <
    LEQ,       // <=
    GT,        // >
    GEQ,       // >=
    PLUS,      // +
    MINUS,     // -
    TIMES,     // *
    DIVIDE,    // /
    COLON,     // :
    SEMICOLON, // ;
    L_PAREN,   // (
    R_PAREN,   // )
    L_BRACE,   // {
    R_BRACE,   // }

    // =========================================================================
    // LANGUAGE KEYWORDS
    // =========================================================================
    AND_KW,
    AS_KW,
    BETWEEN_KW,
    CASE_KW,
    COMP_KW,
    DEF_KW,
    ENDCOMP_KW,
    ENDDEF_KW,
    ENDSEL_KW,
    FOR_KW,
    GROUP_KW,
    IMPORT_KW,
    INCL_KW,
    MAP_KW,
    MODEL_KW,
    OTHERWISE_KW,
    SEL_KW,
    UNIT_KW,
    USING_KW,
    VAR_KW,
    VARS_KW,
    OR_KW,
    XOR_KW,
    NOT_KW,
    ODE_KW,
    BASE_KW,
    ENCAPSULATION_KW,
    CONTAINMENT_KW,

    // One-argument mathematical functions
    ABS_KW,
    CEIL_KW,
    EXP_KW,
    FACT_KW,
    FLOOR_KW,
    LN_KW,
    SQR_KW,
    SQRT_KW,
    SIN_KW,
    COS_KW,
    TAN_KW,
    SEC_KW,
    CSC_KW,
    COT_KW,
    SINH_KW,
    COSH_KW,
    TANH_KW,
    SECH_KW,
    CSCH_KW,
    COTH_KW,
    ASIN_KW,
    ACOS_KW,
    ATAN_KW,
    ASEC_KW,
    ACSC_KW,
    ACOT_KW,
    ASINH_KW,
    ACOSH_KW,
    ATANH_KW,
    ASECH_KW,
    ACSCH_KW,
    ACOTH_KW,
    // One- or two-argument
    LOG_KW,
    // Two-argument
    POW_KW,
    REM_KW,
    ROOT_KW,
    // Two-or-more-argument
    MIN_KW,
    MAX_KW,
    GCD_KW,
    LCM_KW,

    // Mathematical constants
    TRUE_KW,
    FALSE_KW,
    NAN_KW,
    PI_KW,
    INF_KW,
    E_KW,

    // =========================================================================
    // SI UNITS
    // =========================================================================
    AMPERE_KW,
    BECQUEREL_KW,
    CANDELA_KW,
    CELSIUS_KW,
    COULOMB_KW,
    DIMENSIONLESS_KW,
    FARAD_KW,
    GRAM_KW,
    GRAY_KW,
    HENRY_KW,
    HERTZ_KW,
    JOULE_KW,
    KATAL_KW,
    KELVIN_KW,
    KILOGRAM_KW,
    LITER_KW,
    LITRE_KW,
    LUMEN_KW,
    LUX_KW,
    METER_KW,
    METRE_KW,
    MOLE_KW,
    NEWTON_KW,
    OHM_KW,
    PASCAL_KW,
    RADIAN_KW,
    SECOND_KW,
    SIEMENS_KW,
    SIEVERT_KW,
    STERADIAN_KW,
    TESLA_KW,
    VOLT_KW,
    WATT_KW,
    WEBER_KW,

    // =========================================================================
    // PARAMETER-BLOCK KEYWORDS
    // =========================================================================
    PREF_KW,
    EXPO_KW,
    MULT_KW,
    OFF_KW,
    INIT_KW,
    PUB_KW,
    PRIV_KW,
    IN_KW,
    OUT_KW,
    NONE_KW,

    // SI prefixes
    YOTTA_KW,
    ZETTA_KW,
    EXA_KW,
    PETA_KW,
    TERA_KW,
    GIGA_KW,
    MEGA_KW,
    KILO_KW,
    HECTO_KW,
    DEKA_KW,
    DECI_KW,
    CENTI_KW,
    MILLI_KW,
    MICRO_KW,
    NANO_KW,
    PICO_KW,
    FEMTO_KW,
    ATTO_KW,
    ZEPTO_KW,
    YOCTO_KW,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    INVALID,
    EOF,
}

impl SyntaxKind {
    fn between(self, first: SyntaxKind, last: SyntaxKind) -> bool {
        (self as u16) >= (first as u16) && (self as u16) <= (last as u16)
    }

    /// Check if this is a comment token
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::SINGLE_LINE_COMMENT | Self::MULTILINE_COMMENT)
    }

    /// Check if this is a language keyword (functions and constants included)
    pub fn is_keyword(self) -> bool {
        self.between(Self::AND_KW, Self::E_KW)
    }

    /// Check if this names a mathematical function
    pub fn is_function(self) -> bool {
        self.between(Self::ABS_KW, Self::LCM_KW)
    }

    /// Check if this is a mathematical constant
    pub fn is_constant(self) -> bool {
        self.between(Self::TRUE_KW, Self::E_KW)
    }

    /// Check if this is one of the predefined SI unit names
    pub fn is_si_unit(self) -> bool {
        self.between(Self::AMPERE_KW, Self::WEBER_KW)
    }

    /// Check if this is a keyword only recognised inside a parameter block
    pub fn is_parameter_keyword(self) -> bool {
        self.between(Self::PREF_KW, Self::YOCTO_KW)
    }

    /// Check if this is an SI prefix name
    pub fn is_prefix(self) -> bool {
        self.between(Self::YOTTA_KW, Self::YOCTO_KW)
    }

    /// Check if this is a comparison operator
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::EQ_EQ | Self::NEQ | Self::LT | Self::LEQ | Self::GT | Self::GEQ
        )
    }
}

/// Get a human-readable name for a token kind, as used in diagnostics
pub fn kind_to_name(kind: SyntaxKind) -> &'static str {
    match kind {
        SyntaxKind::SINGLE_LINE_COMMENT => "a comment",
        SyntaxKind::MULTILINE_COMMENT => "a comment",
        SyntaxKind::STRING => "a string",
        SyntaxKind::IDENT => "an identifier",
        SyntaxKind::PROPER_CMETA_ID => "a cmeta id",
        SyntaxKind::NUMBER => "a number",
        SyntaxKind::COMMA => "','",
        SyntaxKind::EQ => "'='",
        SyntaxKind::EQ_EQ => "'=='",
        SyntaxKind::NEQ => "'<>'",
        SyntaxKind::LT => "'<'",
        SyntaxKind::LEQ => "'<='",
        SyntaxKind::GT => "'>'",
        SyntaxKind::GEQ => "'>='",
        SyntaxKind::PLUS => "'+'",
        SyntaxKind::MINUS => "'-'",
        SyntaxKind::TIMES => "'*'",
        SyntaxKind::DIVIDE => "'/'",
        SyntaxKind::COLON => "':'",
        SyntaxKind::SEMICOLON => "';'",
        SyntaxKind::L_PAREN => "'('",
        SyntaxKind::R_PAREN => "')'",
        SyntaxKind::L_BRACE => "'{'",
        SyntaxKind::R_BRACE => "'}'",
        SyntaxKind::INVALID => "an invalid token",
        SyntaxKind::EOF => "the end of the file",
        _ => super::keywords::quoted_keyword(kind).unwrap_or("a keyword"),
    }
}
