//! Keyword tables
//!
//! Three disjoint tables: language keywords (including mathematical functions
//! and constants), SI unit names, and keywords that only exist inside a
//! `{...}` parameter block. The scanner consults them after reading a word.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use super::syntax_kind::SyntaxKind;

const LANGUAGE_KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("and", SyntaxKind::AND_KW),
    ("as", SyntaxKind::AS_KW),
    ("between", SyntaxKind::BETWEEN_KW),
    ("case", SyntaxKind::CASE_KW),
    ("comp", SyntaxKind::COMP_KW),
    ("def", SyntaxKind::DEF_KW),
    ("endcomp", SyntaxKind::ENDCOMP_KW),
    ("enddef", SyntaxKind::ENDDEF_KW),
    ("endsel", SyntaxKind::ENDSEL_KW),
    ("for", SyntaxKind::FOR_KW),
    ("group", SyntaxKind::GROUP_KW),
    ("import", SyntaxKind::IMPORT_KW),
    ("incl", SyntaxKind::INCL_KW),
    ("map", SyntaxKind::MAP_KW),
    ("model", SyntaxKind::MODEL_KW),
    ("otherwise", SyntaxKind::OTHERWISE_KW),
    ("sel", SyntaxKind::SEL_KW),
    ("unit", SyntaxKind::UNIT_KW),
    ("using", SyntaxKind::USING_KW),
    ("var", SyntaxKind::VAR_KW),
    ("vars", SyntaxKind::VARS_KW),
    ("or", SyntaxKind::OR_KW),
    ("xor", SyntaxKind::XOR_KW),
    ("not", SyntaxKind::NOT_KW),
    ("ode", SyntaxKind::ODE_KW),
    ("base", SyntaxKind::BASE_KW),
    ("encapsulation", SyntaxKind::ENCAPSULATION_KW),
    ("containment", SyntaxKind::CONTAINMENT_KW),
    ("abs", SyntaxKind::ABS_KW),
    ("ceil", SyntaxKind::CEIL_KW),
    ("exp", SyntaxKind::EXP_KW),
    ("fact", SyntaxKind::FACT_KW),
    ("floor", SyntaxKind::FLOOR_KW),
    ("ln", SyntaxKind::LN_KW),
    ("sqr", SyntaxKind::SQR_KW),
    ("sqrt", SyntaxKind::SQRT_KW),
    ("sin", SyntaxKind::SIN_KW),
    ("cos", SyntaxKind::COS_KW),
    ("tan", SyntaxKind::TAN_KW),
    ("sec", SyntaxKind::SEC_KW),
    ("csc", SyntaxKind::CSC_KW),
    ("cot", SyntaxKind::COT_KW),
    ("sinh", SyntaxKind::SINH_KW),
    ("cosh", SyntaxKind::COSH_KW),
    ("tanh", SyntaxKind::TANH_KW),
    ("sech", SyntaxKind::SECH_KW),
    ("csch", SyntaxKind::CSCH_KW),
    ("coth", SyntaxKind::COTH_KW),
    ("asin", SyntaxKind::ASIN_KW),
    ("acos", SyntaxKind::ACOS_KW),
    ("atan", SyntaxKind::ATAN_KW),
    ("asec", SyntaxKind::ASEC_KW),
    ("acsc", SyntaxKind::ACSC_KW),
    ("acot", SyntaxKind::ACOT_KW),
    ("asinh", SyntaxKind::ASINH_KW),
    ("acosh", SyntaxKind::ACOSH_KW),
    ("atanh", SyntaxKind::ATANH_KW),
    ("asech", SyntaxKind::ASECH_KW),
    ("acsch", SyntaxKind::ACSCH_KW),
    ("acoth", SyntaxKind::ACOTH_KW),
    ("log", SyntaxKind::LOG_KW),
    ("pow", SyntaxKind::POW_KW),
    ("rem", SyntaxKind::REM_KW),
    ("root", SyntaxKind::ROOT_KW),
    ("min", SyntaxKind::MIN_KW),
    ("max", SyntaxKind::MAX_KW),
    ("gcd", SyntaxKind::GCD_KW),
    ("lcm", SyntaxKind::LCM_KW),
    ("true", SyntaxKind::TRUE_KW),
    ("false", SyntaxKind::FALSE_KW),
    ("nan", SyntaxKind::NAN_KW),
    ("pi", SyntaxKind::PI_KW),
    ("inf", SyntaxKind::INF_KW),
    ("e", SyntaxKind::E_KW),
];

const SI_UNITS: &[(&str, SyntaxKind)] = &[
    ("ampere", SyntaxKind::AMPERE_KW),
    ("becquerel", SyntaxKind::BECQUEREL_KW),
    ("candela", SyntaxKind::CANDELA_KW),
    ("celsius", SyntaxKind::CELSIUS_KW),
    ("coulomb", SyntaxKind::COULOMB_KW),
    ("dimensionless", SyntaxKind::DIMENSIONLESS_KW),
    ("farad", SyntaxKind::FARAD_KW),
    ("gram", SyntaxKind::GRAM_KW),
    ("gray", SyntaxKind::GRAY_KW),
    ("henry", SyntaxKind::HENRY_KW),
    ("hertz", SyntaxKind::HERTZ_KW),
    ("joule", SyntaxKind::JOULE_KW),
    ("katal", SyntaxKind::KATAL_KW),
    ("kelvin", SyntaxKind::KELVIN_KW),
    ("kilogram", SyntaxKind::KILOGRAM_KW),
    ("liter", SyntaxKind::LITER_KW),
    ("litre", SyntaxKind::LITRE_KW),
    ("lumen", SyntaxKind::LUMEN_KW),
    ("lux", SyntaxKind::LUX_KW),
    ("meter", SyntaxKind::METER_KW),
    ("metre", SyntaxKind::METRE_KW),
    ("mole", SyntaxKind::MOLE_KW),
    ("newton", SyntaxKind::NEWTON_KW),
    ("ohm", SyntaxKind::OHM_KW),
    ("pascal", SyntaxKind::PASCAL_KW),
    ("radian", SyntaxKind::RADIAN_KW),
    ("second", SyntaxKind::SECOND_KW),
    ("siemens", SyntaxKind::SIEMENS_KW),
    ("sievert", SyntaxKind::SIEVERT_KW),
    ("steradian", SyntaxKind::STERADIAN_KW),
    ("tesla", SyntaxKind::TESLA_KW),
    ("volt", SyntaxKind::VOLT_KW),
    ("watt", SyntaxKind::WATT_KW),
    ("weber", SyntaxKind::WEBER_KW),
];

const PARAMETER_KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("pref", SyntaxKind::PREF_KW),
    ("expo", SyntaxKind::EXPO_KW),
    ("mult", SyntaxKind::MULT_KW),
    ("off", SyntaxKind::OFF_KW),
    ("init", SyntaxKind::INIT_KW),
    ("pub", SyntaxKind::PUB_KW),
    ("priv", SyntaxKind::PRIV_KW),
    ("in", SyntaxKind::IN_KW),
    ("out", SyntaxKind::OUT_KW),
    ("none", SyntaxKind::NONE_KW),
    ("yotta", SyntaxKind::YOTTA_KW),
    ("zetta", SyntaxKind::ZETTA_KW),
    ("exa", SyntaxKind::EXA_KW),
    ("peta", SyntaxKind::PETA_KW),
    ("tera", SyntaxKind::TERA_KW),
    ("giga", SyntaxKind::GIGA_KW),
    ("mega", SyntaxKind::MEGA_KW),
    ("kilo", SyntaxKind::KILO_KW),
    ("hecto", SyntaxKind::HECTO_KW),
    ("deka", SyntaxKind::DEKA_KW),
    ("deci", SyntaxKind::DECI_KW),
    ("centi", SyntaxKind::CENTI_KW),
    ("milli", SyntaxKind::MILLI_KW),
    ("micro", SyntaxKind::MICRO_KW),
    ("nano", SyntaxKind::NANO_KW),
    ("pico", SyntaxKind::PICO_KW),
    ("femto", SyntaxKind::FEMTO_KW),
    ("atto", SyntaxKind::ATTO_KW),
    ("zepto", SyntaxKind::ZEPTO_KW),
    ("yocto", SyntaxKind::YOCTO_KW),
];

fn build(entries: &[(&'static str, SyntaxKind)]) -> FxHashMap<&'static str, SyntaxKind> {
    entries.iter().copied().collect()
}

static LANGUAGE: LazyLock<FxHashMap<&'static str, SyntaxKind>> =
    LazyLock::new(|| build(LANGUAGE_KEYWORDS));
static UNITS: LazyLock<FxHashMap<&'static str, SyntaxKind>> = LazyLock::new(|| build(SI_UNITS));
static PARAMETERS: LazyLock<FxHashMap<&'static str, SyntaxKind>> =
    LazyLock::new(|| build(PARAMETER_KEYWORDS));

static NAMES: LazyLock<FxHashMap<SyntaxKind, &'static str>> = LazyLock::new(|| {
    LANGUAGE_KEYWORDS
        .iter()
        .chain(SI_UNITS)
        .chain(PARAMETER_KEYWORDS)
        .map(|&(word, kind)| (kind, word))
        .collect()
});

static QUOTED: LazyLock<FxHashMap<SyntaxKind, String>> = LazyLock::new(|| {
    NAMES
        .iter()
        .map(|(&kind, word)| (kind, format!("'{word}'")))
        .collect()
});

/// Classify a word read outside a parameter block
///
/// Language keywords take precedence over SI unit names; anything else is
/// an identifier.
pub fn lookup(word: &str) -> SyntaxKind {
    LANGUAGE
        .get(word)
        .or_else(|| UNITS.get(word))
        .copied()
        .unwrap_or(SyntaxKind::IDENT)
}

/// Classify a word read inside a parameter block
///
/// Parameter keywords are tried first, then the regular tables.
pub fn lookup_in_parameter_block(word: &str) -> SyntaxKind {
    match PARAMETERS.get(word) {
        Some(&kind) => kind,
        None => lookup(word),
    }
}

/// Source spelling of a keyword kind
pub fn keyword_text(kind: SyntaxKind) -> Option<&'static str> {
    NAMES.get(&kind).copied()
}

/// Keyword spelling wrapped in single quotes, for diagnostics
pub fn quoted_keyword(kind: SyntaxKind) -> Option<&'static str> {
    QUOTED.get(&kind).map(String::as_str)
}
