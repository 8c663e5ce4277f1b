//! cmeta ids and parameter blocks
//!
//! ```text
//! cmeta       = '{' CMETA_ID '}'
//! unit_params = '{' unit_param (',' unit_param)* '}'
//! var_params  = '{' var_param (',' var_param)* '}'
//! ```
//!
//! Inside the braces the scanner recognises the parameter keywords, so keys
//! arrive as `PREF_KW`, `INIT_KW` and so on.

use smol_str::{SmolStr, format_smolstr};

use super::{ExpressionParser, PResult, expected_message};
use crate::document::{Interface, Prefix, Unit, Variable};
use crate::parser::errors::{ErrorCode, Issue};
use crate::parser::scanner::Token;
use crate::parser::syntax_kind::SyntaxKind;

/// Words accepted where a name is expected inside braces
pub fn is_word_in_block(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::IDENT || kind.is_si_unit() || kind.is_parameter_keyword()
}

fn is_cmeta_id(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::PROPER_CMETA_ID || is_word_in_block(kind) || kind.is_keyword()
}

/// Parse an optional `{id}` annotation
pub fn parse_cmeta_id<P: ExpressionParser>(p: &mut P) -> PResult<Option<SmolStr>> {
    if !p.at(SyntaxKind::L_BRACE) {
        return Ok(None);
    }
    p.bump();
    if !is_cmeta_id(p.current_kind()) {
        let message = expected_message("a cmeta id", p.current());
        return Err(p.error(ErrorCode::E0301, message));
    }
    let id = p.bump().text;
    p.expect(SyntaxKind::R_BRACE)?;
    Ok(Some(id))
}

/// `{pref: milli, expo: 2, mult: 1.5, off: 0}`
pub fn parse_unit_parameters<P: ExpressionParser>(p: &mut P, unit: &mut Unit) -> PResult<()> {
    parse_parameter_block(p, |p, key| match key.kind {
        SyntaxKind::PREF_KW => {
            let prefix = if p.current_kind().is_prefix() {
                Prefix::Named(p.bump().text)
            } else if p.at_any(&[SyntaxKind::NUMBER, SyntaxKind::MINUS, SyntaxKind::PLUS]) {
                Prefix::Factor(parse_signed_number(p)?)
            } else {
                let message = expected_message("a prefix or a number", p.current());
                return Err(p.error(ErrorCode::E0305, message));
            };
            set_once(p, &mut unit.prefix, prefix, key);
            Ok(())
        }
        SyntaxKind::EXPO_KW => {
            let value = parse_signed_number(p)?;
            set_once(p, &mut unit.exponent, value, key);
            Ok(())
        }
        SyntaxKind::MULT_KW => {
            let value = parse_signed_number(p)?;
            set_once(p, &mut unit.multiplier, value, key);
            Ok(())
        }
        SyntaxKind::OFF_KW => {
            let value = parse_signed_number(p)?;
            set_once(p, &mut unit.offset, value, key);
            Ok(())
        }
        _ => Err(not_allowed(p, key, "'pref', 'expo', 'mult' or 'off'")),
    })
}

/// `{init: -84.5, pub: out, priv: none}`
pub fn parse_variable_parameters<P: ExpressionParser>(
    p: &mut P,
    variable: &mut Variable,
) -> PResult<()> {
    parse_parameter_block(p, |p, key| match key.kind {
        SyntaxKind::INIT_KW => {
            // a variable name, even one spelled like a parameter keyword
            let value = if is_word_in_block(p.current_kind()) {
                p.bump().text
            } else {
                parse_signed_number(p)?
            };
            set_once(p, &mut variable.initial_value, value, key);
            Ok(())
        }
        SyntaxKind::PUB_KW => {
            let interface = parse_interface(p)?;
            set_once(p, &mut variable.public_interface, interface, key);
            Ok(())
        }
        SyntaxKind::PRIV_KW => {
            let interface = parse_interface(p)?;
            set_once(p, &mut variable.private_interface, interface, key);
            Ok(())
        }
        _ => Err(not_allowed(p, key, "'init', 'pub' or 'priv'")),
    })
}

fn parse_parameter_block<P, F>(p: &mut P, mut parameter: F) -> PResult<()>
where
    P: ExpressionParser,
    F: FnMut(&mut P, &Token) -> PResult<()>,
{
    p.expect(SyntaxKind::L_BRACE)?;
    loop {
        if !p.current_kind().is_parameter_keyword() {
            let message = expected_message("a parameter", p.current());
            return Err(p.error(ErrorCode::E0303, message));
        }
        let key = p.bump();
        p.expect(SyntaxKind::COLON)?;
        parameter(p, &key)?;

        if !p.eat(SyntaxKind::COMMA) {
            p.expect(SyntaxKind::R_BRACE)?;
            return Ok(());
        }
    }
}

fn not_allowed<P: ExpressionParser>(p: &mut P, key: &Token, expected: &str) -> super::Aborted {
    p.report(Issue::error(
        ErrorCode::E0303,
        key.start(),
        format!("expected {expected} but found '{}'", key.text),
    ));
    super::Aborted
}

/// Keep the first value of a parameter and report any repetition
fn set_once<P: ExpressionParser, T>(p: &mut P, slot: &mut Option<T>, value: T, key: &Token) {
    if slot.is_some() {
        p.report(Issue::error(
            ErrorCode::E0304,
            key.start(),
            format!("the '{}' parameter is already set", key.text),
        ));
        return;
    }
    *slot = Some(value);
}

/// `['+' | '-'] NUMBER`, kept as text; a leading `+` is dropped
pub fn parse_signed_number<P: ExpressionParser>(p: &mut P) -> PResult<SmolStr> {
    let negative = if p.eat(SyntaxKind::MINUS) {
        true
    } else {
        p.eat(SyntaxKind::PLUS);
        false
    };
    if !p.at(SyntaxKind::NUMBER) {
        let message = expected_message("a number", p.current());
        return Err(p.error(ErrorCode::E0305, message));
    }
    let number = p.bump().text;
    Ok(if negative {
        format_smolstr!("-{number}")
    } else {
        number
    })
}

fn parse_interface<P: ExpressionParser>(p: &mut P) -> PResult<Interface> {
    let interface = match p.current_kind() {
        SyntaxKind::IN_KW => Interface::In,
        SyntaxKind::OUT_KW => Interface::Out,
        SyntaxKind::NONE_KW => Interface::None,
        _ => {
            let message = expected_message("'in', 'out' or 'none'", p.current());
            return Err(p.error(ErrorCode::E0305, message));
        }
    };
    p.bump();
    Ok(interface)
}
