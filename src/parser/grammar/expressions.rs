//! Expression parsing for equations
//!
//! Precedence chain, lowest to highest:
//!
//! ```text
//! or → xor → and → comparison (non-associative) → additive
//!     → multiplicative → unary (- + not) → primary
//! ```
//!
//! Primaries are numbers with optional `{units}`, constants, names,
//! parenthesised expressions, function calls, `ode(...)` derivatives and
//! `sel ... endsel` piecewise expressions.

use smol_str::SmolStr;

use super::parameters::is_word_in_block;
use super::{ExpressionParser, PResult, expected_message};
use crate::document::{BinaryOp, Constant, Expr, Function, Literal, Piece, UnaryOp};
use crate::parser::errors::{ErrorCode, Issue, ParseContext};
use crate::parser::syntax_kind::SyntaxKind;

/// Parse a complete expression
pub fn parse_expression<P: ExpressionParser>(p: &mut P) -> PResult<Expr> {
    parse_left_associative(p, &[(SyntaxKind::OR_KW, BinaryOp::Or)], parse_xor_expression)
}

fn parse_xor_expression<P: ExpressionParser>(p: &mut P) -> PResult<Expr> {
    parse_left_associative(p, &[(SyntaxKind::XOR_KW, BinaryOp::Xor)], parse_and_expression)
}

fn parse_and_expression<P: ExpressionParser>(p: &mut P) -> PResult<Expr> {
    parse_left_associative(p, &[(SyntaxKind::AND_KW, BinaryOp::And)], parse_comparison)
}

fn parse_additive_expression<P: ExpressionParser>(p: &mut P) -> PResult<Expr> {
    parse_left_associative(
        p,
        &[
            (SyntaxKind::PLUS, BinaryOp::Plus),
            (SyntaxKind::MINUS, BinaryOp::Minus),
        ],
        parse_multiplicative_expression,
    )
}

fn parse_multiplicative_expression<P: ExpressionParser>(p: &mut P) -> PResult<Expr> {
    parse_left_associative(
        p,
        &[
            (SyntaxKind::TIMES, BinaryOp::Times),
            (SyntaxKind::DIVIDE, BinaryOp::Divide),
        ],
        parse_unary_expression,
    )
}

fn parse_left_associative<P: ExpressionParser>(
    p: &mut P,
    operators: &[(SyntaxKind, BinaryOp)],
    operand: fn(&mut P) -> PResult<Expr>,
) -> PResult<Expr> {
    let mut lhs = operand(p)?;
    while let Some(&(_, op)) = operators.iter().find(|(kind, _)| p.at(*kind)) {
        p.bump();
        let rhs = operand(p)?;
        lhs = Expr::binary(op, lhs, rhs);
    }
    Ok(lhs)
}

fn comparison_operator(kind: SyntaxKind) -> Option<BinaryOp> {
    Some(match kind {
        SyntaxKind::EQ_EQ => BinaryOp::Eq,
        SyntaxKind::NEQ => BinaryOp::Neq,
        SyntaxKind::LT => BinaryOp::Lt,
        SyntaxKind::LEQ => BinaryOp::Leq,
        SyntaxKind::GT => BinaryOp::Gt,
        SyntaxKind::GEQ => BinaryOp::Geq,
        _ => return None,
    })
}

/// `a < b` is fine, `a < b < c` is not
fn parse_comparison<P: ExpressionParser>(p: &mut P) -> PResult<Expr> {
    let lhs = parse_additive_expression(p)?;
    let Some(op) = comparison_operator(p.current_kind()) else {
        return Ok(lhs);
    };
    p.bump();
    let rhs = parse_additive_expression(p)?;

    if p.current_kind().is_comparison() {
        let message = format!(
            "'{}' cannot follow another comparison, combine comparisons with 'and'",
            p.current().text
        );
        return Err(p.error(ErrorCode::E0403, message));
    }

    Ok(Expr::binary(op, lhs, rhs))
}

fn parse_unary_expression<P: ExpressionParser>(p: &mut P) -> PResult<Expr> {
    let op = match p.current_kind() {
        SyntaxKind::MINUS => UnaryOp::Minus,
        SyntaxKind::PLUS => UnaryOp::Plus,
        SyntaxKind::NOT_KW => UnaryOp::Not,
        _ => return parse_primary_expression(p),
    };
    p.bump();
    let operand = parse_unary_expression(p)?;
    Ok(Expr::unary(op, operand))
}

fn parse_primary_expression<P: ExpressionParser>(p: &mut P) -> PResult<Expr> {
    let kind = p.current_kind();
    match kind {
        SyntaxKind::NUMBER => parse_number(p, true).map(Expr::Number),
        SyntaxKind::IDENT => Ok(Expr::Identifier(p.bump().text)),
        SyntaxKind::L_PAREN => {
            p.bump();
            let inner = parse_expression(p)?;
            p.expect(SyntaxKind::R_PAREN)?;
            Ok(inner)
        }
        SyntaxKind::ODE_KW => parse_derivative(p),
        SyntaxKind::SEL_KW => parse_piecewise(p),
        _ if kind.is_constant() => {
            let token = p.bump();
            match Constant::from_keyword(&token.text) {
                Some(constant) => Ok(Expr::Constant(constant)),
                None => Ok(Expr::Identifier(token.text)),
            }
        }
        _ if kind.is_function() => parse_call(p),
        _ => {
            let message = expected_message("an expression", p.current());
            Err(p.error(ErrorCode::E0401, message))
        }
    }
}

/// `NUMBER ['{' UNIT_NAME '}']`
///
/// Numbers in equations should carry units; a bare one gets a warning when
/// `warn_without_units` is set.
fn parse_number<P: ExpressionParser>(p: &mut P, warn_without_units: bool) -> PResult<Literal> {
    let number = p.bump();

    if !p.at(SyntaxKind::L_BRACE) {
        if warn_without_units {
            p.report(
                Issue::warning(
                    ErrorCode::W0101,
                    number.start(),
                    format!("the number '{}' has no units", number.text),
                )
                .with_hint(format!("write it as {}{{dimensionless}}", number.text)),
            );
        }
        return Ok(Literal::new(number.text, None));
    }

    p.bump();
    let units = parse_units_reference(p)?;
    p.expect(SyntaxKind::R_BRACE)?;
    Ok(Literal::new(number.text, Some(units)))
}

fn parse_units_reference<P: ExpressionParser>(p: &mut P) -> PResult<SmolStr> {
    if is_word_in_block(p.current_kind()) {
        return Ok(p.bump().text);
    }
    let message = expected_message("a unit name", p.current());
    Err(p.error(ErrorCode::E0302, message))
}

fn parse_call<P: ExpressionParser>(p: &mut P) -> PResult<Expr> {
    let name = p.bump();
    let Some(function) = Function::from_name(&name.text) else {
        return Ok(Expr::Identifier(name.text));
    };

    p.expect(SyntaxKind::L_PAREN)?;
    let mut args = vec![parse_expression(p)?];
    while p.eat(SyntaxKind::COMMA) {
        args.push(parse_expression(p)?);
    }
    p.expect(SyntaxKind::R_PAREN)?;

    let arity = function.arity();
    if !arity.accepts(args.len()) {
        p.report(Issue::error(
            ErrorCode::E0402,
            name.start(),
            format!(
                "'{}' takes {} but was given {}",
                function.name(),
                arity.description(),
                args.len()
            ),
        ));
    }

    Ok(Expr::call(function, args))
}

/// `ode(variable, bvar[, order])`
fn parse_derivative<P: ExpressionParser>(p: &mut P) -> PResult<Expr> {
    p.bump();
    p.expect(SyntaxKind::L_PAREN)?;
    let variable = p.expect(SyntaxKind::IDENT)?.text;
    p.expect(SyntaxKind::COMMA)?;
    let bvar = p.expect(SyntaxKind::IDENT)?.text;

    let order = if p.eat(SyntaxKind::COMMA) {
        if !p.at(SyntaxKind::NUMBER) {
            let message = expected_message("the order of the derivative", p.current());
            return Err(p.error(ErrorCode::E0401, message));
        }
        Some(parse_number(p, false)?)
    } else {
        None
    };

    p.expect(SyntaxKind::R_PAREN)?;
    Ok(Expr::Derivative {
        variable,
        bvar,
        order,
    })
}

/// `sel (case cond: value;)+ [otherwise: value;] endsel`
///
/// A malformed case is skipped up to its `;` and the remaining cases are
/// still read.
fn parse_piecewise<P: ExpressionParser>(p: &mut P) -> PResult<Expr> {
    let sel = p.bump();
    let mut pieces = Vec::new();
    let mut otherwise: Option<Box<Expr>> = None;

    loop {
        match p.current_kind() {
            SyntaxKind::ENDSEL_KW => {
                p.bump();
                break;
            }
            SyntaxKind::CASE_KW if otherwise.is_none() => match parse_case(p) {
                Ok(piece) => pieces.push(piece),
                Err(_) => p.recover(0),
            },
            SyntaxKind::OTHERWISE_KW if otherwise.is_none() => match parse_otherwise(p) {
                Ok(value) => otherwise = Some(Box::new(value)),
                Err(_) => p.recover(0),
            },
            _ => {
                let closes_outer = p.at_any(&[
                    SyntaxKind::EOF,
                    SyntaxKind::DEF_KW,
                    SyntaxKind::ENDDEF_KW,
                    SyntaxKind::ENDCOMP_KW,
                ]);
                let expected = if closes_outer || otherwise.is_some() {
                    "'endsel'"
                } else {
                    ParseContext::Piecewise.expected_description()
                };
                let message = expected_message(expected, p.current());
                let code = if closes_outer {
                    ErrorCode::E0202
                } else {
                    ErrorCode::E0901
                };
                let aborted = p.error(code, message);
                if closes_outer {
                    return Err(aborted);
                }
                p.recover(0);
            }
        }
    }

    if pieces.is_empty() {
        p.report(Issue::error(
            ErrorCode::E0404,
            sel.start(),
            ErrorCode::E0404.default_message(),
        ));
    }

    Ok(Expr::Piecewise { pieces, otherwise })
}

fn parse_case<P: ExpressionParser>(p: &mut P) -> PResult<Piece> {
    p.bump();
    let condition = parse_expression(p)?;
    p.expect(SyntaxKind::COLON)?;
    let value = parse_expression(p)?;
    p.expect(SyntaxKind::SEMICOLON)?;
    Ok(Piece { condition, value })
}

fn parse_otherwise<P: ExpressionParser>(p: &mut P) -> PResult<Expr> {
    p.bump();
    p.expect(SyntaxKind::COLON)?;
    let value = parse_expression(p)?;
    p.expect(SyntaxKind::SEMICOLON)?;
    Ok(value)
}
