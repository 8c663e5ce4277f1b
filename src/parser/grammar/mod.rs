//! Grammar modules for the CellML text notation
//!
//! - `model` - the model and its definitions (imports, units, components,
//!   groups, maps)
//! - `parameters` - cmeta ids and the `{...}` parameter blocks of units and
//!   variables
//! - `expressions` - the equation precedence chain and piecewise expressions
//!
//! The parsing functions are generic over [`ExpressionParser`] and
//! [`ModelParser`] so the grammar does not depend on how tokens are pulled
//! or where diagnostics go.

pub mod expressions;
pub mod model;
pub mod parameters;

pub use expressions::parse_expression;
pub use model::parse_model;

use crate::base::Position;
use crate::document::{Document, Model, NodeId};
use crate::parser::errors::{ErrorCode, Issue, ParseContext};
use crate::parser::scanner::Token;
use crate::parser::syntax_kind::SyntaxKind;

/// Marker returned once an error has been reported and the caller must
/// resynchronize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aborted;

pub type PResult<T> = Result<T, Aborted>;

/// Token access and diagnostics needed by the expression grammar
pub trait ExpressionParser {
    /// The token under the cursor
    fn current(&self) -> &Token;

    /// Kind of the token after the current one
    fn peek_kind(&self) -> SyntaxKind;

    /// Consume the current token and return it
    fn bump(&mut self) -> Token;

    /// Record an issue
    fn report(&mut self, issue: Issue);

    /// Report an error at the current token and return the abort marker
    fn error(&mut self, code: ErrorCode, message: String) -> Aborted;

    /// Skip tokens up to the next statement boundary
    ///
    /// `depth` is the number of blocks already open when skipping starts.
    fn recover(&mut self, depth: usize);

    fn current_kind(&self) -> SyntaxKind {
        self.current().kind
    }

    fn current_position(&self) -> Position {
        self.current().start()
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or report what was found instead
    fn expect(&mut self, kind: SyntaxKind) -> PResult<Token> {
        if self.at(kind) {
            return Ok(self.bump());
        }
        let code = match kind {
            SyntaxKind::SEMICOLON => ErrorCode::E0201,
            SyntaxKind::ENDDEF_KW | SyntaxKind::ENDCOMP_KW | SyntaxKind::ENDSEL_KW => {
                ErrorCode::E0202
            }
            SyntaxKind::IDENT => ErrorCode::E0301,
            _ => ErrorCode::E0902,
        };
        let message = expected_message(
            crate::parser::syntax_kind::kind_to_name(kind),
            self.current(),
        );
        Err(self.error(code, message))
    }
}

/// Document building and block bookkeeping needed by the model grammar
pub trait ModelParser: ExpressionParser {
    /// Create the document once the model header has been read
    fn begin_model(&mut self, model: Model) -> NodeId;

    /// The document under construction
    ///
    /// Only called after [`ModelParser::begin_model`].
    fn document(&mut self) -> &mut Document;

    /// Enter a block body
    fn enter(&mut self, context: ParseContext);

    /// Leave the innermost block body
    fn leave(&mut self);

    /// Check if the current token closes or starts an item of a block that
    /// encloses the innermost one
    fn at_enclosing_item(&self) -> bool;

    /// End of the last consumed token
    fn last_end(&self) -> Position;
}

/// "expected X but found Y"
pub fn expected_message(expected: &str, found: &Token) -> String {
    format!("expected {expected} but found {}", describe(found))
}

/// Describe a token for diagnostics
pub fn describe(token: &Token) -> String {
    match token.kind {
        SyntaxKind::EOF => "the end of the file".to_string(),
        SyntaxKind::STRING => format!("the string \"{}\"", token.text),
        _ => format!("'{}'", token.text),
    }
}

/// Check if a token kind can start an expression
pub fn starts_expression(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::IDENT
            | SyntaxKind::NUMBER
            | SyntaxKind::L_PAREN
            | SyntaxKind::MINUS
            | SyntaxKind::PLUS
            | SyntaxKind::NOT_KW
            | SyntaxKind::ODE_KW
            | SyntaxKind::SEL_KW
    ) || kind.is_function()
        || kind.is_constant()
}

/// Check if a token can be used as a unit name
pub fn is_unit_name(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::IDENT || kind.is_si_unit()
}
