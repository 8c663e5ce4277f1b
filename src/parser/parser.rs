//! Recursive descent parser for the CellML text notation
//!
//! Pulls tokens from the [`Scanner`] one at a time, keeping a single token of
//! lookahead, and builds a [`Document`] through the grammar functions in
//! [`super::grammar`]. Parsing always completes: malformed statements are
//! reported and skipped, and whatever could be read is returned.

use tracing::{debug, trace};

use crate::base::Position;
use crate::document::{Document, Model, NodeId};

use super::errors::{Diagnostics, ErrorCode, Issue, ParseContext};
use super::grammar::{self, ExpressionParser, ModelParser};
use super::scanner::{Scanner, Token};
use super::syntax_kind::SyntaxKind;

/// Parse result containing the document and any issues
#[derive(Debug, Clone)]
pub struct Parse {
    /// `None` only when the `def model NAME` header could not be read
    pub document: Option<Document>,
    pub issues: Vec<Issue>,
}

impl Parse {
    /// Check if any issue is an error
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(Issue::is_error)
    }

    /// Check if parsing produced a document and no errors
    pub fn ok(&self) -> bool {
        self.document.is_some() && !self.has_errors()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|issue| issue.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|issue| !issue.is_error())
    }
}

/// Parse CellML text into a document
pub fn parse(input: &str) -> Parse {
    let mut parser = Parser::new(input);
    if grammar::parse_model(&mut parser).is_err() {
        trace!("model header could not be read");
    }
    let parse = parser.finish();
    debug!(
        issues = parse.issues.len(),
        nodes = parse.document.as_ref().map_or(0, Document::len),
        "parsed model text"
    );
    parse
}

/// Parse a single expression, e.g. the right-hand side of an equation
///
/// Trailing input after the expression is an error.
pub fn parse_expression(input: &str) -> (Option<crate::document::Expr>, Vec<Issue>) {
    let mut parser = Parser::new(input);
    let expr = grammar::parse_expression(&mut parser).ok();
    if expr.is_some() && !parser.at(SyntaxKind::EOF) {
        let message = format!(
            "{} but found {}",
            ErrorCode::E0203.default_message(),
            grammar::describe(parser.current())
        );
        parser.error(ErrorCode::E0203, message);
    }
    (expr, parser.finish().issues)
}

/// The parser state
struct Parser<'a> {
    scanner: Scanner<'a>,
    current: Token,
    next: Token,
    diagnostics: Diagnostics,
    /// Issues raised while scanning `next`
    lookahead_issues: Vec<Issue>,
    document: Option<Document>,
    contexts: Vec<ParseContext>,
    previous_kind: Option<SyntaxKind>,
    /// The current token is a string that runs to the end of its line
    current_unterminated: bool,
    /// The last consumed token was an unterminated string
    after_unterminated: bool,
    last_end: Position,
    eof_reported: bool,
}

fn has_unterminated_string(issues: &[Issue]) -> bool {
    issues.iter().any(|issue| issue.code == ErrorCode::E0102)
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        let mut scanner = Scanner::new(input);
        let mut diagnostics = Diagnostics::new();
        let current = scanner.next_token();
        let current_issues = scanner.take_issues();
        let current_unterminated = has_unterminated_string(&current_issues);
        diagnostics.extend(current_issues);
        let next = scanner.next_token();
        let lookahead_issues = scanner.take_issues();

        Self {
            scanner,
            current,
            next,
            diagnostics,
            lookahead_issues,
            document: None,
            contexts: Vec::new(),
            previous_kind: None,
            current_unterminated,
            after_unterminated: false,
            last_end: Position::start(),
            eof_reported: false,
        }
    }

    /// Pull the next token from the scanner into the lookahead slot
    ///
    /// Scanner issues are recorded once their token becomes current, so they
    /// interleave with parser issues in source order.
    fn pull(&mut self) -> Token {
        let (next, issues) = if self.next.is_eof() {
            (self.next.clone(), Vec::new())
        } else {
            let token = self.scanner.next_token();
            (token, self.scanner.take_issues())
        };
        let current = std::mem::replace(&mut self.current, std::mem::replace(&mut self.next, next));
        let ready = std::mem::replace(&mut self.lookahead_issues, issues);
        self.current_unterminated = has_unterminated_string(&ready);
        self.diagnostics.extend(ready);
        current
    }

    fn finish(mut self) -> Parse {
        let pending = std::mem::take(&mut self.lookahead_issues);
        self.diagnostics.extend(pending);
        Parse {
            document: self.document,
            issues: self.diagnostics.into_vec(),
        }
    }

    /// Whether an error at the current token would only repeat one already
    /// reported
    ///
    /// An unterminated string swallows the rest of its line, so the first
    /// error after it is a consequence of the same mistake.
    fn is_follow_up_error(&self) -> bool {
        match self.current.kind {
            SyntaxKind::INVALID => true,
            SyntaxKind::EOF => {
                self.eof_reported
                    || self.after_unterminated
                    || self.previous_kind == Some(SyntaxKind::INVALID)
            }
            _ => self.after_unterminated,
        }
    }
}

impl ExpressionParser for Parser<'_> {
    fn current(&self) -> &Token {
        &self.current
    }

    fn peek_kind(&self) -> SyntaxKind {
        self.next.kind
    }

    fn bump(&mut self) -> Token {
        let unterminated = self.current_unterminated;
        let token = self.pull();
        if !token.is_eof() {
            self.after_unterminated = unterminated;
            self.previous_kind = Some(token.kind);
            self.last_end = token.span.end;
        }
        token
    }

    fn report(&mut self, issue: Issue) {
        self.diagnostics.push(issue);
    }

    fn error(&mut self, code: ErrorCode, message: String) -> grammar::Aborted {
        if self.is_follow_up_error() {
            trace!(code = code.as_str(), "suppressed follow-up error");
            return grammar::Aborted;
        }
        if self.current.is_eof() {
            self.eof_reported = true;
        }
        let position = self.current.start();
        self.diagnostics.error(code, position, message);
        grammar::Aborted
    }

    fn recover(&mut self, mut depth: usize) {
        let from = self.current.start();
        loop {
            match self.current.kind {
                SyntaxKind::EOF => break,
                SyntaxKind::SEMICOLON if depth == 0 => {
                    self.bump();
                    break;
                }
                SyntaxKind::ENDDEF_KW | SyntaxKind::ENDCOMP_KW | SyntaxKind::ENDSEL_KW => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    self.bump();
                }
                SyntaxKind::DEF_KW if depth == 0 => break,
                SyntaxKind::DEF_KW | SyntaxKind::INCL_KW | SyntaxKind::SEL_KW => {
                    depth += 1;
                    self.bump();
                }
                // `def unit u as base unit;` has no `enddef`
                SyntaxKind::BASE_KW if depth > 0 && self.next.kind == SyntaxKind::UNIT_KW => {
                    depth -= 1;
                    self.bump();
                }
                _ => {
                    self.bump();
                }
            }
        }
        trace!(
            from_line = from.line,
            to_line = self.current.start().line,
            "recovered"
        );
    }
}

impl ModelParser for Parser<'_> {
    fn begin_model(&mut self, model: Model) -> NodeId {
        let document = Document::new(model);
        let root = document.root();
        self.document = Some(document);
        root
    }

    fn document(&mut self) -> &mut Document {
        self.document
            .get_or_insert_with(|| Document::new(Model::default()))
    }

    fn enter(&mut self, context: ParseContext) {
        self.contexts.push(context);
    }

    fn leave(&mut self) {
        self.contexts.pop();
    }

    fn at_enclosing_item(&self) -> bool {
        let Some((_, outer)) = self.contexts.split_last() else {
            return false;
        };
        let kind = self.current.kind;
        outer
            .iter()
            .any(|context| kind == context.terminator() || context.accepts(kind, self.next.kind))
    }

    fn last_end(&self) -> Position {
        self.last_end
    }
}
