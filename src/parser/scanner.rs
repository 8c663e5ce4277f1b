//! Scanner for the CellML text notation
//!
//! The scanner is pull-based: [`Scanner::next_token`] returns one significant
//! token per call and attaches any comments it skipped on the way. Lexical
//! problems never stop the stream; they produce a best-effort token and an
//! [`Issue`] that the caller collects with [`Scanner::take_issues`].
//!
//! Raw lexemes come from a logos-generated DFA. Words are lexed with a single
//! pattern and classified afterwards against the keyword tables in
//! [`super::keywords`]: parameter-block keywords (`pref`, `mult`, `in`, ...)
//! are only recognised while the lexer is inside at least one `{...}` block,
//! which it tracks in its extras.

use logos::Logos;
use smol_str::SmolStr;
use text_size::TextSize;

use crate::base::{Position, Span};

use super::errors::{ErrorCode, Issue};
use super::keywords;
use super::syntax_kind::SyntaxKind;

/// A token with its kind, text and source span
///
/// For strings, `text` holds the value with its delimiters removed and its
/// escapes resolved; for numbers it is the valid prefix of the lexeme; for
/// every other kind it is the lexeme itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub text: SmolStr,
    pub span: Span,
    /// Comments found between the previous significant token and this one
    pub comment: Option<String>,
}

impl Token {
    pub fn start(&self) -> Position {
        self.span.start
    }

    pub fn is_eof(&self) -> bool {
        self.kind == SyntaxKind::EOF
    }
}

/// State the logos callbacks share with the scanner
#[derive(Debug, Default)]
struct ScanState {
    /// Number of `{` not yet closed by a `}`
    braces: usize,
    /// Offset of an exponent marker that has no digits
    malformed_exponent: Option<usize>,
    unterminated_comment: bool,
}

/// String value and whether the closing delimiter was found
#[derive(Debug, Clone, PartialEq)]
struct QuotedString {
    value: String,
    terminated: bool,
}

/// Raw lexemes, whitespace and comments included
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(extras = ScanState)]
enum RawToken {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\r\n]*", allow_greedy = true)]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r"[\p{XID_Start}_]\p{XID_Continue}*", word)]
    Word,

    #[regex(r"[0-9]+(\.[0-9]*)?", exponent)]
    #[regex(r"\.[0-9]+", exponent)]
    Number,

    #[token("\"", quoted_string)]
    #[token("'", quoted_string)]
    Str(QuotedString),

    #[token(".")]
    FullStop,
    #[token(",")]
    Comma,
    #[token("==")]
    EqEq,
    #[token("=")]
    Eq,
    #[token("<>")]
    Neq,
    #[token("<=")]
    Leq,
    #[token("<")]
    Lt,
    #[token(">=")]
    Geq,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Times,
    #[token("/")]
    Divide,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{", |lex| lex.extras.braces += 1)]
    LBrace,
    #[token("}", |lex| lex.extras.braces = lex.extras.braces.saturating_sub(1))]
    RBrace,
}

/// Inside a block, `.` and `-` extend a word into a cmeta id
fn word(lex: &mut logos::Lexer<'_, RawToken>) {
    if lex.extras.braces == 0 {
        return;
    }
    let rest = lex.remainder();
    let extra = rest
        .char_indices()
        .find(|&(_, c)| !(matches!(c, '.' | '-') || unicode_ident::is_xid_continue(c)))
        .map_or(rest.len(), |(index, _)| index);
    lex.bump(extra);
}

/// Consume an `e`/`E` exponent after the mantissa
///
/// An exponent without digits is consumed too so that the token covers it;
/// its offset is left in the extras for the scanner to report.
fn exponent(lex: &mut logos::Lexer<'_, RawToken>) {
    let rest = lex.remainder().as_bytes();
    if !matches!(rest.first(), Some(b'e' | b'E')) {
        return;
    }
    let mut len = 1;
    if matches!(rest.get(1), Some(b'+' | b'-')) {
        len += 1;
    }
    let digits = rest[len..].iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        lex.extras.malformed_exponent = Some(lex.span().end);
    }
    lex.bump(len + digits);
}

fn quoted_string(lex: &mut logos::Lexer<'_, RawToken>) -> QuotedString {
    let delimiter = if lex.slice() == "'" { '\'' } else { '"' };
    let (quoted, len) = scan_string_body(lex.remainder(), delimiter);
    lex.bump(len);
    quoted
}

/// Scan a string body up to and including its closing delimiter
///
/// A backslash escapes the next character and a doubled delimiter stands for
/// the delimiter itself. An unterminated string stops at the end of its line.
fn scan_string_body(text: &str, delimiter: char) -> (QuotedString, usize) {
    let mut value = String::new();
    let mut chars = text.char_indices().peekable();
    while let Some((index, c)) = chars.next() {
        match c {
            '\n' | '\r' => {
                let quoted = QuotedString {
                    value,
                    terminated: false,
                };
                return (quoted, index);
            }
            '\\' => match chars.peek() {
                Some(&(_, escaped)) if escaped != '\n' && escaped != '\r' => {
                    value.push(escaped);
                    chars.next();
                }
                _ => value.push(c),
            },
            c if c == delimiter => {
                if chars.peek().is_some_and(|&(_, next)| next == delimiter) {
                    value.push(delimiter);
                    chars.next();
                } else {
                    let quoted = QuotedString {
                        value,
                        terminated: true,
                    };
                    return (quoted, index + c.len_utf8());
                }
            }
            c => value.push(c),
        }
    }
    let quoted = QuotedString {
        value,
        terminated: false,
    };
    (quoted, text.len())
}

/// Multiline comments nest: every `/*` needs its own `*/`
fn block_comment(lex: &mut logos::Lexer<'_, RawToken>) {
    let rest = lex.remainder().as_bytes();
    let mut depth = 1usize;
    let mut index = 0;
    while depth > 0 {
        match (rest.get(index), rest.get(index + 1)) {
            (None, _) => {
                lex.extras.unterminated_comment = true;
                break;
            }
            (Some(b'/'), Some(b'*')) => {
                depth += 1;
                index += 2;
            }
            (Some(b'*'), Some(b'/')) => {
                depth -= 1;
                index += 2;
            }
            _ => index += 1,
        }
    }
    lex.bump(index);
}

fn punctuation(token: &RawToken) -> SyntaxKind {
    match token {
        RawToken::Comma => SyntaxKind::COMMA,
        RawToken::EqEq => SyntaxKind::EQ_EQ,
        RawToken::Eq => SyntaxKind::EQ,
        RawToken::Neq => SyntaxKind::NEQ,
        RawToken::Leq => SyntaxKind::LEQ,
        RawToken::Lt => SyntaxKind::LT,
        RawToken::Geq => SyntaxKind::GEQ,
        RawToken::Gt => SyntaxKind::GT,
        RawToken::Plus => SyntaxKind::PLUS,
        RawToken::Minus => SyntaxKind::MINUS,
        RawToken::Times => SyntaxKind::TIMES,
        RawToken::Divide => SyntaxKind::DIVIDE,
        RawToken::Colon => SyntaxKind::COLON,
        RawToken::Semicolon => SyntaxKind::SEMICOLON,
        RawToken::LParen => SyntaxKind::L_PAREN,
        RawToken::RParen => SyntaxKind::R_PAREN,
        RawToken::LBrace => SyntaxKind::L_BRACE,
        RawToken::RBrace => SyntaxKind::R_BRACE,
        _ => SyntaxKind::INVALID,
    }
}

/// Scanner over a complete source text
pub struct Scanner<'a> {
    inner: logos::Lexer<'a, RawToken>,
    text: &'a str,
    /// Offset, line and column of the last token end
    offset: usize,
    line: usize,
    column: usize,
    issues: Vec<Issue>,
    finished: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            inner: RawToken::lexer(text),
            text,
            offset: 0,
            line: 1,
            column: 1,
            issues: Vec::new(),
            finished: false,
        }
    }

    /// Restart scanning on a new text
    pub fn set_text(&mut self, text: &'a str) {
        *self = Self::new(text);
    }

    /// Check if the scanner is currently inside a `{...}` block
    pub fn within_parameter_block(&self) -> bool {
        self.inner.extras.braces > 0
    }

    /// Drain the issues raised since the last call
    pub fn take_issues(&mut self) -> Vec<Issue> {
        std::mem::take(&mut self.issues)
    }

    /// Return the next significant token
    ///
    /// Comments are skipped and attached to the returned token. Once the end
    /// of the input is reached, every further call returns an EOF token.
    pub fn next_token(&mut self) -> Token {
        let mut comments: Vec<SmolStr> = Vec::new();
        loop {
            let token = self.next_raw_token();
            if token.kind.is_trivia() {
                comments.push(token.text);
                continue;
            }
            let comment = if comments.is_empty() {
                None
            } else {
                Some(comments.join("\n"))
            };
            return Token { comment, ..token };
        }
    }

    /// Return the next token, comments included
    pub fn next_raw_token(&mut self) -> Token {
        loop {
            let Some(result) = self.inner.next() else {
                self.finished = true;
                let end = self.advance_to(self.text.len());
                return Token {
                    kind: SyntaxKind::EOF,
                    text: SmolStr::default(),
                    span: Span::new(end, end),
                    comment: None,
                };
            };

            let range = self.inner.span();
            let start = self.advance_to(range.start);
            let slice = self.inner.slice();

            let (kind, text) = match result {
                Ok(RawToken::Whitespace) => continue,
                Ok(RawToken::LineComment) => (SyntaxKind::SINGLE_LINE_COMMENT, SmolStr::new(slice)),
                Ok(RawToken::BlockComment) => {
                    if std::mem::take(&mut self.inner.extras.unterminated_comment) {
                        self.issues.push(Issue::error(
                            ErrorCode::E0103,
                            start,
                            "the comment is not terminated",
                        ));
                        (SyntaxKind::INVALID, SmolStr::new(slice))
                    } else {
                        (SyntaxKind::MULTILINE_COMMENT, SmolStr::new(slice))
                    }
                }
                Ok(RawToken::Word) => (self.classify_word(slice), SmolStr::new(slice)),
                Ok(RawToken::Number) => {
                    let text = self.number_text(slice, range.start, start);
                    (SyntaxKind::NUMBER, text)
                }
                Ok(RawToken::Str(quoted)) => {
                    if !quoted.terminated {
                        self.issues.push(Issue::error(
                            ErrorCode::E0102,
                            start,
                            "the string is not terminated",
                        ));
                    }
                    (SyntaxKind::STRING, SmolStr::new(quoted.value))
                }
                Ok(RawToken::FullStop) | Err(()) => {
                    self.invalid_character(start, slice);
                    (SyntaxKind::INVALID, SmolStr::new(slice))
                }
                Ok(ref token) => (punctuation(token), SmolStr::new(slice)),
            };

            let end = self.advance_to(range.end);
            return Token {
                kind,
                text,
                span: Span::new(start, end),
                comment: None,
            };
        }
    }

    // =========================================================================
    // Positions
    // =========================================================================

    /// Move the line/column cursor forward to `offset` and return it
    fn advance_to(&mut self, offset: usize) -> Position {
        let text = self.text;
        for (index, c) in text[self.offset..offset].char_indices() {
            let at = self.offset + index;
            match c {
                '\n' => {
                    self.line += 1;
                    self.column = 1;
                }
                // A lone CR is a line break too; in CR LF the LF counts
                '\r' if !text[at + 1..].starts_with('\n') => {
                    self.line += 1;
                    self.column = 1;
                }
                _ => self.column += 1,
            }
        }
        self.offset = offset;
        self.cursor_position()
    }

    fn cursor_position(&self) -> Position {
        Position::new(self.line, self.column, TextSize::new(self.offset as u32))
    }

    // =========================================================================
    // Token categories
    // =========================================================================

    /// Identifiers, keywords and cmeta ids
    fn classify_word(&self, word: &str) -> SyntaxKind {
        if !self.within_parameter_block() {
            keywords::lookup(word)
        } else if word.contains(['.', '-']) {
            SyntaxKind::PROPER_CMETA_ID
        } else {
            keywords::lookup_in_parameter_block(word)
        }
    }

    /// Valid prefix of a number lexeme, reporting a malformed exponent and
    /// values out of range
    fn number_text(&mut self, slice: &str, start_offset: usize, start: Position) -> SmolStr {
        let mut text = slice;
        if let Some(marker) = self.inner.extras.malformed_exponent.take() {
            text = &slice[..marker - start_offset];
            let exponent_position = Position::new(
                start.line,
                start.column + text.chars().count(),
                TextSize::new(marker as u32),
            );
            self.issues.push(
                Issue::error(
                    ErrorCode::E0104,
                    exponent_position,
                    "the exponent of the number has no digits",
                )
                .with_hint("write the exponent as e.g. 1e-3"),
            );
        }
        if text.parse::<f64>().is_ok_and(f64::is_infinite) {
            self.issues.push(Issue::error(
                ErrorCode::E0105,
                start,
                format!("the number '{text}' is out of range"),
            ));
        }
        SmolStr::new(text)
    }

    fn invalid_character(&mut self, start: Position, slice: &str) {
        let c = slice.chars().next().unwrap_or_default();
        self.issues.push(Issue::error(
            ErrorCode::E0101,
            start,
            format!("unexpected character '{}'", c.escape_default()),
        ));
    }
}

/// Iterates over significant tokens, ending with a single EOF token
impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        Some(self.next_token())
    }
}

/// Tokenize an entire string into a Vec, EOF included
pub fn tokenize(input: &str) -> Vec<Token> {
    Scanner::new(input).collect()
}
