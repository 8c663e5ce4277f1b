//! Scanner totality and context-sensitive keywords

use cellml_text::parser::{ErrorCode, Scanner, SyntaxKind, tokenize};
use rstest::rstest;

const PIECES: &[&str] = &[
    "def", " ", "model", "\n", "as", "enddef", ";", "{", "}", "/*", "*/", "//", "\"", "'", "1.5",
    "e", "e+", "2", ".", "@", "#", "mult", "pref", "a_b", "x-y", "\r\n", "\t", "<", ">", "=",
    "sel", "é", "\\", ",", ":", "(", ")",
];

/// Deterministic pseudo-random inputs built from interesting fragments
fn generated_inputs() -> Vec<String> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    (0..300)
        .map(|_| {
            let length = (next() % 40) as usize;
            (0..length)
                .map(|_| PIECES[(next() % PIECES.len() as u64) as usize])
                .collect()
        })
        .collect()
}

#[test]
fn test_scanner_always_reaches_eof() {
    for input in generated_inputs() {
        let mut scanner = Scanner::new(&input);
        let mut calls = 0;
        let mut previous_end = 0usize;
        loop {
            let token = scanner.next_raw_token();
            calls += 1;
            assert!(
                calls <= input.len() + 1,
                "too many tokens for {input:?}"
            );
            let start = u32::from(token.span.start.offset) as usize;
            assert!(start >= previous_end, "tokens overlap in {input:?}");
            assert!(
                input[previous_end..start].chars().all(char::is_whitespace),
                "unexpected gap {:?} in {input:?}",
                &input[previous_end..start]
            );
            previous_end = u32::from(token.span.end.offset) as usize;
            if token.kind == SyntaxKind::EOF {
                break;
            }
        }
        assert_eq!(scanner.next_raw_token().kind, SyntaxKind::EOF);
    }
}

#[test]
fn test_gaps_between_tokens_are_whitespace() {
    let input = "def model m as /* note */ def comp c as\n  var x: volt {init: 1.5e-3};\n  // done\nenddef; enddef;";
    let mut scanner = Scanner::new(input);
    let mut previous_end = 0usize;
    loop {
        let token = scanner.next_raw_token();
        let start = u32::from(token.span.start.offset) as usize;
        assert!(
            input[previous_end..start].chars().all(char::is_whitespace),
            "unexpected gap {:?}",
            &input[previous_end..start]
        );
        previous_end = u32::from(token.span.end.offset) as usize;
        if token.kind == SyntaxKind::EOF {
            break;
        }
    }
    assert!(scanner.take_issues().is_empty());
}

#[test]
fn test_iterator_yields_single_eof() {
    let tokens = tokenize("def model m as enddef;");
    let eof_count = tokens.iter().filter(|t| t.kind == SyntaxKind::EOF).count();
    assert_eq!(eof_count, 1);
    assert_eq!(tokens.last().map(|t| t.kind), Some(SyntaxKind::EOF));
}

#[rstest]
#[case("mult", SyntaxKind::IDENT)]
#[case("{mult}", SyntaxKind::MULT_KW)]
#[case("{{mult}}", SyntaxKind::MULT_KW)]
#[case("{a {b} mult}", SyntaxKind::MULT_KW)]
#[case("{a} mult", SyntaxKind::IDENT)]
#[case("{{a}} mult", SyntaxKind::IDENT)]
fn test_mult_is_context_sensitive(#[case] input: &str, #[case] expected: SyntaxKind) {
    let tokens = tokenize(input);
    let mult = tokens
        .iter()
        .find(|t| t.text == "mult")
        .expect("a mult token");
    assert_eq!(mult.kind, expected);
}

#[test]
fn test_parameter_mode_flips_back_and_forth() {
    let kinds: Vec<SyntaxKind> = tokenize("pref {pref: kilo} pref kilo")
        .iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::IDENT,
            SyntaxKind::L_BRACE,
            SyntaxKind::PREF_KW,
            SyntaxKind::COLON,
            SyntaxKind::KILO_KW,
            SyntaxKind::R_BRACE,
            SyntaxKind::IDENT,
            SyntaxKind::IDENT,
            SyntaxKind::EOF,
        ]
    );
}

#[rstest]
#[case("/* outer /* inner */ still outer */", 0)]
#[case("/* a /* b /* c */ b */ a */", 0)]
#[case("/* outer /* inner */ never closed", 1)]
#[case("/* /* */", 1)]
fn test_nested_comments(#[case] input: &str, #[case] errors: usize) {
    let mut scanner = Scanner::new(input);
    while scanner.next_token().kind != SyntaxKind::EOF {}
    let issues = scanner.take_issues();
    assert_eq!(issues.len(), errors, "{issues:?}");
    assert!(issues.iter().all(|issue| issue.code == ErrorCode::E0103));
}

#[test]
fn test_comments_attach_to_next_token() {
    let tokens = tokenize("// first\n/* second */ def");
    assert_eq!(tokens[0].kind, SyntaxKind::DEF_KW);
    let comment = tokens[0].comment.as_deref().unwrap_or_default();
    assert!(comment.contains("first"));
    assert!(comment.contains("second"));
}
