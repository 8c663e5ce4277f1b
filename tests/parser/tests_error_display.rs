//! How issues read once they reach a user.

use cellml_text::parser::{ErrorCode, Severity, SyntaxKind, kind_to_name, parse};
use rstest::rstest;

use crate::helpers::assertions::errors;

#[rstest]
#[case(SyntaxKind::ENDDEF_KW, "'enddef'")]
#[case(SyntaxKind::ENDSEL_KW, "'endsel'")]
#[case(SyntaxKind::SEMICOLON, "';'")]
#[case(SyntaxKind::IDENT, "an identifier")]
#[case(SyntaxKind::EOF, "the end of the file")]
fn test_kind_names(#[case] kind: SyntaxKind, #[case] expected: &str) {
    assert_eq!(kind_to_name(kind), expected);
}

#[rstest]
#[case(ErrorCode::E0102, "E0102", "unterminated string")]
#[case(ErrorCode::E0201, "E0201", "missing ';'")]
#[case(ErrorCode::E0403, "E0403", "comparisons cannot be chained")]
#[case(ErrorCode::W0101, "W0101", "number without units")]
fn test_code_strings(#[case] code: ErrorCode, #[case] text: &str, #[case] message: &str) {
    assert_eq!(code.as_str(), text);
    assert_eq!(code.to_string(), text);
    assert_eq!(code.default_message(), message);
}

#[test]
fn test_missing_semicolon_reads_naturally() {
    let source = "def model m as\n  def comp c as\n    var x: volt enddef;\nenddef;";
    let parse = parse(source);
    let errors = errors(&parse.issues);
    assert_eq!(errors.len(), 1, "{errors:#?}");
    assert_eq!(
        errors[0].to_string(),
        "[3:17] error: expected ';' but found 'enddef'"
    );
}

#[test]
fn test_warning_display() {
    let source = "def model m as\n  def comp c as\n    var x: volt;\n    x = 3;\n  enddef;\nenddef;";
    let parse = parse(source);
    assert!(!parse.has_errors());
    let warning = &parse.issues[0];
    assert_eq!(warning.severity, Severity::Warning);
    assert_eq!(warning.code, ErrorCode::W0101);
    assert!(warning.to_string().starts_with("[4:9] warning: "), "{warning}");
}
