//! Parse helpers and issue assertions.

use cellml_text::document::Document;
use cellml_text::parser::{ErrorCode, Issue, parse};

/// Parse a source that must be free of errors.
pub fn parse_ok(source: &str) -> Document {
    let parse = parse(source);
    assert_no_errors(&parse.issues);
    parse.document.expect("a document")
}

/// Only the error-severity issues.
pub fn errors(issues: &[Issue]) -> Vec<&Issue> {
    issues.iter().filter(|issue| issue.is_error()).collect()
}

/// Assert that a list of issues has no errors.
pub fn assert_no_errors(issues: &[Issue]) {
    let errors = errors(issues);
    assert!(
        errors.is_empty(),
        "Expected no errors, got {} error(s):\n{}",
        errors.len(),
        errors
            .iter()
            .map(|issue| format!("  {issue}"))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Assert exactly one error with the given code at the given position.
pub fn assert_single_error(issues: &[Issue], code: ErrorCode, line: usize, column: usize) {
    let errors = errors(issues);
    assert_eq!(errors.len(), 1, "Expected one error, got {errors:#?}");
    assert_eq!(errors[0].code, code, "{}", errors[0]);
    assert_eq!(
        (errors[0].line(), errors[0].column()),
        (line, column),
        "{}",
        errors[0]
    );
}
