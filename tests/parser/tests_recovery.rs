//! Error locality: one malformed statement gives one error and parsing
//! carries on with what follows

use cellml_text::document::NodeKind;
use cellml_text::parser::{ErrorCode, parse};
use rstest::rstest;

use crate::helpers::assertions::assert_single_error;

fn top_level_names(source: &str) -> Vec<String> {
    let document = parse(source).document.expect("a document");
    document
        .children(document.root())
        .iter()
        .map(|id| match &document[*id].kind {
            NodeKind::Component(component) => component.name.to_string(),
            other => other.display_name().to_string(),
        })
        .collect()
}

#[test]
fn test_component_reference_missing_endcomp() {
    let source = "def model m as
  def group as containment for
    comp a incl
      comp b;
  enddef;
  def comp c as enddef;
enddef;";
    let parse = parse(source);
    assert_single_error(&parse.issues, ErrorCode::E0202, 5, 3);
    assert!(parse.issues[0].message.contains("'endcomp'"));
    assert_eq!(top_level_names(source), vec!["group", "c"]);
}

#[test]
fn test_component_missing_enddef() {
    let source = "def model m as
  def comp a as
    var x: volt;
  def comp b as
  enddef;
enddef;";
    let parse = parse(source);
    assert_single_error(&parse.issues, ErrorCode::E0202, 4, 3);
    assert_eq!(top_level_names(source), vec!["a", "b"]);
}

#[rstest]
#[case("var x volt;", ErrorCode::E0902, (3, 11))]
#[case("var x: ;", ErrorCode::E0302, (3, 12))]
#[case("var x: volt", ErrorCode::E0201, (4, 3))]
#[case("var x: volt {pub: sideways};", ErrorCode::E0305, (3, 23))]
#[case("x = ;", ErrorCode::E0401, (3, 9))]
#[case("x = (y;", ErrorCode::E0902, (3, 11))]
#[case("x = y", ErrorCode::E0201, (4, 3))]
#[case("ode(x) = y;", ErrorCode::E0902, (3, 10))]
fn test_malformed_statement(
    #[case] statement: &str,
    #[case] code: ErrorCode,
    #[case] position: (usize, usize),
) {
    let (line, column) = position;
    let source = format!(
        "def model m as\n  def comp c as\n    {statement}\n  var ok: volt;\n  enddef;\n  def comp d as enddef;\nenddef;"
    );
    let parse = parse(&source);
    assert_single_error(&parse.issues, code, line, column);
    assert_eq!(top_level_names(&source), vec!["c", "d"]);
}

#[test]
fn test_header_error_skips_whole_definition() {
    let source = "def model m as
  def comp 42 as
    def unit u as base unit;
    var x: volt;
    x = sel case x > 0{volt}: x; endsel;
  enddef;
  def comp d as enddef;
enddef;";
    let parse = parse(source);
    assert_single_error(&parse.issues, ErrorCode::E0301, 2, 12);
    assert_eq!(top_level_names(source), vec!["d"]);
}

#[test]
fn test_broken_case_keeps_other_cases() {
    let source = "def model m as
  def comp c as
    y = sel
      case x > : 1{volt};
      case x < 0{volt}: 2{volt};
    endsel;
  enddef;
enddef;";
    let parse = parse(source);
    assert_single_error(&parse.issues, ErrorCode::E0401, 4, 16);
    let document = parse.document.unwrap();
    let equation = document
        .iter()
        .find_map(|(_, node)| match &node.kind {
            NodeKind::Equation(equation) => Some(equation.clone()),
            _ => None,
        })
        .expect("an equation");
    let cellml_text::document::Expr::Piecewise { pieces, .. } = equation.rhs else {
        panic!("expected a piecewise expression");
    };
    assert_eq!(pieces.len(), 1);
}

#[test]
fn test_stray_token_at_top_level() {
    let source = "def model m as
  var x: volt;
  def comp c as enddef;
enddef;";
    let parse = parse(source);
    assert_single_error(&parse.issues, ErrorCode::E0306, 2, 3);
    assert_eq!(top_level_names(source), vec!["c"]);
}

#[test]
fn test_missing_model_enddef_at_end_of_file() {
    let parse = parse("def model m as\n  def comp c as enddef;\n");
    assert_single_error(&parse.issues, ErrorCode::E0202, 3, 1);
}

#[test]
fn test_unterminated_string_on_header_line() {
    let source = r#"def model m as
  def import using "lib.cellml for
    comp cell using comp membrane;
  enddef;
  def comp after as enddef;
enddef;"#;
    let parse = parse(source);
    assert_single_error(&parse.issues, ErrorCode::E0102, 2, 20);
    assert_eq!(top_level_names(source), vec!["after"]);
}
