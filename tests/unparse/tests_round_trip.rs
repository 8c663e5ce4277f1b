//! Parse, unparse and parse again.

use cellml_text::NodeKind;
use cellml_text::parser::parse;
use cellml_text::unparse::{UnparseOptions, to_text, to_text_with};
use rstest::rstest;

use crate::helpers::assertions::parse_ok;
use crate::helpers::fixtures::{EMPTY_MODEL, EXPRESSION_MODEL, MEMBRANE_MODEL};

#[rstest]
#[case::empty(EMPTY_MODEL)]
#[case::membrane(MEMBRANE_MODEL)]
#[case::expressions(EXPRESSION_MODEL)]
fn test_reparse_is_structurally_equal(#[case] source: &str) {
    let document = parse_ok(source);
    let text = to_text(&document);
    let reparsed = parse_ok(&text);
    assert!(document.structurally_eq(&reparsed), "{text}");
}

#[rstest]
#[case::membrane(MEMBRANE_MODEL)]
#[case::expressions(EXPRESSION_MODEL)]
fn test_unparse_is_idempotent(#[case] source: &str) {
    let first = to_text(&parse_ok(source));
    let second = to_text(&parse_ok(&first));
    assert_eq!(first, second);
}

#[test]
fn test_sections_are_reordered() {
    let source = "def model m as
  def map between a and b for
    vars x and y;
  enddef;
  def comp a as
    x = 1{volt};
    var x: volt;
  enddef;
  def unit mv as
    unit volt {pref: milli};
  enddef;
enddef;";
    let text = to_text(&parse_ok(source));
    let unit = text.find("def unit mv").unwrap();
    let comp = text.find("def comp a").unwrap();
    let map = text.find("def map").unwrap();
    assert!(unit < comp && comp < map, "{text}");
    assert!(text.find("var x").unwrap() < text.find("x = 1{volt}").unwrap());
}

#[test]
fn test_piecewise_layout() {
    let source = "def model m as def comp c as var x: volt; x = sel case x > 1{volt}: 1{volt}; otherwise: x; endsel; enddef; enddef;";
    let text = to_text(&parse_ok(source));
    assert!(
        text.contains(
            "    x = sel\n      case x > 1{volt}: 1{volt};\n      otherwise: x;\n    endsel;\n"
        ),
        "{text}"
    );
}

#[test]
fn test_parameters_survive() {
    let document = parse_ok(MEMBRANE_MODEL);
    let text = to_text(&document);
    assert!(text.contains("var V: mV {init: -75, pub: out};"), "{text}");
    assert!(text.contains("unit metre {pref: centi, expo: -2};"), "{text}");
    assert!(text.contains("def unit flux as base unit;"), "{text}");
    assert!(text.contains("def model {membrane_model} membrane_cell as"), "{text}");
}

#[test]
fn test_custom_layout() {
    let options = UnparseOptions {
        indent_width: 4,
        insert_spaces: true,
        blank_lines: false,
    };
    let source = "def model m as def comp c as var x: volt; var y: volt; x = y; enddef; enddef;";
    let text = to_text_with(&parse_ok(source), &options);
    assert_eq!(
        text,
        "def model m as\n    def comp c as\n        var x: volt;\n        var y: volt;\n        x = y;\n    enddef;\nenddef;\n"
    );
}

#[test]
fn test_document_with_errors_still_unparses() {
    let source = "def model m as
  def comp c as
    var x: volt;
    var : volt;
  enddef;
enddef;";
    let parse = parse(source);
    assert!(parse.has_errors());
    let document = parse.document.unwrap();
    let variables = document
        .iter()
        .filter(|(_, node)| matches!(node.kind, NodeKind::Variable(_)))
        .count();
    assert_eq!(variables, 1);
    assert!(to_text(&document).contains("var x: volt;"));
}

#[rstest]
#[case::offset("off")]
#[case::prefix("kilo")]
#[case::direction("in")]
fn test_initial_value_spelled_like_parameter_keyword(#[case] name: &str) {
    let source = format!(
        "def model m as
  def comp c as
    var {name}: volt;
    var x: volt {{init: {name}, pub: out}};
  enddef;
enddef;"
    );
    let document = parse_ok(&source);
    let text = to_text(&document);
    assert!(text.contains(&format!("{{init: {name}, pub: out}}")), "{text}");
    let reparsed = parse_ok(&text);
    assert!(document.structurally_eq(&reparsed), "{text}");
}
