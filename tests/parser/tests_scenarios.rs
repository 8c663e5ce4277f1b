//! End-to-end parsing of well-formed and slightly broken models

use cellml_text::document::{
    BinaryOp, CellmlVersion, Document, Expr, Interface, NodeId, NodeKind, Prefix, Relationship,
};
use cellml_text::parser::{ErrorCode, Severity, parse};

use crate::helpers::assertions::{assert_single_error, errors, parse_ok};
use crate::helpers::fixtures::{EMPTY_MODEL, EXPRESSION_MODEL, MEMBRANE_MODEL};

fn find(document: &Document, name: &str) -> NodeId {
    document
        .iter()
        .find(|(_, node)| node.kind.name().is_some_and(|n| n == name))
        .map(|(id, _)| id)
        .unwrap_or_else(|| panic!("no node named {name}"))
}

fn equations(document: &Document, component: &str) -> Vec<(Expr, Expr)> {
    let id = find(document, component);
    document
        .children(id)
        .iter()
        .filter_map(|child| match &document[*child].kind {
            NodeKind::Equation(equation) => Some((equation.lhs.clone(), equation.rhs.clone())),
            _ => None,
        })
        .collect()
}

#[test]
fn test_empty_model() {
    let parse = parse(EMPTY_MODEL);
    assert!(parse.issues.is_empty());
    let document = parse.document.unwrap();
    assert_eq!(document.len(), 1);
    assert_eq!(document.model_name(), "m");
    assert!(matches!(document[document.root()].kind, NodeKind::Model(_)));
}

#[test]
fn test_unit_element_parameters() {
    let document = parse_ok(
        "def model m as
           def unit u as
             unit u2 {pref: kilo, expo: 2};
           enddef;
         enddef;",
    );
    let units = find(&document, "u");
    let children = document.children(units);
    assert_eq!(children.len(), 1);

    let NodeKind::Unit(unit) = &document[children[0]].kind else {
        panic!("expected a unit element");
    };
    assert_eq!(unit.units, "u2");
    assert_eq!(unit.prefix, Some(Prefix::Named("kilo".into())));
    assert_eq!(unit.exponent.as_deref(), Some("2"));
    assert_eq!(unit.multiplier, None);
    assert_eq!(unit.offset, None);
}

#[test]
fn test_numeric_prefix_and_signed_values() {
    let document = parse_ok(
        "def model m as
           def unit fahrenheit as
             unit celsius {pref: -3, mult: 1.8, off: +32};
           enddef;
         enddef;",
    );
    let units = find(&document, "fahrenheit");
    let NodeKind::Unit(unit) = &document[document.children(units)[0]].kind else {
        panic!("expected a unit element");
    };
    assert_eq!(unit.prefix, Some(Prefix::Factor("-3".into())));
    assert_eq!(unit.multiplier.as_deref(), Some("1.8"));
    assert_eq!(unit.offset.as_deref(), Some("32"));
}

#[test]
fn test_unterminated_string_keeps_surrounding_constructs() {
    let source = r#"def model m as
  def comp before as
    var x: volt;
  enddef;
  def import using "lib.cellml
  for
    comp cell using comp membrane;
  enddef;
  def comp after as
    var y: volt;
  enddef;
enddef;"#;
    let parse = parse(source);
    assert_single_error(&parse.issues, ErrorCode::E0102, 5, 20);

    let document = parse.document.unwrap();
    let kinds: Vec<&str> = document
        .children(document.root())
        .iter()
        .map(|id| document[*id].kind.display_name())
        .collect();
    assert_eq!(kinds, vec!["component", "import", "component"]);
    find(&document, "after");
    find(&document, "cell");
}

#[test]
fn test_membrane_model() {
    let document = parse_ok(MEMBRANE_MODEL);
    assert_eq!(document.model_name(), "membrane_cell");
    assert_eq!(
        document[document.root()].cmeta_id.as_deref(),
        Some("membrane_model")
    );
    assert_eq!(document.version(), CellmlVersion::V1_1);

    let names: Vec<&str> = document
        .components()
        .map(|(_, component)| component.name.as_str())
        .collect();
    assert_eq!(names, vec!["environment", "membrane"]);

    let voltage = find(&document, "V");
    let NodeKind::Variable(variable) = &document[voltage].kind else {
        panic!("expected a variable");
    };
    assert_eq!(variable.initial_value.as_deref(), Some("-75"));
    assert_eq!(variable.public_interface, Some(Interface::Out));
    assert_eq!(variable.private_interface, None);

    let flux = find(&document, "flux");
    assert!(matches!(&document[flux].kind, NodeKind::Units(units) if units.base_units));

    assert_eq!(equations(&document, "membrane").len(), 2);
}

#[test]
fn test_group_hierarchy() {
    let document = parse_ok(MEMBRANE_MODEL);
    let (group, _) = document
        .iter()
        .find(|(_, node)| matches!(node.kind, NodeKind::Group(_)))
        .unwrap();
    let children = document.children(group);
    let NodeKind::RelationshipRef(relationship) = &document[children[0]].kind else {
        panic!("expected a relationship reference");
    };
    assert_eq!(relationship.relationship, Relationship::Encapsulation);

    let NodeKind::ComponentRef(outer) = &document[children[1]].kind else {
        panic!("expected a component reference");
    };
    assert_eq!(outer.component, "membrane");
    assert_eq!(document.children(children[1]).len(), 1);
    assert_eq!(document.parent(children[1]), Some(group));
}

#[test]
fn test_expression_precedence() {
    let document = parse_ok(EXPRESSION_MODEL);
    let equations = equations(&document, "c");
    assert_eq!(equations.len(), 4);

    // x - (y - t) * x / (t + y)
    let Expr::Binary { op, rhs, .. } = &equations[3].1 else {
        panic!("expected a binary expression");
    };
    assert_eq!(*op, BinaryOp::Minus);
    assert!(matches!(**rhs, Expr::Binary { op: BinaryOp::Divide, .. }));

    // x == y xor true
    assert!(matches!(&equations[2].1, Expr::Binary { op: BinaryOp::Xor, .. }));

    let Expr::Derivative { order, .. } = &equations[1].0 else {
        panic!("expected a derivative");
    };
    assert_eq!(order.as_ref().map(|o| o.value.as_str()), Some("2"));

    let Expr::Piecewise { pieces, otherwise } = &equations[0].1 else {
        panic!("expected a piecewise expression");
    };
    assert_eq!(pieces.len(), 2);
    assert!(otherwise.is_some());
}

#[test]
fn test_number_without_units_is_a_warning() {
    let parse = parse("def model m as def comp c as var x: volt; x = 2; enddef; enddef;");
    assert!(errors(&parse.issues).is_empty());
    assert_eq!(parse.issues.len(), 1);
    assert_eq!(parse.issues[0].severity, Severity::Warning);
    assert_eq!(parse.issues[0].code, ErrorCode::W0101);
    assert!(parse.document.is_some());
}

#[test]
fn test_duplicate_names_are_not_reported() {
    let document = parse_ok(
        "def model m as
           def comp c as var x: volt; var x: volt; enddef;
           def comp c as enddef;
         enddef;",
    );
    assert_eq!(document.components().count(), 2);
}

#[test]
fn test_chained_comparison_is_an_error() {
    let parse = parse("def model m as def comp c as\n x = a < b < c;\n enddef; enddef;");
    assert_single_error(&parse.issues, ErrorCode::E0403, 2, 12);
}

#[test]
fn test_wrong_argument_count() {
    let parse = parse("def model m as def comp c as\n x = pow(x);\n enddef; enddef;");
    assert_single_error(&parse.issues, ErrorCode::E0402, 2, 6);
    assert_eq!(equations(parse.document.as_ref().unwrap(), "c").len(), 1);
}

#[test]
fn test_duplicate_parameter() {
    let parse = parse("def model m as def comp c as\n var x: volt {init: 1, init: 2};\n enddef; enddef;");
    assert_single_error(&parse.issues, ErrorCode::E0304, 2, 24);
    let document = parse.document.unwrap();
    let NodeKind::Variable(variable) = &document[find(&document, "x")].kind else {
        panic!("expected a variable");
    };
    assert_eq!(variable.initial_value.as_deref(), Some("1"));
}

#[test]
fn test_parameter_not_allowed_here() {
    let parse = parse("def model m as def comp c as\n var x: volt {expo: 2};\n enddef; enddef;");
    assert_single_error(&parse.issues, ErrorCode::E0303, 2, 15);
}

#[test]
fn test_empty_piecewise() {
    let parse = parse("def model m as def comp c as\n x = sel endsel;\n enddef; enddef;");
    assert_single_error(&parse.issues, ErrorCode::E0404, 2, 6);
}
