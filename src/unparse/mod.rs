//! Document to model text
//!
//! Walks a [`Document`] depth first and writes one statement per node, in
//! canonical order: imports, units, components (units, variables, then
//! equations), groups and maps. Layout comes from [`UnparseOptions`] and
//! never from the text a document was parsed from.
//!
//! ```ignore
//! use cellml_text::unparse::to_text;
//!
//! let text = to_text(&document);
//! ```

mod options;

pub use options::UnparseOptions;

use std::fmt::Write;

use crate::document::{Document, Expr, Literal, NodeId, NodeKind, Piece, Unit, UnaryOp, Variable};

/// Unparse a document with the default options
pub fn to_text(document: &Document) -> String {
    to_text_with(document, &UnparseOptions::default())
}

/// Unparse a document
pub fn to_text_with(document: &Document, options: &UnparseOptions) -> String {
    let mut unparser = Unparser::new(document, options);
    unparser.unparse_model();
    unparser.output
}

/// Render a single expression on one level of indentation
pub fn expression_to_text(expr: &Expr) -> String {
    ExpressionWriter {
        options: &UnparseOptions::default(),
    }
    .expression(expr, 0)
}

struct Unparser<'a> {
    document: &'a Document,
    options: &'a UnparseOptions,
    output: String,
    indent_level: usize,
}

impl<'a> Unparser<'a> {
    fn new(document: &'a Document, options: &'a UnparseOptions) -> Self {
        Self {
            document,
            options,
            output: String::new(),
            indent_level: 0,
        }
    }

    fn write_line(&mut self, text: &str) {
        let indent = self.options.indent(self.indent_level);
        let _ = writeln!(self.output, "{}{}", indent, text);
    }

    fn write_blank_line(&mut self) {
        if self.options.blank_lines {
            let _ = writeln!(self.output);
        }
    }

    fn unparse_model(&mut self) {
        let root = self.document.root();
        let cmeta = self.cmeta(root);
        self.write_line(&format!(
            "def model {}{} as",
            cmeta,
            self.document.model_name()
        ));

        self.indent_level += 1;
        let children = self.document.canonical_children(root);
        for (index, child) in children.iter().enumerate() {
            if index > 0 {
                self.write_blank_line();
            }
            self.unparse_node(*child);
        }
        self.indent_level -= 1;

        self.write_line("enddef;");
    }

    /// Write the children of a block, separating canonical sections with a
    /// blank line
    fn unparse_body(&mut self, id: NodeId) {
        self.indent_level += 1;
        let mut section = None;
        for child in self.document.canonical_children(id) {
            let child_section = self.document[child].kind.section();
            if section.is_some_and(|previous| previous != child_section) {
                self.write_blank_line();
            }
            section = Some(child_section);
            self.unparse_node(child);
        }
        self.indent_level -= 1;
    }

    fn unparse_node(&mut self, id: NodeId) {
        let document = self.document;
        let cmeta = self.cmeta(id);
        match &document[id].kind {
            NodeKind::Model(_) => {}
            NodeKind::Import(import) => {
                self.write_line(&format!(
                    "def import {}using {} for",
                    cmeta,
                    quote(&import.href)
                ));
                self.unparse_body(id);
                self.write_line("enddef;");
            }
            NodeKind::ImportUnits(units) => {
                self.write_line(&format!(
                    "unit {}{} using unit {};",
                    cmeta, units.name, units.reference
                ));
            }
            NodeKind::ImportComponent(component) => {
                self.write_line(&format!(
                    "comp {}{} using comp {};",
                    cmeta, component.name, component.reference
                ));
            }
            NodeKind::Units(units) => {
                if units.base_units {
                    self.write_line(&format!("def unit {}{} as base unit;", cmeta, units.name));
                } else {
                    self.write_line(&format!("def unit {}{} as", cmeta, units.name));
                    self.unparse_body(id);
                    self.write_line("enddef;");
                }
            }
            NodeKind::Unit(unit) => {
                self.write_line(&format!("unit {}{}{};", cmeta, unit.units, unit_parameters(unit)));
            }
            NodeKind::Component(component) => {
                self.write_line(&format!("def comp {}{} as", cmeta, component.name));
                self.unparse_body(id);
                self.write_line("enddef;");
            }
            NodeKind::Variable(variable) => {
                self.write_line(&format!(
                    "var {}{}: {}{};",
                    cmeta,
                    variable.name,
                    variable.units,
                    variable_parameters(variable)
                ));
            }
            NodeKind::Equation(equation) => {
                let writer = ExpressionWriter {
                    options: self.options,
                };
                let lhs = writer.expression(&equation.lhs, self.indent_level);
                let rhs = writer.expression(&equation.rhs, self.indent_level);
                self.write_line(&format!("{lhs} = {rhs};"));
            }
            NodeKind::Group(_) => self.unparse_group(id, &cmeta),
            // Written as part of the group header
            NodeKind::RelationshipRef(_) => {}
            NodeKind::ComponentRef(reference) => {
                if document.children(id).is_empty() {
                    self.write_line(&format!("comp {}{};", cmeta, reference.component));
                } else {
                    self.write_line(&format!("comp {}{} incl", cmeta, reference.component));
                    self.unparse_body(id);
                    self.write_line("endcomp;");
                }
            }
            NodeKind::Connection(connection) => {
                self.write_line(&format!(
                    "def map {}between {} and {} for",
                    cmeta, connection.component_1, connection.component_2
                ));
                self.unparse_body(id);
                self.write_line("enddef;");
            }
            NodeKind::VariableMapping(mapping) => {
                self.write_line(&format!(
                    "vars {}{} and {};",
                    cmeta, mapping.variable_1, mapping.variable_2
                ));
            }
        }
    }

    fn unparse_group(&mut self, id: NodeId, cmeta: &str) {
        let relationships: Vec<String> = self
            .document
            .children(id)
            .iter()
            .filter_map(|child| match &self.document[*child].kind {
                NodeKind::RelationshipRef(relationship) => Some(match &relationship.name {
                    Some(name) => format!("{} {}", relationship.relationship.keyword(), name),
                    None => relationship.relationship.keyword().to_string(),
                }),
                _ => None,
            })
            .collect();

        self.write_line(&format!(
            "def group {}as {} for",
            cmeta,
            relationships.join(" and ")
        ));
        self.indent_level += 1;
        for child in self.document.canonical_children(id) {
            self.unparse_node(child);
        }
        self.indent_level -= 1;
        self.write_line("enddef;");
    }

    /// `{id} ` when the node has a cmeta id, otherwise empty
    fn cmeta(&self, id: NodeId) -> String {
        match &self.document[id].cmeta_id {
            Some(cmeta_id) => format!("{{{cmeta_id}}} "),
            None => String::new(),
        }
    }
}

fn unit_parameters(unit: &Unit) -> String {
    let mut parameters = Vec::new();
    if let Some(prefix) = &unit.prefix {
        parameters.push(format!("pref: {}", prefix.as_str()));
    }
    if let Some(exponent) = &unit.exponent {
        parameters.push(format!("expo: {exponent}"));
    }
    if let Some(multiplier) = &unit.multiplier {
        parameters.push(format!("mult: {multiplier}"));
    }
    if let Some(offset) = &unit.offset {
        parameters.push(format!("off: {offset}"));
    }
    parameter_block(&parameters)
}

fn variable_parameters(variable: &Variable) -> String {
    let mut parameters = Vec::new();
    if let Some(value) = &variable.initial_value {
        parameters.push(format!("init: {value}"));
    }
    if let Some(interface) = variable.public_interface {
        parameters.push(format!("pub: {}", interface.keyword()));
    }
    if let Some(interface) = variable.private_interface {
        parameters.push(format!("priv: {}", interface.keyword()));
    }
    parameter_block(&parameters)
}

fn parameter_block(parameters: &[String]) -> String {
    if parameters.is_empty() {
        String::new()
    } else {
        format!(" {{{}}}", parameters.join(", "))
    }
}

/// Quote a string with `"`, escaping `"` and `\`
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

struct ExpressionWriter<'a> {
    options: &'a UnparseOptions,
}

impl ExpressionWriter<'_> {
    /// Render an expression whose first line sits at `level`
    fn expression(&self, expr: &Expr, level: usize) -> String {
        match expr {
            Expr::Number(literal) => literal_text(literal),
            Expr::Constant(constant) => constant.keyword().to_string(),
            Expr::Identifier(name) => name.to_string(),
            Expr::Unary { op, operand } => {
                let operand_text = self.expression(operand, level);
                let wrap = operand.precedence() < UnaryOp::PRECEDENCE;
                let operand_text = parenthesize(operand_text, wrap);
                // `- -a`, not `--a`
                let separator = if *op != UnaryOp::Not && operand_text.starts_with(['-', '+']) {
                    " "
                } else {
                    ""
                };
                format!("{}{separator}{operand_text}", op.symbol())
            }
            Expr::Binary { op, lhs, rhs } => {
                let precedence = op.precedence();
                let wrap_lhs = lhs.precedence() < precedence
                    || (op.is_comparison() && lhs.precedence() == precedence);
                let wrap_rhs = rhs.precedence() <= precedence;
                format!(
                    "{} {} {}",
                    parenthesize(self.expression(lhs, level), wrap_lhs),
                    op.symbol(),
                    parenthesize(self.expression(rhs, level), wrap_rhs)
                )
            }
            Expr::Call { function, args } => {
                let args: Vec<String> = args.iter().map(|arg| self.expression(arg, level)).collect();
                format!("{}({})", function.name(), args.join(", "))
            }
            Expr::Derivative {
                variable,
                bvar,
                order,
            } => match order {
                Some(order) => format!("ode({}, {}, {})", variable, bvar, literal_text(order)),
                None => format!("ode({variable}, {bvar})"),
            },
            Expr::Piecewise { pieces, otherwise } => {
                self.piecewise(pieces, otherwise.as_deref(), level)
            }
        }
    }

    /// ```text
    /// sel
    ///   case condition: value;
    ///   otherwise: value;
    /// endsel
    /// ```
    fn piecewise(
        &self,
        pieces: &[Piece],
        otherwise: Option<&Expr>,
        level: usize,
    ) -> String {
        let inner = self.options.indent(level + 1);
        let mut text = String::from("sel\n");
        for piece in pieces {
            let _ = writeln!(
                text,
                "{}case {}: {};",
                inner,
                self.expression(&piece.condition, level + 1),
                self.expression(&piece.value, level + 1)
            );
        }
        if let Some(value) = otherwise {
            let _ = writeln!(
                text,
                "{}otherwise: {};",
                inner,
                self.expression(value, level + 1)
            );
        }
        text.push_str(&self.options.indent(level));
        text.push_str("endsel");
        text
    }
}

fn literal_text(literal: &Literal) -> String {
    match &literal.units {
        Some(units) => format!("{}{{{}}}", literal.value, units),
        None => literal.value.to_string(),
    }
}

fn parenthesize(text: String, wrap: bool) -> String {
    if wrap { format!("({text})") } else { text }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{BinaryOp, Component, Constant, Equation, Function, Model, Prefix, Units};
    use rstest::rstest;

    fn id(name: &str) -> Expr {
        Expr::identifier(name)
    }

    #[test]
    fn test_empty_model() {
        let document = Document::new(Model { name: "m".into() });
        assert_eq!(to_text(&document), "def model m as\nenddef;\n");
    }

    #[test]
    fn test_canonical_order_and_blank_lines() {
        let mut document = Document::new(Model { name: "m".into() });
        let root = document.root();
        let comp = document.add_child(root, Component { name: "c".into() });
        document.add_child(comp, Variable::new("x", "volt"));
        document.add_child(
            comp,
            Equation {
                lhs: id("x"),
                rhs: Expr::number("1", "volt"),
            },
        );
        document.add_child(comp, Variable::new("y", "volt"));
        document.add_child(
            root,
            Units {
                name: "mV".into(),
                base_units: true,
            },
        );

        let expected = "\
def model m as
  def unit mV as base unit;

  def comp c as
    var x: volt;
    var y: volt;

    x = 1{volt};
  enddef;
enddef;
";
        assert_eq!(to_text(&document), expected);
    }

    #[test]
    fn test_parameter_blocks_only_carry_present_values() {
        let mut unit = Unit::new("metre");
        unit.prefix = Some(Prefix::Named("kilo".into()));
        unit.exponent = Some("2".into());
        assert_eq!(unit_parameters(&unit), " {pref: kilo, expo: 2}");
        assert_eq!(unit_parameters(&Unit::new("metre")), "");

        let mut variable = Variable::new("v", "volt");
        variable.initial_value = Some("-84.5".into());
        variable.private_interface = Some(crate::document::Interface::In);
        assert_eq!(variable_parameters(&variable), " {init: -84.5, priv: in}");
    }

    #[rstest]
    #[case(Expr::binary(BinaryOp::Plus, id("a"), Expr::binary(BinaryOp::Times, id("b"), id("c"))), "a + b * c")]
    #[case(Expr::binary(BinaryOp::Times, Expr::binary(BinaryOp::Plus, id("a"), id("b")), id("c")), "(a + b) * c")]
    #[case(Expr::binary(BinaryOp::Minus, id("a"), Expr::binary(BinaryOp::Minus, id("b"), id("c"))), "a - (b - c)")]
    #[case(Expr::binary(BinaryOp::Minus, Expr::binary(BinaryOp::Minus, id("a"), id("b")), id("c")), "a - b - c")]
    #[case(Expr::unary(UnaryOp::Minus, Expr::binary(BinaryOp::Plus, id("a"), id("b"))), "-(a + b)")]
    #[case(Expr::unary(UnaryOp::Not, id("a")), "not a")]
    #[case(Expr::unary(UnaryOp::Minus, Expr::unary(UnaryOp::Minus, id("a"))), "- -a")]
    #[case(Expr::unary(UnaryOp::Minus, Expr::unary(UnaryOp::Plus, id("a"))), "- +a")]
    #[case(Expr::unary(UnaryOp::Not, Expr::unary(UnaryOp::Minus, id("a"))), "not -a")]
    #[case(Expr::binary(BinaryOp::And, Expr::binary(BinaryOp::Lt, id("a"), id("b")), Expr::binary(BinaryOp::Gt, id("c"), id("d"))), "a < b and c > d")]
    #[case(Expr::binary(BinaryOp::Eq, Expr::binary(BinaryOp::Lt, id("a"), id("b")), Expr::Constant(Constant::True)), "(a < b) == true")]
    #[case(Expr::call(Function::Pow, vec![id("x"), Expr::number("2", "dimensionless")]), "pow(x, 2{dimensionless})")]
    fn test_minimal_parentheses(#[case] expr: Expr, #[case] expected: &str) {
        assert_eq!(expression_to_text(&expr), expected);
    }

    #[test]
    fn test_piecewise_layout() {
        let expr = Expr::Piecewise {
            pieces: vec![Piece {
                condition: Expr::binary(BinaryOp::Gt, id("x"), Expr::number("0", "volt")),
                value: id("x"),
            }],
            otherwise: Some(Box::new(Expr::number("0", "volt"))),
        };
        assert_eq!(
            expression_to_text(&expr),
            "sel\n  case x > 0{volt}: x;\n  otherwise: 0{volt};\nendsel"
        );
    }

    #[test]
    fn test_derivative_with_order() {
        let expr = Expr::Derivative {
            variable: "x".into(),
            bvar: "t".into(),
            order: Some(Literal::new("2", Some("dimensionless".into()))),
        };
        assert_eq!(expression_to_text(&expr), "ode(x, t, 2{dimensionless})");
    }

    #[rstest]
    #[case("plain", "\"plain\"")]
    #[case("say \"hi\"", "\"say \\\"hi\\\"\"")]
    #[case("a\\b", "\"a\\\\b\"")]
    fn test_quote(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(quote(value), expected);
    }

    #[test]
    fn test_word_operators_are_spaced() {
        for op in [BinaryOp::And, BinaryOp::Or, BinaryOp::Xor] {
            let text = expression_to_text(&Expr::binary(op, id("a"), id("b")));
            assert_eq!(text, format!("a {} b", op.symbol()));
        }
    }
}
