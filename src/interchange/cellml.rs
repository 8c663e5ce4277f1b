//! CellML XML export.
//!
//! Writes a [`Document`] as CellML 1.0 or 1.1, whichever its content needs.
//! Equations become MathML content markup, one `<math>` element per
//! component.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <model xmlns="http://www.cellml.org/cellml/1.0#"
//!        xmlns:cellml="http://www.cellml.org/cellml/1.0#" name="m">
//!   <component name="c">
//!     <variable name="x" units="volt" initial_value="0"/>
//!     <math xmlns="http://www.w3.org/1998/Math/MathML">
//!       <apply><eq/><ci>x</ci><cn cellml:units="volt">1</cn></apply>
//!     </math>
//!   </component>
//! </model>
//! ```

use std::io::Cursor;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::{DocumentFormat, FormatCapability, InterchangeError};
use crate::document::{
    BinaryOp, CellmlVersion, Constant, Document, Expr, Function, Literal, NodeId, NodeKind,
    UnaryOp,
};

/// Namespace URIs used by CellML documents.
pub mod namespace {
    /// CellML 1.0 namespace.
    pub const CELLML_1_0: &str = "http://www.cellml.org/cellml/1.0#";
    /// CellML 1.1 namespace.
    pub const CELLML_1_1: &str = "http://www.cellml.org/cellml/1.1#";
    /// CellML metadata namespace (for `cmeta:id`).
    pub const CMETA: &str = "http://www.cellml.org/metadata/1.0#";
    /// MathML namespace.
    pub const MATHML: &str = "http://www.w3.org/1998/Math/MathML";
    /// XLink namespace (for import `xlink:href`).
    pub const XLINK: &str = "http://www.w3.org/1999/xlink";
}

/// CellML XML format handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellmlXml;

impl DocumentFormat for CellmlXml {
    fn name(&self) -> &'static str {
        "CellML"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["cellml", "xml"]
    }

    fn mime_type(&self) -> &'static str {
        "application/cellml+xml"
    }

    fn capabilities(&self) -> FormatCapability {
        FormatCapability::WRITE_ONLY
    }

    fn write(&self, document: &Document) -> Result<Vec<u8>, InterchangeError> {
        let mut buffer = Cursor::new(Vec::new());
        CellmlWriter {
            writer: Writer::new_with_indent(&mut buffer, b' ', 2),
            document,
        }
        .write()?;

        let mut output = buffer.into_inner();
        output.push(b'\n');
        Ok(output)
    }
}

fn write_error(error: impl std::fmt::Display) -> InterchangeError {
    InterchangeError::xml(format!("Write error: {error}"))
}

struct CellmlWriter<'a, W: std::io::Write> {
    writer: Writer<W>,
    document: &'a Document,
}

impl<W: std::io::Write> CellmlWriter<'_, W> {
    fn write(&mut self) -> Result<(), InterchangeError> {
        self.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let document = self.document;
        let root = document.root();
        let cellml_namespace = match document.version() {
            CellmlVersion::V1_0 => namespace::CELLML_1_0,
            CellmlVersion::V1_1 => namespace::CELLML_1_1,
        };

        let mut model = BytesStart::new("model");
        model.push_attribute(("xmlns", cellml_namespace));
        model.push_attribute(("xmlns:cellml", cellml_namespace));
        if has_cmeta_ids(document) {
            model.push_attribute(("xmlns:cmeta", namespace::CMETA));
        }
        model.push_attribute(("name", document.model_name()));
        self.push_cmeta_id(&mut model, root);

        let children = document.canonical_children(root);
        if children.is_empty() {
            return self.event(Event::Empty(model));
        }
        self.event(Event::Start(model))?;
        for child in children {
            self.write_node(child)?;
        }
        self.event(Event::End(BytesEnd::new("model")))
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), InterchangeError> {
        self.writer.write_event(event).map_err(write_error)
    }

    fn push_cmeta_id(&self, start: &mut BytesStart<'_>, id: NodeId) {
        if let Some(cmeta_id) = &self.document[id].cmeta_id {
            start.push_attribute(("cmeta:id", cmeta_id.as_str()));
        }
    }

    /// Write `start` as an empty element, or wrap the children of `id`
    fn write_element(&mut self, start: BytesStart<'_>, id: NodeId) -> Result<(), InterchangeError> {
        let children = self.document.canonical_children(id);
        if children.is_empty() {
            return self.event(Event::Empty(start));
        }
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        self.event(Event::Start(start))?;
        for child in children {
            self.write_node(child)?;
        }
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn write_node(&mut self, id: NodeId) -> Result<(), InterchangeError> {
        let document = self.document;
        match &document[id].kind {
            NodeKind::Model(_) => Err(InterchangeError::invalid_node("nested model")),
            NodeKind::Import(import) => {
                let mut start = BytesStart::new("import");
                start.push_attribute(("xmlns:xlink", namespace::XLINK));
                start.push_attribute(("xlink:href", import.href.as_str()));
                self.push_cmeta_id(&mut start, id);
                self.write_element(start, id)
            }
            NodeKind::ImportUnits(units) => {
                let mut start = BytesStart::new("units");
                start.push_attribute(("name", units.name.as_str()));
                start.push_attribute(("units_ref", units.reference.as_str()));
                self.push_cmeta_id(&mut start, id);
                self.event(Event::Empty(start))
            }
            NodeKind::ImportComponent(component) => {
                let mut start = BytesStart::new("component");
                start.push_attribute(("name", component.name.as_str()));
                start.push_attribute(("component_ref", component.reference.as_str()));
                self.push_cmeta_id(&mut start, id);
                self.event(Event::Empty(start))
            }
            NodeKind::Units(units) => {
                let mut start = BytesStart::new("units");
                start.push_attribute(("name", units.name.as_str()));
                if units.base_units {
                    start.push_attribute(("base_units", "yes"));
                }
                self.push_cmeta_id(&mut start, id);
                self.write_element(start, id)
            }
            NodeKind::Unit(unit) => {
                let mut start = BytesStart::new("unit");
                start.push_attribute(("units", unit.units.as_str()));
                if let Some(prefix) = &unit.prefix {
                    start.push_attribute(("prefix", prefix.as_str()));
                }
                if let Some(exponent) = &unit.exponent {
                    start.push_attribute(("exponent", exponent.as_str()));
                }
                if let Some(multiplier) = &unit.multiplier {
                    start.push_attribute(("multiplier", multiplier.as_str()));
                }
                if let Some(offset) = &unit.offset {
                    start.push_attribute(("offset", offset.as_str()));
                }
                self.push_cmeta_id(&mut start, id);
                self.event(Event::Empty(start))
            }
            NodeKind::Component(component) => {
                let mut start = BytesStart::new("component");
                start.push_attribute(("name", component.name.as_str()));
                self.push_cmeta_id(&mut start, id);
                self.write_component(start, id)
            }
            NodeKind::Variable(variable) => {
                let mut start = BytesStart::new("variable");
                start.push_attribute(("name", variable.name.as_str()));
                start.push_attribute(("units", variable.units.as_str()));
                if let Some(value) = &variable.initial_value {
                    start.push_attribute(("initial_value", value.as_str()));
                }
                if let Some(interface) = variable.public_interface {
                    start.push_attribute(("public_interface", interface.keyword()));
                }
                if let Some(interface) = variable.private_interface {
                    start.push_attribute(("private_interface", interface.keyword()));
                }
                self.push_cmeta_id(&mut start, id);
                self.event(Event::Empty(start))
            }
            // Written inside the component's <math> element
            NodeKind::Equation(_) => Ok(()),
            NodeKind::Group(_) => {
                let mut start = BytesStart::new("group");
                self.push_cmeta_id(&mut start, id);
                self.write_element(start, id)
            }
            NodeKind::RelationshipRef(relationship) => {
                let mut start = BytesStart::new("relationship_ref");
                start.push_attribute(("relationship", relationship.relationship.keyword()));
                if let Some(name) = &relationship.name {
                    start.push_attribute(("name", name.as_str()));
                }
                self.event(Event::Empty(start))
            }
            NodeKind::ComponentRef(reference) => {
                let mut start = BytesStart::new("component_ref");
                start.push_attribute(("component", reference.component.as_str()));
                self.push_cmeta_id(&mut start, id);
                self.write_element(start, id)
            }
            NodeKind::Connection(connection) => {
                let mut start = BytesStart::new("connection");
                self.push_cmeta_id(&mut start, id);
                self.event(Event::Start(start))?;

                let mut components = BytesStart::new("map_components");
                components.push_attribute(("component_1", connection.component_1.as_str()));
                components.push_attribute(("component_2", connection.component_2.as_str()));
                self.event(Event::Empty(components))?;

                for child in document.children(id) {
                    self.write_node(*child)?;
                }
                self.event(Event::End(BytesEnd::new("connection")))
            }
            NodeKind::VariableMapping(mapping) => {
                let mut start = BytesStart::new("map_variables");
                start.push_attribute(("variable_1", mapping.variable_1.as_str()));
                start.push_attribute(("variable_2", mapping.variable_2.as_str()));
                self.push_cmeta_id(&mut start, id);
                self.event(Event::Empty(start))
            }
        }
    }

    fn write_component(&mut self, start: BytesStart<'_>, id: NodeId) -> Result<(), InterchangeError> {
        let document = self.document;
        let children = document.canonical_children(id);
        if children.is_empty() {
            return self.event(Event::Empty(start));
        }
        self.event(Event::Start(start))?;

        let mut equations = Vec::new();
        for child in children {
            match &document[child].kind {
                NodeKind::Equation(equation) => equations.push(equation),
                _ => self.write_node(child)?,
            }
        }

        if !equations.is_empty() {
            let mut math = BytesStart::new("math");
            math.push_attribute(("xmlns", namespace::MATHML));
            self.event(Event::Start(math))?;
            for equation in equations {
                self.start("apply")?;
                self.empty("eq")?;
                self.write_expr(&equation.lhs)?;
                self.write_expr(&equation.rhs)?;
                self.end("apply")?;
            }
            self.event(Event::End(BytesEnd::new("math")))?;
        }

        self.event(Event::End(BytesEnd::new("component")))
    }

    // =========================================================================
    // MathML
    // =========================================================================

    fn start(&mut self, name: &str) -> Result<(), InterchangeError> {
        self.event(Event::Start(BytesStart::new(name)))
    }

    fn end(&mut self, name: &str) -> Result<(), InterchangeError> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn empty(&mut self, name: &str) -> Result<(), InterchangeError> {
        self.event(Event::Empty(BytesStart::new(name)))
    }

    fn text_element(&mut self, name: &str, text: &str) -> Result<(), InterchangeError> {
        self.start(name)?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    fn write_expr(&mut self, expr: &Expr) -> Result<(), InterchangeError> {
        match expr {
            Expr::Number(literal) => self.write_number(literal),
            Expr::Constant(constant) => self.empty(constant_element(*constant)),
            Expr::Identifier(name) => self.text_element("ci", name),
            Expr::Unary { op, operand } => {
                self.start("apply")?;
                self.empty(unary_element(*op))?;
                self.write_expr(operand)?;
                self.end("apply")
            }
            Expr::Binary { op, lhs, rhs } => {
                self.start("apply")?;
                self.empty(binary_element(*op))?;
                self.write_expr(lhs)?;
                self.write_expr(rhs)?;
                self.end("apply")
            }
            Expr::Call { function, args } => self.write_call(*function, args),
            Expr::Derivative {
                variable,
                bvar,
                order,
            } => {
                self.start("apply")?;
                self.empty("diff")?;
                self.start("bvar")?;
                self.text_element("ci", bvar)?;
                if let Some(order) = order {
                    self.start("degree")?;
                    self.write_number(order)?;
                    self.end("degree")?;
                }
                self.end("bvar")?;
                self.text_element("ci", variable)?;
                self.end("apply")
            }
            Expr::Piecewise { pieces, otherwise } => {
                self.start("piecewise")?;
                for piece in pieces {
                    self.start("piece")?;
                    self.write_expr(&piece.value)?;
                    self.write_expr(&piece.condition)?;
                    self.end("piece")?;
                }
                if let Some(value) = otherwise {
                    self.start("otherwise")?;
                    self.write_expr(value)?;
                    self.end("otherwise")?;
                }
                self.end("piecewise")
            }
        }
    }

    /// `<cn cellml:units="u">1.5</cn>`, with `e-notation` for exponents
    fn write_number(&mut self, literal: &Literal) -> Result<(), InterchangeError> {
        let mut start = BytesStart::new("cn");
        if let Some(units) = &literal.units {
            start.push_attribute(("cellml:units", units.as_str()));
        }

        match literal.value.split_once(['e', 'E']) {
            Some((mantissa, exponent)) => {
                start.push_attribute(("type", "e-notation"));
                self.event(Event::Start(start))?;
                self.event(Event::Text(BytesText::new(mantissa)))?;
                self.empty("sep")?;
                self.event(Event::Text(BytesText::new(exponent)))?;
            }
            None => {
                self.event(Event::Start(start))?;
                self.event(Event::Text(BytesText::new(&literal.value)))?;
            }
        }
        self.end("cn")
    }

    fn write_call(&mut self, function: Function, args: &[Expr]) -> Result<(), InterchangeError> {
        self.start("apply")?;
        match (function, args) {
            (Function::Sqr, [base]) => {
                self.empty("power")?;
                self.write_expr(base)?;
                self.write_number(&Literal::new("2", Some("dimensionless".into())))?;
            }
            (Function::Log, [argument, base]) => {
                self.empty("log")?;
                self.start("logbase")?;
                self.write_expr(base)?;
                self.end("logbase")?;
                self.write_expr(argument)?;
            }
            (Function::Root, [argument, degree]) => {
                self.empty("root")?;
                self.start("degree")?;
                self.write_expr(degree)?;
                self.end("degree")?;
                self.write_expr(argument)?;
            }
            _ => {
                self.empty(function_element(function))?;
                for arg in args {
                    self.write_expr(arg)?;
                }
            }
        }
        self.end("apply")
    }
}

fn has_cmeta_ids(document: &Document) -> bool {
    document.iter().any(|(_, node)| node.cmeta_id.is_some())
}

fn constant_element(constant: Constant) -> &'static str {
    match constant {
        Constant::True => "true",
        Constant::False => "false",
        Constant::NaN => "notanumber",
        Constant::Pi => "pi",
        Constant::Infinity => "infinity",
        Constant::E => "exponentiale",
    }
}

fn unary_element(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Minus => "minus",
        UnaryOp::Plus => "plus",
        UnaryOp::Not => "not",
    }
}

fn binary_element(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Or => "or",
        BinaryOp::Xor => "xor",
        BinaryOp::And => "and",
        BinaryOp::Eq => "eq",
        BinaryOp::Neq => "neq",
        BinaryOp::Lt => "lt",
        BinaryOp::Leq => "leq",
        BinaryOp::Gt => "gt",
        BinaryOp::Geq => "geq",
        BinaryOp::Plus => "plus",
        BinaryOp::Minus => "minus",
        BinaryOp::Times => "times",
        BinaryOp::Divide => "divide",
    }
}

/// MathML operator element of a function
fn function_element(function: Function) -> &'static str {
    match function {
        Function::Ceil => "ceiling",
        Function::Fact => "factorial",
        Function::Sqrt => "root",
        Function::Pow => "power",
        Function::Asin => "arcsin",
        Function::Acos => "arccos",
        Function::Atan => "arctan",
        Function::Asec => "arcsec",
        Function::Acsc => "arccsc",
        Function::Acot => "arccot",
        Function::Asinh => "arcsinh",
        Function::Acosh => "arccosh",
        Function::Atanh => "arctanh",
        Function::Asech => "arcsech",
        Function::Acsch => "arccsch",
        Function::Acoth => "arccoth",
        Function::Sqr => "power",
        other => other.name(),
    }
}
