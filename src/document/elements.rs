//! Payloads carried by document nodes
//!
//! Numeric attributes (exponent, multiplier, offset, initial value) are kept
//! as the literal text they were written with.

use smol_str::SmolStr;

use super::math::Expr;

/// Root of every document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    pub name: SmolStr,
}

/// `def import using "href" for ... enddef;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub href: String,
}

/// `unit name using unit reference;` inside an import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportUnits {
    pub name: SmolStr,
    pub reference: SmolStr,
}

/// `comp name using comp reference;` inside an import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportComponent {
    pub name: SmolStr,
    pub reference: SmolStr,
}

/// A units definition, either a base unit or a product of [`Unit`] children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Units {
    pub name: SmolStr,
    pub base_units: bool,
}

/// Prefix of a unit, by SI name or as a power-of-ten factor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prefix {
    Named(SmolStr),
    Factor(SmolStr),
}

impl Prefix {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Factor(factor) => factor,
        }
    }
}

/// One element of a units definition
///
/// Absent parameters take their defaults: no prefix, exponent 1,
/// multiplier 1, offset 0.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Unit {
    pub units: SmolStr,
    pub prefix: Option<Prefix>,
    pub exponent: Option<SmolStr>,
    pub multiplier: Option<SmolStr>,
    pub offset: Option<SmolStr>,
}

impl Unit {
    pub fn new(units: impl Into<SmolStr>) -> Self {
        Self {
            units: units.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub name: SmolStr,
}

/// Direction of a variable interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interface {
    In,
    Out,
    None,
}

impl Interface {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::None => "none",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: SmolStr,
    pub units: SmolStr,
    /// A number, or the name of another variable
    pub initial_value: Option<SmolStr>,
    pub public_interface: Option<Interface>,
    pub private_interface: Option<Interface>,
}

impl Variable {
    pub fn new(name: impl Into<SmolStr>, units: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            units: units.into(),
            initial_value: None,
            public_interface: None,
            private_interface: None,
        }
    }

    /// Check if the initial value names a variable rather than a number
    pub fn has_variable_initial_value(&self) -> bool {
        self.initial_value.as_ref().is_some_and(|value| {
            value
                .chars()
                .next()
                .is_some_and(|c| c == '_' || c.is_alphabetic())
        })
    }
}

/// `lhs = rhs;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    pub lhs: Expr,
    pub rhs: Expr,
}

/// A group definition; its children are relationship and component references
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Group;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relationship {
    Containment,
    Encapsulation,
}

impl Relationship {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Containment => "containment",
            Self::Encapsulation => "encapsulation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipRef {
    pub relationship: Relationship,
    /// Only containment relationships can be named
    pub name: Option<SmolStr>,
}

/// `comp name;` or `comp name incl ... endcomp;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRef {
    pub component: SmolStr,
}

/// `def map between component_1 and component_2 for ... enddef;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub component_1: SmolStr,
    pub component_2: SmolStr,
}

/// `vars variable_1 and variable_2;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableMapping {
    pub variable_1: SmolStr,
    pub variable_2: SmolStr,
}
