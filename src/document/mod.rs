//! The structured document built by the parser and read by the unparser
//!
//! Nodes live in an arena owned by the [`Document`]. A node owns its
//! children through their [`NodeId`]s and knows its parent through a plain
//! index, so the tree has no ownership cycles.
//!
//! ```text
//! Model
//! ├── Import ── ImportUnits / ImportComponent
//! ├── Units ── Unit
//! ├── Component ── Units / Variable / Equation
//! ├── Group ── RelationshipRef / ComponentRef ── ComponentRef ...
//! └── Connection ── VariableMapping
//! ```
//!
//! Names are stored verbatim and never checked for uniqueness.

mod elements;
mod math;

use std::ops::{Index, IndexMut};

use smol_str::SmolStr;

use crate::base::Span;

pub use elements::{
    Component, ComponentRef, Connection, Equation, Group, Import, ImportComponent, ImportUnits,
    Interface, Model, Prefix, Relationship, RelationshipRef, Unit, Units, Variable,
    VariableMapping,
};
pub use math::{Arity, BinaryOp, Constant, Expr, Function, Literal, Piece, UnaryOp};

/// Index of a node inside its document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Typed payload of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Model(Model),
    Import(Import),
    ImportUnits(ImportUnits),
    ImportComponent(ImportComponent),
    Units(Units),
    Unit(Unit),
    Component(Component),
    Variable(Variable),
    Equation(Equation),
    Group(Group),
    RelationshipRef(RelationshipRef),
    ComponentRef(ComponentRef),
    Connection(Connection),
    VariableMapping(VariableMapping),
}

macro_rules! node_kind_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for NodeKind {
                fn from(value: $variant) -> Self {
                    NodeKind::$variant(value)
                }
            }
        )*
    };
}

node_kind_from!(
    Model,
    Import,
    ImportUnits,
    ImportComponent,
    Units,
    Unit,
    Component,
    Variable,
    Equation,
    Group,
    RelationshipRef,
    ComponentRef,
    Connection,
    VariableMapping
);

impl NodeKind {
    /// Lowercase name of the node type, e.g. `"component"`
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Model(_) => "model",
            Self::Import(_) => "import",
            Self::ImportUnits(_) => "imported units",
            Self::ImportComponent(_) => "imported component",
            Self::Units(_) => "units",
            Self::Unit(_) => "unit",
            Self::Component(_) => "component",
            Self::Variable(_) => "variable",
            Self::Equation(_) => "equation",
            Self::Group(_) => "group",
            Self::RelationshipRef(_) => "relationship reference",
            Self::ComponentRef(_) => "component reference",
            Self::Connection(_) => "connection",
            Self::VariableMapping(_) => "variable mapping",
        }
    }

    /// Declared name, for nodes that have one
    pub fn name(&self) -> Option<&SmolStr> {
        match self {
            Self::Model(model) => Some(&model.name),
            Self::ImportUnits(units) => Some(&units.name),
            Self::ImportComponent(component) => Some(&component.name),
            Self::Units(units) => Some(&units.name),
            Self::Component(component) => Some(&component.name),
            Self::Variable(variable) => Some(&variable.name),
            _ => None,
        }
    }

    /// Position of this node's section in the canonical output order
    ///
    /// Siblings in different sections have no meaningful relative order;
    /// siblings in the same section keep theirs.
    pub fn section(&self) -> u8 {
        match self {
            Self::Model(_)
            | Self::Import(_)
            | Self::ImportUnits(_)
            | Self::ImportComponent(_)
            | Self::Unit(_)
            | Self::RelationshipRef(_)
            | Self::VariableMapping(_) => 0,
            Self::Units(_) | Self::ComponentRef(_) => 1,
            Self::Component(_) => 2,
            Self::Variable(_) => 3,
            Self::Equation(_) => 4,
            Self::Group(_) => 5,
            Self::Connection(_) => 6,
        }
    }
}

/// A node of the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub cmeta_id: Option<SmolStr>,
    /// Source location, for nodes that came from the parser
    pub span: Option<Span>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            cmeta_id: None,
            span: None,
            parent,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Minimal CellML version able to express a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CellmlVersion {
    V1_0,
    V1_1,
}

impl CellmlVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V1_0 => "1.0",
            Self::V1_1 => "1.1",
        }
    }
}

/// A CellML model as a tree of typed nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Create a document holding only its model node
    pub fn new(model: Model) -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Model(model), None)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn model_name(&self) -> &str {
        self[self.root()]
            .kind
            .name()
            .map(SmolStr::as_str)
            .unwrap_or_default()
    }

    /// Append a child to `parent` and return its id
    pub fn add_child(&mut self, parent: NodeId, kind: impl Into<NodeKind>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(kind.into(), Some(parent)));
        self.nodes[parent.index()].children.push(id);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self[id].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self[id].parent
    }

    /// Children of `id` in canonical section order
    pub fn canonical_children(&self, id: NodeId) -> Vec<NodeId> {
        let mut children = self[id].children.clone();
        children.sort_by_key(|child| self[*child].kind.section());
        children
    }

    /// All nodes below `id`, depth first, in insertion order
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self[id].children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            result.push(next);
            stack.extend(self[next].children.iter().rev().copied());
        }
        result
    }

    /// Iterate over every node with its id
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index as u32), node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Direct children of the model that are components
    pub fn components(&self) -> impl Iterator<Item = (NodeId, &Component)> {
        self.children(self.root())
            .iter()
            .filter_map(|&id| match &self[id].kind {
                NodeKind::Component(component) => Some((id, component)),
                _ => None,
            })
    }

    /// CellML 1.1 is needed for imports and for initial values that name
    /// a variable; anything else fits in 1.0
    pub fn version(&self) -> CellmlVersion {
        let needs_1_1 = self.nodes.iter().any(|node| match &node.kind {
            NodeKind::Import(_) => true,
            NodeKind::Variable(variable) => variable.has_variable_initial_value(),
            _ => false,
        });
        if needs_1_1 {
            CellmlVersion::V1_1
        } else {
            CellmlVersion::V1_0
        }
    }

    /// Compare two documents ignoring source spans and the relative order of
    /// siblings that belong to different canonical sections
    pub fn structurally_eq(&self, other: &Document) -> bool {
        self.subtree_eq(self.root(), other, other.root())
    }

    fn subtree_eq(&self, id: NodeId, other: &Document, other_id: NodeId) -> bool {
        let (node, other_node) = (&self[id], &other[other_id]);
        if node.kind != other_node.kind || node.cmeta_id != other_node.cmeta_id {
            return false;
        }
        let children = self.canonical_children(id);
        let other_children = other.canonical_children(other_id);
        children.len() == other_children.len()
            && children
                .iter()
                .zip(&other_children)
                .all(|(&child, &other_child)| self.subtree_eq(child, other, other_child))
    }
}

impl Index<NodeId> for Document {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

impl IndexMut<NodeId> for Document {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut document = Document::new(Model { name: "m".into() });
        let root = document.root();
        let component = document.add_child(root, Component { name: "c".into() });
        document.add_child(component, Variable::new("x", "dimensionless"));
        document.add_child(
            component,
            Equation {
                lhs: Expr::identifier("x"),
                rhs: Expr::number("1", "dimensionless"),
            },
        );
        document.add_child(
            root,
            Units {
                name: "u".into(),
                base_units: true,
            },
        );
        document
    }

    #[test]
    fn test_parent_links() {
        let document = sample();
        let component = document.children(document.root())[0];
        let variable = document.children(component)[0];
        assert_eq!(document.parent(variable), Some(component));
        assert_eq!(document.parent(component), Some(document.root()));
        assert_eq!(document.parent(document.root()), None);
        assert_eq!(document.model_name(), "m");
        assert_eq!(document.descendants(document.root()).len(), 4);
    }

    #[test]
    fn test_canonical_children_put_units_first() {
        let document = sample();
        let children = document.canonical_children(document.root());
        assert!(matches!(document[children[0]].kind, NodeKind::Units(_)));
        assert!(matches!(document[children[1]].kind, NodeKind::Component(_)));
    }

    #[test]
    fn test_structural_equality_ignores_section_order_and_spans() {
        let mut reordered = Document::new(Model { name: "m".into() });
        let root = reordered.root();
        reordered.add_child(
            root,
            Units {
                name: "u".into(),
                base_units: true,
            },
        );
        let component = reordered.add_child(root, Component { name: "c".into() });
        reordered[component].span = Some(Span::default());
        reordered.add_child(component, Variable::new("x", "dimensionless"));
        reordered.add_child(
            component,
            Equation {
                lhs: Expr::identifier("x"),
                rhs: Expr::number("1", "dimensionless"),
            },
        );

        assert!(sample().structurally_eq(&reordered));

        reordered[component].cmeta_id = Some("c1".into());
        assert!(!sample().structurally_eq(&reordered));
    }

    #[test]
    fn test_version() {
        let mut document = sample();
        assert_eq!(document.version(), CellmlVersion::V1_0);
        let root = document.root();
        document.add_child(
            root,
            Import {
                href: "other.cellml".into(),
            },
        );
        assert_eq!(document.version(), CellmlVersion::V1_1);
    }
}
