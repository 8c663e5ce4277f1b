//! Parse context tracking for context-aware error messages
//!
//! Every block body the parser enters has a context. It names the block in
//! messages and decides which tokens start an item of that body, which is
//! also how a body notices that it ran into its enclosing block.

use crate::parser::SyntaxKind;

/// The block body currently being parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseContext {
    /// Between `def model ... as` and `enddef`
    ModelBody,
    /// Between `def import ... for` and `enddef`
    ImportBody,
    /// Between `def unit ... as` and `enddef`
    UnitsBody,
    /// Between `def comp ... as` and `enddef`
    ComponentBody,
    /// Between `def group ... for` and `enddef`
    GroupBody,
    /// Between `comp ... incl` and `endcomp`
    ComponentRefBody,
    /// Between `def map ... for` and `enddef`
    MapBody,
    /// Between `sel` and `endsel`
    Piecewise,
}

impl ParseContext {
    /// Get a human-readable description of this context for error messages
    pub fn description(&self) -> &'static str {
        match self {
            Self::ModelBody => "in model definition",
            Self::ImportBody => "in import definition",
            Self::UnitsBody => "in unit definition",
            Self::ComponentBody => "in component definition",
            Self::GroupBody => "in group definition",
            Self::ComponentRefBody => "in component reference",
            Self::MapBody => "in map definition",
            Self::Piecewise => "in piecewise expression",
        }
    }

    /// Get a description of what is expected in this context
    pub fn expected_description(&self) -> &'static str {
        match self {
            Self::ModelBody => "'def' or 'enddef'",
            Self::ImportBody => "'unit', 'comp' or 'enddef'",
            Self::UnitsBody => "'unit' or 'enddef'",
            Self::ComponentBody => "'def', 'var', an equation or 'enddef'",
            Self::GroupBody => "'comp' or 'enddef'",
            Self::ComponentRefBody => "'comp' or 'endcomp'",
            Self::MapBody => "'vars' or 'enddef'",
            Self::Piecewise => "'case', 'otherwise' or 'endsel'",
        }
    }

    /// The keyword closing a body of this context
    pub fn terminator(&self) -> SyntaxKind {
        match self {
            Self::ComponentRefBody => SyntaxKind::ENDCOMP_KW,
            Self::Piecewise => SyntaxKind::ENDSEL_KW,
            _ => SyntaxKind::ENDDEF_KW,
        }
    }

    /// Check if the token `kind`, followed by `next`, starts an item directly
    /// inside this context
    pub fn accepts(&self, kind: SyntaxKind, next: SyntaxKind) -> bool {
        match self {
            Self::ModelBody => {
                kind == SyntaxKind::DEF_KW
                    && matches!(
                        next,
                        SyntaxKind::IMPORT_KW
                            | SyntaxKind::UNIT_KW
                            | SyntaxKind::COMP_KW
                            | SyntaxKind::GROUP_KW
                            | SyntaxKind::MAP_KW
                    )
            }
            Self::ImportBody => matches!(kind, SyntaxKind::UNIT_KW | SyntaxKind::COMP_KW),
            Self::UnitsBody => kind == SyntaxKind::UNIT_KW,
            Self::ComponentBody => match kind {
                SyntaxKind::DEF_KW => next == SyntaxKind::UNIT_KW,
                SyntaxKind::VAR_KW => true,
                _ => crate::parser::grammar::starts_expression(kind),
            },
            Self::GroupBody | Self::ComponentRefBody => kind == SyntaxKind::COMP_KW,
            Self::MapBody => kind == SyntaxKind::VARS_KW,
            Self::Piecewise => matches!(kind, SyntaxKind::CASE_KW | SyntaxKind::OTHERWISE_KW),
        }
    }
}
