//! Model and definition parsing
//!
//! ```text
//! model     = 'def' 'model' cmeta? NAME 'as' model_item* 'enddef' ';'
//! import    = 'def' 'import' cmeta? 'using' STRING 'for' import_item* 'enddef' ';'
//! units     = 'def' 'unit' cmeta? NAME 'as' ('base' 'unit' ';' | unit_elem* 'enddef' ';')
//! component = 'def' 'comp' cmeta? NAME 'as' (units | variable | equation)* 'enddef' ';'
//! group     = 'def' 'group' cmeta? 'as' relationship ('and' relationship)* 'for'
//!             comp_ref* 'enddef' ';'
//! map       = 'def' 'map' cmeta? 'between' NAME 'and' NAME 'for' var_map* 'enddef' ';'
//! ```
//!
//! Recovery: a statement that fails is skipped up to its `;`; a definition
//! whose header fails is skipped up to its matching `enddef`. A body that
//! runs into something belonging to an enclosing block is closed implicitly
//! with a single error.

use smol_str::SmolStr;

use super::expressions::parse_expression;
use super::parameters::{parse_cmeta_id, parse_unit_parameters, parse_variable_parameters};
use super::{ModelParser, PResult, expected_message, is_unit_name};
use crate::base::{Position, Span};
use crate::document::{
    Component, ComponentRef, Connection, Equation, Group, Import, ImportComponent, ImportUnits,
    Model, NodeId, NodeKind, Relationship, RelationshipRef, Unit, Units, Variable,
    VariableMapping,
};
use crate::parser::errors::{ErrorCode, ParseContext};
use crate::parser::syntax_kind::{SyntaxKind, kind_to_name};

/// Parse a complete model definition
///
/// Fails only when the `def model NAME` header cannot be read, in which case
/// no document is created.
pub fn parse_model<P: ModelParser>(p: &mut P) -> PResult<()> {
    let start = p.current_position();
    p.expect(SyntaxKind::DEF_KW)?;
    p.expect(SyntaxKind::MODEL_KW)?;
    let cmeta_id = parse_cmeta_id(p)?;
    let name = p.expect(SyntaxKind::IDENT)?.text;

    let root = p.begin_model(Model { name });
    p.document()[root].cmeta_id = cmeta_id;

    // A missing `as` is reported; the body is still read
    let _ = p.expect(SyntaxKind::AS_KW);

    parse_body(p, ParseContext::ModelBody, root, parse_model_item);
    finish_node(p, root, start);

    if !p.at(SyntaxKind::EOF) {
        let message = format!(
            "{} but found {}",
            ErrorCode::E0203.default_message(),
            super::describe(p.current())
        );
        p.error(ErrorCode::E0203, message);
    }

    Ok(())
}

/// Parse the items of a block body up to its terminator
fn parse_body<P: ModelParser>(
    p: &mut P,
    context: ParseContext,
    parent: NodeId,
    item: fn(&mut P, NodeId) -> PResult<()>,
) {
    p.enter(context);
    loop {
        let kind = p.current_kind();

        if kind == context.terminator() {
            p.bump();
            let _ = p.expect(SyntaxKind::SEMICOLON);
            break;
        }

        if context.accepts(kind, p.peek_kind()) {
            if item(p, parent).is_err() {
                p.recover(0);
            }
            continue;
        }

        if kind == SyntaxKind::EOF || p.at_enclosing_item() {
            let message = expected_message(kind_to_name(context.terminator()), p.current());
            p.error(ErrorCode::E0202, message);
            break;
        }

        let message = format!(
            "{} {}",
            expected_message(context.expected_description(), p.current()),
            context.description()
        );
        p.error(ErrorCode::E0306, message);
        skip_unexpected(p);
    }
    p.leave();
}

/// Skip a token that starts nothing in the current body
fn skip_unexpected<P: ModelParser>(p: &mut P) {
    match p.current_kind() {
        SyntaxKind::DEF_KW | SyntaxKind::INCL_KW | SyntaxKind::SEL_KW => {
            p.bump();
            p.recover(1);
        }
        SyntaxKind::SEMICOLON => {
            p.bump();
        }
        SyntaxKind::ENDDEF_KW | SyntaxKind::ENDCOMP_KW | SyntaxKind::ENDSEL_KW => {
            p.bump();
            p.eat(SyntaxKind::SEMICOLON);
        }
        _ => {
            p.bump();
            p.recover(0);
        }
    }
}

fn add_node<P: ModelParser>(
    p: &mut P,
    parent: NodeId,
    kind: impl Into<NodeKind>,
    cmeta_id: Option<SmolStr>,
    start: Position,
) -> NodeId {
    let end = p.last_end();
    let document = p.document();
    let id = document.add_child(parent, kind);
    document[id].cmeta_id = cmeta_id;
    document[id].span = Some(Span::new(start, end));
    id
}

fn finish_node<P: ModelParser>(p: &mut P, id: NodeId, start: Position) {
    let end = p.last_end();
    p.document()[id].span = Some(Span::new(start, end));
}

/// Read a definition header; on failure skip the whole definition
fn header<P: ModelParser, T>(p: &mut P, parse: impl FnOnce(&mut P) -> PResult<T>) -> Option<T> {
    match parse(p) {
        Ok(value) => Some(value),
        Err(_) => {
            p.recover(1);
            None
        }
    }
}

fn parse_unit_name<P: ModelParser>(p: &mut P) -> PResult<SmolStr> {
    if is_unit_name(p.current_kind()) {
        return Ok(p.bump().text);
    }
    let message = expected_message("a unit name", p.current());
    Err(p.error(ErrorCode::E0302, message))
}

// =============================================================================
// Model items
// =============================================================================

fn parse_model_item<P: ModelParser>(p: &mut P, parent: NodeId) -> PResult<()> {
    let start = p.current_position();
    p.bump(); // def
    match p.current_kind() {
        SyntaxKind::IMPORT_KW => parse_import(p, parent, start),
        SyntaxKind::UNIT_KW => parse_units(p, parent, start),
        SyntaxKind::COMP_KW => parse_component(p, parent, start),
        SyntaxKind::GROUP_KW => parse_group(p, parent, start),
        _ => parse_map(p, parent, start),
    }
}

fn parse_import<P: ModelParser>(p: &mut P, parent: NodeId, start: Position) -> PResult<()> {
    p.bump(); // import
    let Some((cmeta_id, href)) = header(p, |p| {
        let cmeta_id = parse_cmeta_id(p)?;
        p.expect(SyntaxKind::USING_KW)?;
        let href = p.expect(SyntaxKind::STRING)?.text;
        p.expect(SyntaxKind::FOR_KW)?;
        Ok((cmeta_id, href))
    }) else {
        return Ok(());
    };

    let id = add_node(
        p,
        parent,
        Import {
            href: href.to_string(),
        },
        cmeta_id,
        start,
    );
    parse_body(p, ParseContext::ImportBody, id, parse_import_item);
    finish_node(p, id, start);
    Ok(())
}

/// `unit name using unit reference;` or `comp name using comp reference;`
fn parse_import_item<P: ModelParser>(p: &mut P, parent: NodeId) -> PResult<()> {
    let start = p.current_position();
    let keyword = p.bump().kind;
    let cmeta_id = parse_cmeta_id(p)?;
    let name = p.expect(SyntaxKind::IDENT)?.text;
    p.expect(SyntaxKind::USING_KW)?;
    p.expect(keyword)?;
    let reference = if keyword == SyntaxKind::UNIT_KW {
        parse_unit_name(p)?
    } else {
        p.expect(SyntaxKind::IDENT)?.text
    };
    p.expect(SyntaxKind::SEMICOLON)?;

    if keyword == SyntaxKind::UNIT_KW {
        add_node(p, parent, ImportUnits { name, reference }, cmeta_id, start);
    } else {
        add_node(p, parent, ImportComponent { name, reference }, cmeta_id, start);
    }
    Ok(())
}

fn parse_units<P: ModelParser>(p: &mut P, parent: NodeId, start: Position) -> PResult<()> {
    p.bump(); // unit
    let Some((cmeta_id, name)) = header(p, |p| {
        let cmeta_id = parse_cmeta_id(p)?;
        let name = p.expect(SyntaxKind::IDENT)?.text;
        p.expect(SyntaxKind::AS_KW)?;
        Ok((cmeta_id, name))
    }) else {
        return Ok(());
    };

    if p.eat(SyntaxKind::BASE_KW) {
        p.expect(SyntaxKind::UNIT_KW)?;
        p.expect(SyntaxKind::SEMICOLON)?;
        let units = Units {
            name,
            base_units: true,
        };
        add_node(p, parent, units, cmeta_id, start);
        return Ok(());
    }

    let units = Units {
        name,
        base_units: false,
    };
    let id = add_node(p, parent, units, cmeta_id, start);
    parse_body(p, ParseContext::UnitsBody, id, parse_unit_element);
    finish_node(p, id, start);
    Ok(())
}

/// `unit cmeta? UNIT_NAME {pref: ..., expo: ..., mult: ..., off: ...}?;`
fn parse_unit_element<P: ModelParser>(p: &mut P, parent: NodeId) -> PResult<()> {
    let start = p.current_position();
    p.bump(); // unit
    let cmeta_id = parse_cmeta_id(p)?;
    let mut unit = Unit::new(parse_unit_name(p)?);
    if p.at(SyntaxKind::L_BRACE) {
        parse_unit_parameters(p, &mut unit)?;
    }
    p.expect(SyntaxKind::SEMICOLON)?;
    add_node(p, parent, unit, cmeta_id, start);
    Ok(())
}

fn parse_component<P: ModelParser>(p: &mut P, parent: NodeId, start: Position) -> PResult<()> {
    p.bump(); // comp
    let Some((cmeta_id, name)) = header(p, |p| {
        let cmeta_id = parse_cmeta_id(p)?;
        let name = p.expect(SyntaxKind::IDENT)?.text;
        p.expect(SyntaxKind::AS_KW)?;
        Ok((cmeta_id, name))
    }) else {
        return Ok(());
    };

    let id = add_node(p, parent, Component { name }, cmeta_id, start);
    parse_body(p, ParseContext::ComponentBody, id, parse_component_item);
    finish_node(p, id, start);
    Ok(())
}

fn parse_component_item<P: ModelParser>(p: &mut P, parent: NodeId) -> PResult<()> {
    let start = p.current_position();
    match p.current_kind() {
        SyntaxKind::DEF_KW => {
            p.bump();
            parse_units(p, parent, start)
        }
        SyntaxKind::VAR_KW => parse_variable(p, parent, start),
        _ => parse_equation(p, parent, start),
    }
}

/// `var cmeta? NAME ':' UNIT_NAME {init: ..., pub: ..., priv: ...}?;`
fn parse_variable<P: ModelParser>(p: &mut P, parent: NodeId, start: Position) -> PResult<()> {
    p.bump(); // var
    let cmeta_id = parse_cmeta_id(p)?;
    let name = p.expect(SyntaxKind::IDENT)?.text;
    p.expect(SyntaxKind::COLON)?;
    let mut variable = Variable::new(name, parse_unit_name(p)?);
    if p.at(SyntaxKind::L_BRACE) {
        parse_variable_parameters(p, &mut variable)?;
    }
    p.expect(SyntaxKind::SEMICOLON)?;
    add_node(p, parent, variable, cmeta_id, start);
    Ok(())
}

fn parse_equation<P: ModelParser>(p: &mut P, parent: NodeId, start: Position) -> PResult<()> {
    let lhs = parse_expression(p)?;
    p.expect(SyntaxKind::EQ)?;
    let rhs = parse_expression(p)?;
    p.expect(SyntaxKind::SEMICOLON)?;
    add_node(p, parent, Equation { lhs, rhs }, None, start);
    Ok(())
}

fn parse_group<P: ModelParser>(p: &mut P, parent: NodeId, start: Position) -> PResult<()> {
    p.bump(); // group
    let Some((cmeta_id, relationships)) = header(p, |p| {
        let cmeta_id = parse_cmeta_id(p)?;
        p.expect(SyntaxKind::AS_KW)?;
        let mut relationships = vec![parse_relationship(p)?];
        while p.eat(SyntaxKind::AND_KW) {
            relationships.push(parse_relationship(p)?);
        }
        p.expect(SyntaxKind::FOR_KW)?;
        Ok((cmeta_id, relationships))
    }) else {
        return Ok(());
    };

    let id = add_node(p, parent, Group, cmeta_id, start);
    for relationship in relationships {
        p.document().add_child(id, relationship);
    }
    parse_body(p, ParseContext::GroupBody, id, parse_component_ref);
    finish_node(p, id, start);
    Ok(())
}

/// `containment NAME?` or `encapsulation`
fn parse_relationship<P: ModelParser>(p: &mut P) -> PResult<RelationshipRef> {
    match p.current_kind() {
        SyntaxKind::CONTAINMENT_KW => {
            p.bump();
            let name = if p.at(SyntaxKind::IDENT) {
                Some(p.bump().text)
            } else {
                None
            };
            Ok(RelationshipRef {
                relationship: Relationship::Containment,
                name,
            })
        }
        SyntaxKind::ENCAPSULATION_KW => {
            p.bump();
            Ok(RelationshipRef {
                relationship: Relationship::Encapsulation,
                name: None,
            })
        }
        _ => {
            let message = expected_message("'containment' or 'encapsulation'", p.current());
            Err(p.error(ErrorCode::E0902, message))
        }
    }
}

/// `comp NAME;` or `comp NAME incl comp_ref+ endcomp;`
fn parse_component_ref<P: ModelParser>(p: &mut P, parent: NodeId) -> PResult<()> {
    let start = p.current_position();
    p.bump(); // comp
    let cmeta_id = parse_cmeta_id(p)?;
    let component = p.expect(SyntaxKind::IDENT)?.text;

    match p.current_kind() {
        SyntaxKind::SEMICOLON => {
            p.bump();
            add_node(p, parent, ComponentRef { component }, cmeta_id, start);
            Ok(())
        }
        SyntaxKind::INCL_KW => {
            p.bump();
            let id = add_node(p, parent, ComponentRef { component }, cmeta_id, start);
            parse_body(p, ParseContext::ComponentRefBody, id, parse_component_ref);
            finish_node(p, id, start);
            Ok(())
        }
        _ => {
            let message = expected_message("';' or 'incl'", p.current());
            Err(p.error(ErrorCode::E0201, message))
        }
    }
}

fn parse_map<P: ModelParser>(p: &mut P, parent: NodeId, start: Position) -> PResult<()> {
    p.bump(); // map
    let Some((cmeta_id, component_1, component_2)) = header(p, |p| {
        let cmeta_id = parse_cmeta_id(p)?;
        p.expect(SyntaxKind::BETWEEN_KW)?;
        let component_1 = p.expect(SyntaxKind::IDENT)?.text;
        p.expect(SyntaxKind::AND_KW)?;
        let component_2 = p.expect(SyntaxKind::IDENT)?.text;
        p.expect(SyntaxKind::FOR_KW)?;
        Ok((cmeta_id, component_1, component_2))
    }) else {
        return Ok(());
    };

    let connection = Connection {
        component_1,
        component_2,
    };
    let id = add_node(p, parent, connection, cmeta_id, start);
    parse_body(p, ParseContext::MapBody, id, parse_variable_mapping);
    finish_node(p, id, start);
    Ok(())
}

/// `vars cmeta? NAME 'and' NAME;`
fn parse_variable_mapping<P: ModelParser>(p: &mut P, parent: NodeId) -> PResult<()> {
    let start = p.current_position();
    p.bump(); // vars
    let cmeta_id = parse_cmeta_id(p)?;
    let variable_1 = p.expect(SyntaxKind::IDENT)?.text;
    p.expect(SyntaxKind::AND_KW)?;
    let variable_2 = p.expect(SyntaxKind::IDENT)?.text;
    p.expect(SyntaxKind::SEMICOLON)?;
    add_node(
        p,
        parent,
        VariableMapping {
            variable_1,
            variable_2,
        },
        cmeta_id,
        start,
    );
    Ok(())
}
