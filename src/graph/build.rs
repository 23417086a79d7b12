//! Building a graph from a parsed netlist.

use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use super::{Graph, GraphConfig, NodeId};
use crate::dsl::{Constant, GraphAst, NodeDef, NodeDefKind, Operand};
use crate::error::{GraphError, Result};
use crate::types::Type;

/// Name used when the netlist has no `.graph` directive.
const DEFAULT_GRAPH_NAME: &str = "top";

impl Graph {
    /// Build a graph from a parsed AST.
    ///
    /// Declarations are created in source order, so expressions may only
    /// refer to nodes declared above them. Connections are made last.
    pub fn from_ast(ast: GraphAst, config: GraphConfig) -> Result<Self> {
        let name = ast.name.unwrap_or_else(|| DEFAULT_GRAPH_NAME.to_string());
        let mut graph = Graph::with_config(name, config);

        for def in &ast.types {
            graph.types_mut().define(def.name.clone(), def.kind)?;
        }

        // Declared names only; literals created for constants are anonymous here
        let mut declared: HashMap<String, NodeId> = HashMap::new();

        for def in &ast.nodes {
            let name = declared_name(def)?;
            if declared.contains_key(&name) {
                return Err(GraphError::DuplicateNode { name });
            }
            let id = declare(&mut graph, &declared, def, name.clone())?;
            declared.insert(name, id);
        }

        for conn in &ast.connections {
            let dst = declared
                .get(&conn.destination)
                .copied()
                .ok_or_else(|| GraphError::node_not_found(&conn.destination))?;
            let src = operand(&mut graph, &declared, &conn.source)?;
            graph.connect(dst, src)?;
        }

        debug!(
            "built graph '{}': {} nodes, {} edges",
            graph.name(),
            graph.num_nodes(),
            graph.num_edges()
        );
        Ok(graph)
    }
}

/// The name a declaration will get, synthesizing it for unnamed ports and signals.
fn declared_name(def: &NodeDef) -> Result<String> {
    if let Some(name) = &def.name {
        return Ok(name.clone());
    }
    let ty = def.type_name.as_deref().unwrap_or_default();
    match def.kind {
        NodeDefKind::Port(_) => Ok(ty.to_string()),
        NodeDefKind::Signal => Ok(format!("{}_signal", ty)),
        _ => Err(GraphError::parse(
            def.line,
            format!("'{}' declaration needs a name", def.kind.keyword()),
        )),
    }
}

fn declare(
    graph: &mut Graph,
    declared: &HashMap<String, NodeId>,
    def: &NodeDef,
    name: String,
) -> Result<NodeId> {
    match &def.kind {
        NodeDefKind::Port(dir) => {
            let ty = lookup_type(graph, def)?;
            Ok(graph.port(name, ty, *dir))
        }
        NodeDefKind::Signal => {
            let ty = lookup_type(graph, def)?;
            Ok(graph.signal(name, ty))
        }
        NodeDefKind::Parameter { default } => {
            let ty = lookup_type(graph, def)?;
            let default = default.as_ref().map(|c| constant(graph, c));
            graph.parameter(name, ty, default)
        }
        NodeDefKind::Expression { op, lhs, rhs } => {
            let lhs = operand(graph, declared, lhs)?;
            let rhs = operand(graph, declared, rhs)?;
            graph.named_expression(name, *op, lhs, rhs)
        }
    }
}

fn lookup_type(graph: &Graph, def: &NodeDef) -> Result<Rc<Type>> {
    let name = def.type_name.as_deref().unwrap_or_default();
    graph.types().get(name).ok_or_else(|| GraphError::UnknownType {
        name: name.to_string(),
        line: def.line,
    })
}

fn operand(graph: &mut Graph, declared: &HashMap<String, NodeId>, op: &Operand) -> Result<NodeId> {
    match op {
        Operand::Node(name) => declared
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::node_not_found(name)),
        Operand::Constant(c) => Ok(constant(graph, c)),
    }
}

fn constant(graph: &mut Graph, c: &Constant) -> NodeId {
    match c {
        Constant::Bool(true) => graph.bool_true(),
        Constant::Bool(false) => graph.bool_false(),
        Constant::Int(v) => graph.int_literal(*v),
        Constant::Str(s) => graph.str_literal(s),
    }
}
