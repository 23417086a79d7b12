//! The graph arena and its edge operations.

use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, trace};

use super::config::{GraphConfig, InputReplacement};
use super::edge::Edge;
use super::ids::{EdgeId, NodeId};
use crate::error::{GraphError, Result};
use crate::node::{
    BinaryOp, Direction, Expression, Literal, LiteralValue, Node, NodeKind, NodeTag, Parameter,
    Port, Signal,
};
use crate::types::{Type, TypeTable};

/// How a node got its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Naming {
    /// Chosen by the caller
    Declared,
    /// Generated from a value or operands, e.g. `int3` or `a+3`
    Derived,
}

/// Boolean constants shared by every user of a graph.
#[derive(Debug, Default)]
struct Constants {
    bool_true: Option<NodeId>,
    bool_false: Option<NodeId>,
}

/// A typed node/edge graph describing the wiring of one design.
///
/// The graph owns all nodes and edges. Nodes refer to edges and edges to
/// nodes by id, and ids stay valid for the lifetime of the graph.
#[derive(Debug)]
pub struct Graph {
    name: String,
    config: GraphConfig,
    types: TypeTable,
    nodes: Vec<Node>,
    /// Disconnected edges leave a hole so ids are never reused
    edges: Vec<Option<Edge>>,
    /// First node declared under each name
    names: HashMap<String, NodeId>,
    /// First node with each generated name, shadowed by `names`
    derived_names: HashMap<String, NodeId>,
    constants: Constants,
}

impl Graph {
    /// Create an empty graph with the default configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, GraphConfig::default())
    }

    /// Create an empty graph with an explicit configuration.
    pub fn with_config(name: impl Into<String>, config: GraphConfig) -> Self {
        Self {
            name: name.into(),
            config,
            types: TypeTable::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
            names: HashMap::new(),
            derived_names: HashMap::new(),
            constants: Constants::default(),
        }
    }

    /// Get the graph name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the graph configuration.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Types available to nodes of this graph.
    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    /// Types table for declaring named types.
    pub fn types_mut(&mut self) -> &mut TypeTable {
        &mut self.types
    }

    // ============ Lookup ============

    /// Get a node by id.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or(GraphError::InvalidNodeId { id })
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.0)
            .ok_or(GraphError::InvalidNodeId { id })
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Nodes of one variant, in creation order.
    pub fn nodes_with_tag(&self, tag: NodeTag) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.tag() == tag)
    }

    /// Get the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Find a node by name.
    ///
    /// Declared names win over names generated for literals and
    /// expressions. Among nodes named the same way the first one wins.
    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.names
            .get(name)
            .or_else(|| self.derived_names.get(name))
            .copied()
    }

    /// A connected edge, or `None` once it was disconnected.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0).and_then(Option::as_ref)
    }

    /// All connected edges.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().flatten()
    }

    /// Get the number of connected edges.
    pub fn num_edges(&self) -> usize {
        self.edges().count()
    }

    /// The node driving `node`, if any.
    pub fn driver(&self, node: NodeId) -> Option<NodeId> {
        let input = self.nodes.get(node.0)?.input()?;
        self.edge(input)?.source()
    }

    /// Nodes driven by `node`, in connection order.
    pub fn sinks(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(node.0)
            .map(|n| {
                n.outputs()
                    .iter()
                    .filter_map(|&e| self.edge(e).and_then(Edge::destination))
                    .collect()
            })
            .unwrap_or_default()
    }

    // ============ Node factories ============

    fn insert(&mut self, name: String, ty: Rc<Type>, kind: NodeKind) -> NodeId {
        self.insert_named(name, Naming::Declared, ty, kind)
    }

    fn insert_named(
        &mut self,
        name: String,
        naming: Naming,
        ty: Rc<Type>,
        kind: NodeKind,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        trace!("{}: new {} '{}' of type {}", id, kind.tag(), name, ty);
        let names = match naming {
            Naming::Declared => &mut self.names,
            Naming::Derived => &mut self.derived_names,
        };
        names.entry(name.clone()).or_insert(id);
        self.nodes.push(Node::new(id, name, ty, kind));
        id
    }

    /// Create a new port.
    pub fn port(&mut self, name: impl Into<String>, ty: Rc<Type>, dir: Direction) -> NodeId {
        self.insert(name.into(), ty, NodeKind::Port(Port::new(dir)))
    }

    /// A port named after its type.
    pub fn port_of_type(&mut self, ty: Rc<Type>, dir: Direction) -> NodeId {
        let name = ty.name().to_string();
        self.port(name, ty, dir)
    }

    /// Create a new signal.
    pub fn signal(&mut self, name: impl Into<String>, ty: Rc<Type>) -> NodeId {
        self.insert(name.into(), ty, NodeKind::Signal(Signal::new()))
    }

    /// A signal named `<type>_signal`.
    pub fn signal_of_type(&mut self, ty: Rc<Type>) -> NodeId {
        let name = format!("{}_signal", ty.name());
        self.signal(name, ty)
    }

    /// A parameter with an optional default, which must be a literal.
    pub fn parameter(
        &mut self,
        name: impl Into<String>,
        ty: Rc<Type>,
        default: Option<NodeId>,
    ) -> Result<NodeId> {
        if let Some(lit) = default {
            self.node(lit)?.to_literal()?;
        }
        Ok(self.insert(name.into(), ty, NodeKind::Parameter(Parameter::new(default))))
    }

    /// Create a new named literal.
    pub fn literal(
        &mut self,
        name: impl Into<String>,
        ty: Rc<Type>,
        value: impl Into<LiteralValue>,
    ) -> NodeId {
        let lit = Literal::new(value.into());
        self.insert(name.into(), ty, NodeKind::Literal(lit))
    }

    fn derived_literal(&mut self, name: String, ty: Rc<Type>, value: LiteralValue) -> NodeId {
        let lit = Literal::new(value);
        self.insert_named(name, Naming::Derived, ty, NodeKind::Literal(lit))
    }

    /// A string literal of type `ty`, named after its value.
    pub fn literal_from_str(&mut self, ty: Rc<Type>, value: &str) -> NodeId {
        self.derived_literal(value.to_string(), ty, value.into())
    }

    /// An integer literal named `int<value>`.
    pub fn int_literal(&mut self, value: i64) -> NodeId {
        let ty = self.types.integer();
        self.derived_literal(format!("int{}", value), ty, value.into())
    }

    /// A string literal named `str:<value>`.
    pub fn str_literal(&mut self, value: &str) -> NodeId {
        let ty = self.types.string();
        self.derived_literal(format!("str:{}", value), ty, value.into())
    }

    /// The shared `true` constant, created on first use.
    pub fn bool_true(&mut self) -> NodeId {
        if let Some(id) = self.constants.bool_true {
            return id;
        }
        let ty = self.types.boolean();
        let id = self.derived_literal("bool_true".to_string(), ty, true.into());
        self.constants.bool_true = Some(id);
        id
    }

    /// The shared `false` constant, created on first use.
    pub fn bool_false(&mut self) -> NodeId {
        if let Some(id) = self.constants.bool_false {
            return id;
        }
        let ty = self.types.boolean();
        let id = self.derived_literal("bool_false".to_string(), ty, false.into());
        self.constants.bool_false = Some(id);
        id
    }

    /// An expression named after its operands, e.g. `a+int3` renders as `a+3`.
    pub fn expression(&mut self, op: BinaryOp, lhs: NodeId, rhs: NodeId) -> Result<NodeId> {
        let name = format!("{}{}{}", self.node(lhs)?, op, self.node(rhs)?);
        self.add_expression(name, Naming::Derived, op, lhs, rhs)
    }

    /// An expression with an explicit name. Its type is the left operand's type.
    pub fn named_expression(
        &mut self,
        name: impl Into<String>,
        op: BinaryOp,
        lhs: NodeId,
        rhs: NodeId,
    ) -> Result<NodeId> {
        self.add_expression(name.into(), Naming::Declared, op, lhs, rhs)
    }

    fn add_expression(
        &mut self,
        name: String,
        naming: Naming,
        op: BinaryOp,
        lhs: NodeId,
        rhs: NodeId,
    ) -> Result<NodeId> {
        let ty = Rc::clone(self.node(lhs)?.ty());
        self.node(rhs)?;
        let expr = Expression::new(op, lhs, rhs);
        Ok(self.insert_named(name, naming, ty, NodeKind::Expression(expr)))
    }

    /// Copy a node without any of its connections.
    pub fn copy_node(&mut self, id: NodeId) -> Result<NodeId> {
        let new_id = NodeId(self.nodes.len());
        let copy = self.node(id)?.detached_copy(new_id);
        trace!("{}: copy of {}", new_id, id);
        self.nodes.push(copy);
        Ok(new_id)
    }

    /// Invert a port's direction, returning the new direction.
    pub fn invert_port(&mut self, id: NodeId) -> Result<Direction> {
        let port = self.node_mut(id)?.to_port_mut()?;
        Ok(port.invert_direction().direction())
    }

    // ============ Edges ============

    /// Drive `dst` from `src`, registering the new edge on both nodes.
    ///
    /// If `dst` already has a driver the configured [`InputReplacement`]
    /// policy applies.
    pub fn connect(&mut self, dst: NodeId, src: NodeId) -> Result<EdgeId> {
        self.node(src)?;
        let dst_node = self.node(dst)?;
        if dst_node.is_literal() {
            return Err(GraphError::CannotDriveLiteral {
                name: dst_node.name().to_string(),
            });
        }

        if let Some(stale) = dst_node.input() {
            match self.config.input_replacement {
                InputReplacement::Reject => {
                    let edge = self
                        .edge(stale)
                        .map(|e| e.name().to_string())
                        .unwrap_or_else(|| stale.to_string());
                    return Err(GraphError::InputAlreadyDriven {
                        node: dst_node.name().to_string(),
                        edge,
                    });
                }
                InputReplacement::Detach => {
                    debug!("{}: replacing driver edge {}", dst, stale);
                    self.disconnect(stale)?;
                }
            }
        }

        let id = EdgeId(self.edges.len());
        let name = format!("{}_to_{}", self.nodes[src.0].name(), self.nodes[dst.0].name());
        let edge = Edge::new(id, name, Some(src), Some(dst));

        let as_output = self.nodes[src.0].add_edge(&edge);
        let as_input = self.nodes[dst.0].add_edge(&edge);
        debug_assert!(as_output && as_input, "edge {} registered on one side only", id);

        debug!("{}: connected {} -> {} ({})", id, src, dst, edge.name());
        self.edges.push(Some(edge));
        Ok(id)
    }

    /// Drive `sink` from `node`.
    pub fn add_sink(&mut self, node: NodeId, sink: NodeId) -> Result<EdgeId> {
        self.connect(sink, node)
    }

    /// Drive `node` from `source`. Fails for literals.
    pub fn add_source(&mut self, node: NodeId, source: NodeId) -> Result<EdgeId> {
        self.connect(node, source)
    }

    /// Remove an edge from both of its endpoints.
    pub fn disconnect(&mut self, id: EdgeId) -> Result<()> {
        let edge = self
            .edges
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(GraphError::EdgeNotFound { edge: id })?;

        for end in [edge.source(), edge.destination()].into_iter().flatten() {
            if let Some(node) = self.nodes.get_mut(end.0) {
                node.remove_edge(&edge);
            }
        }
        debug!("{}: disconnected {}", id, edge.name());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::validate_graph;
    use crate::types::TypeKind;

    fn byte(graph: &mut Graph) -> Rc<Type> {
        graph
            .types_mut()
            .define("byte", TypeKind::Vector { width: 8 })
            .unwrap()
    }

    #[test]
    fn test_connect_registers_both_ends() {
        let mut g = Graph::new("top");
        let ty = byte(&mut g);
        let a = g.port("a", ty.clone(), Direction::In);
        let s = g.signal("s", ty);

        let e = g.connect(s, a).unwrap();
        assert_eq!(g.node(a).unwrap().outputs(), &[e]);
        assert_eq!(g.node(s).unwrap().input(), Some(e));
        assert_eq!(g.driver(s), Some(a));
        assert_eq!(g.sinks(a), vec![s]);
        assert_eq!(g.edge(e).unwrap().name(), "a_to_s");
    }

    #[test]
    fn test_fan_out() {
        let mut g = Graph::new("top");
        let ty = g.types().bit();
        let clk = g.port("clk", ty.clone(), Direction::In);
        let sinks: Vec<_> = (0..3)
            .map(|i| g.signal(format!("s{}", i), ty.clone()))
            .collect();
        for &s in &sinks {
            g.add_sink(clk, s).unwrap();
        }
        assert_eq!(g.sinks(clk), sinks);
        assert_eq!(g.num_edges(), 3);
    }

    #[test]
    fn test_disconnect() {
        let mut g = Graph::new("top");
        let ty = g.types().bit();
        let a = g.signal("a", ty.clone());
        let b = g.signal("b", ty);
        let e = g.connect(b, a).unwrap();

        g.disconnect(e).unwrap();
        assert!(g.node(a).unwrap().outputs().is_empty());
        assert!(g.node(b).unwrap().input().is_none());
        assert!(g.edge(e).is_none());
        assert!(matches!(
            g.disconnect(e),
            Err(GraphError::EdgeNotFound { .. })
        ));
    }

    #[test]
    fn test_second_driver_detaches_first() {
        let mut g = Graph::new("top");
        let ty = g.types().bit();
        let a = g.signal("a", ty.clone());
        let b = g.signal("b", ty.clone());
        let s = g.signal("s", ty);

        let first = g.connect(s, a).unwrap();
        let second = g.connect(s, b).unwrap();

        assert_eq!(g.node(s).unwrap().sources(), vec![second]);
        assert!(g.node(a).unwrap().outputs().is_empty());
        assert!(g.edge(first).is_none());
        assert_eq!(g.driver(s), Some(b));
    }

    #[test]
    fn test_second_driver_rejected() {
        let config = GraphConfig::new().with_input_replacement(InputReplacement::Reject);
        let mut g = Graph::with_config("top", config);
        let ty = g.types().bit();
        let a = g.signal("a", ty.clone());
        let b = g.signal("b", ty.clone());
        let s = g.signal("s", ty);

        let first = g.connect(s, a).unwrap();
        match g.connect(s, b) {
            Err(GraphError::InputAlreadyDriven { node, edge }) => {
                assert_eq!(node, "s");
                assert_eq!(edge, "a_to_s");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
        assert_eq!(g.node(s).unwrap().input(), Some(first));
        assert!(g.node(b).unwrap().outputs().is_empty());
    }

    #[test]
    fn test_cannot_drive_any_literal() {
        let mut g = Graph::new("top");
        let src = g.signal("src", g.types().integer());
        let t = g.bool_true();
        let lits = [g.int_literal(1), g.str_literal("x"), t];
        for lit in lits {
            assert!(matches!(
                g.add_source(lit, src),
                Err(GraphError::CannotDriveLiteral { .. })
            ));
        }
        assert_eq!(g.num_edges(), 0);
    }

    #[test]
    fn test_literal_factories() {
        let mut g = Graph::new("top");
        let seven = g.int_literal(7);
        let node = g.node(seven).unwrap();
        assert_eq!(node.name(), "int7");
        let lit = node.to_literal().unwrap();
        assert_eq!(lit.storage_kind(), crate::node::StorageKind::Int);
        assert_eq!(lit.raw_value::<i64>().unwrap(), 7);

        let hi = g.str_literal("hi");
        let node = g.node(hi).unwrap();
        assert_eq!(node.name(), "str:hi");
        assert_eq!(node.to_literal().unwrap().raw_value::<String>().unwrap(), "hi");
        assert!(Rc::ptr_eq(node.ty(), &g.types().string()));

        let ty = g.types().string();
        let named = g.literal_from_str(ty, "vhdl");
        assert_eq!(g.node(named).unwrap().name(), "vhdl");
    }

    #[test]
    fn test_bool_singletons() {
        let mut g = Graph::new("top");
        let t1 = g.bool_true();
        let t2 = g.bool_true();
        let f1 = g.bool_false();
        let f2 = g.bool_false();
        assert_eq!(t1, t2);
        assert_eq!(f1, f2);
        assert_ne!(t1, f1);
        assert_eq!(g.node(f1).unwrap().name(), "bool_false");
        assert!(!g.node(f1).unwrap().to_literal().unwrap().raw_value::<bool>().unwrap());
        assert_eq!(g.num_nodes(), 2);
    }

    #[test]
    fn test_parameter_resolution() {
        let mut g = Graph::new("top");
        let three = g.int_literal(3);
        let p = g.parameter("p", g.types().integer(), Some(three)).unwrap();
        let x = g.signal("x", g.types().integer());

        let param = g.node(p).unwrap().to_parameter().unwrap();
        assert_eq!(param.val(&g), Some(three));

        g.connect(p, x).unwrap();
        let param = g.node(p).unwrap().to_parameter().unwrap();
        assert_eq!(param.val(&g), Some(x));

        let q = g.parameter("q", g.types().integer(), None).unwrap();
        assert_eq!(g.node(q).unwrap().to_parameter().unwrap().val(&g), None);
    }

    #[test]
    fn test_parameter_default_must_be_literal() {
        let mut g = Graph::new("top");
        let s = g.signal("s", g.types().integer());
        assert!(matches!(
            g.parameter("p", g.types().integer(), Some(s)),
            Err(GraphError::NodeKindMismatch { .. })
        ));
    }

    #[test]
    fn test_copy_is_detached() {
        let mut g = Graph::new("top");
        let ty = byte(&mut g);
        let five = g.int_literal(5);
        let p = g.port("p", ty.clone(), Direction::Out);
        let s = g.signal("s", ty);
        let w = g.parameter("w", g.types().integer(), Some(five)).unwrap();
        let sum = g.named_expression("sum", BinaryOp::Mul, s, five).unwrap();
        g.connect(p, s).unwrap();
        g.connect(w, five).unwrap();
        g.connect(sum, w).unwrap();
        g.connect(s, sum).unwrap();
        assert!(g.node(sum).unwrap().input().is_some());
        assert_eq!(g.node(sum).unwrap().outputs().len(), 1);

        for original in [p, s, w, five, sum] {
            let copy = g.copy_node(original).unwrap();
            let (a, b) = (g.node(original).unwrap(), g.node(copy).unwrap());
            assert_ne!(a.id(), b.id());
            assert_eq!(a.name(), b.name());
            assert_eq!(a.tag(), b.tag());
            assert!(Rc::ptr_eq(a.ty(), b.ty()));
            assert!(b.input().is_none());
            assert!(b.outputs().is_empty());
        }

        let p2 = g.copy_node(p).unwrap();
        assert_eq!(
            g.node(p2).unwrap().to_port().unwrap().direction(),
            Direction::Out
        );
        let w2 = g.copy_node(w).unwrap();
        let param = g.node(w2).unwrap().to_parameter().unwrap();
        assert_eq!(param.default_value(), Some(five));
        assert_eq!(param.val(&g), Some(five));
        let lit2 = g.copy_node(five).unwrap();
        assert_eq!(g.node(lit2).unwrap().to_string(), "5");
        let sum2 = g.copy_node(sum).unwrap();
        let expr = g.node(sum2).unwrap().to_expression().unwrap();
        assert_eq!(expr.op(), BinaryOp::Mul);
        assert_eq!((expr.lhs(), expr.rhs()), (s, five));
        assert!(g.sinks(sum2).is_empty());
        assert_eq!(g.driver(sum2), None);
    }

    #[test]
    fn test_constants_and_edges_unchanged_by_graph_api() {
        let mut g = Graph::new("top");
        let t = g.bool_true();
        let ty = g.types().boolean();
        let en = g.port("en", ty.clone(), Direction::In);
        let s = g.signal("s", ty);
        let to_s = g.connect(s, t).unwrap();
        let to_en = g.connect(en, t).unwrap();

        assert!(g.add_source(t, s).is_err());
        assert!(g.parameter("w", g.types().integer(), Some(s)).is_err());
        g.invert_port(en).unwrap();
        g.copy_node(t).unwrap();
        g.copy_node(en).unwrap();
        assert_eq!(g.bool_true(), t);

        let lit = g.node(t).unwrap().to_literal().unwrap();
        assert_eq!(lit.storage_kind(), crate::node::StorageKind::Bool);
        assert!(lit.raw_value::<bool>().unwrap());
        assert_eq!(g.node(t).unwrap().outputs(), &[to_s, to_en]);
        assert_eq!(g.node(en).unwrap().input(), Some(to_en));
        assert!(validate_graph(&g).is_ok());
    }

    #[test]
    fn test_declared_names_win_lookup() {
        let mut g = Graph::new("top");
        let three = g.int_literal(3);
        assert_eq!(g.find_node("int3"), Some(three));
        let s = g.signal("int3", g.types().integer());
        assert_eq!(g.find_node("int3"), Some(s));

        let t = g.signal("bool_true", g.types().boolean());
        g.bool_true();
        assert_eq!(g.find_node("bool_true"), Some(t));

        let a = g.signal("a", g.types().integer());
        let first = g.expression(BinaryOp::Add, a, three).unwrap();
        let second = g.expression(BinaryOp::Add, a, three).unwrap();
        assert_ne!(first, second);
        assert_eq!(g.find_node("a+3"), Some(first));
    }

    #[test]
    fn test_invert_port() {
        let mut g = Graph::new("top");
        let p = g.port_of_type(g.types().bit(), Direction::In);
        assert_eq!(g.node(p).unwrap().name(), "bit");
        assert_eq!(g.invert_port(p).unwrap(), Direction::Out);
        assert_eq!(g.invert_port(p).unwrap(), Direction::In);

        let s = g.signal_of_type(g.types().bit());
        assert_eq!(g.node(s).unwrap().name(), "bit_signal");
        assert!(matches!(
            g.invert_port(s),
            Err(GraphError::NodeKindMismatch { .. })
        ));
    }

    #[test]
    fn test_expression_node() {
        let mut g = Graph::new("top");
        let ty = byte(&mut g);
        let a = g.signal("a", ty.clone());
        let three = g.int_literal(3);
        let sum = g.expression(BinaryOp::Add, a, three).unwrap();

        let node = g.node(sum).unwrap();
        assert_eq!(node.name(), "a+3");
        assert!(Rc::ptr_eq(node.ty(), &ty));
        let expr = node.to_expression().unwrap();
        assert_eq!((expr.lhs(), expr.rhs()), (a, three));

        let out = g.port("o", ty, Direction::Out);
        g.connect(out, sum).unwrap();
        assert_eq!(g.driver(out), Some(sum));
    }

    #[test]
    fn test_invalid_ids() {
        let mut g = Graph::new("top");
        let a = g.signal("a", g.types().bit());
        assert!(matches!(
            g.connect(a, NodeId(42)),
            Err(GraphError::InvalidNodeId { .. })
        ));
        assert!(g.sinks(NodeId(42)).is_empty());
        assert_eq!(g.driver(NodeId(42)), None);
    }
}
