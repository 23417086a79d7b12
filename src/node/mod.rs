//! Graph vertices.
//!
//! This module provides the node variants of the elaboration graph:
//! - Boundary: Port
//! - Internal: Signal, Expression
//! - Configuration: Parameter
//! - Constants: Literal
//!
//! Every variant keeps its own edge bookkeeping. Literals only track
//! outputs; all other variants are normal nodes with a single input slot.
//! Edge registration is crate-private so that only
//! [`Graph::connect`](crate::Graph::connect) and
//! [`Graph::disconnect`](crate::Graph::disconnect) can change it.

mod expression;
mod literal;
mod normal;
mod output;
mod term;
mod wire;

pub use expression::{BinaryOp, Expression};
pub use literal::{Literal, LiteralValue, RawValue, StorageKind};
pub use normal::NormalNode;
pub use output::MultiOutputNode;
pub use term::Direction;
pub use wire::{Parameter, Port, Signal};

use std::fmt;
use std::rc::Rc;

use crate::error::{GraphError, Result};
use crate::graph::{Edge, EdgeId, NodeId};
use crate::types::Type;

/// Discriminant of a node variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTag {
    Port,
    Signal,
    Literal,
    Parameter,
    Expression,
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeTag::Port => "Port",
            NodeTag::Signal => "Signal",
            NodeTag::Literal => "Literal",
            NodeTag::Parameter => "Parameter",
            NodeTag::Expression => "Expression",
        };
        f.pad(s)
    }
}

/// Variant-specific state of a node.
#[derive(Debug)]
pub enum NodeKind {
    Port(Port),
    Signal(Signal),
    Literal(Literal),
    Parameter(Parameter),
    Expression(Expression),
}

impl NodeKind {
    /// Get the discriminant of this variant.
    pub fn tag(&self) -> NodeTag {
        match self {
            NodeKind::Port(_) => NodeTag::Port,
            NodeKind::Signal(_) => NodeTag::Signal,
            NodeKind::Literal(_) => NodeTag::Literal,
            NodeKind::Parameter(_) => NodeTag::Parameter,
            NodeKind::Expression(_) => NodeTag::Expression,
        }
    }

    fn normal(&self) -> Option<&NormalNode> {
        match self {
            NodeKind::Port(p) => Some(&p.edges),
            NodeKind::Signal(s) => Some(&s.edges),
            NodeKind::Parameter(p) => Some(&p.edges),
            NodeKind::Expression(e) => Some(&e.edges),
            NodeKind::Literal(_) => None,
        }
    }

    fn normal_mut(&mut self) -> Option<&mut NormalNode> {
        match self {
            NodeKind::Port(p) => Some(&mut p.edges),
            NodeKind::Signal(s) => Some(&mut s.edges),
            NodeKind::Parameter(p) => Some(&mut p.edges),
            NodeKind::Expression(e) => Some(&mut e.edges),
            NodeKind::Literal(_) => None,
        }
    }

    fn detached(&self) -> Self {
        match self {
            NodeKind::Port(p) => NodeKind::Port(p.detached()),
            NodeKind::Signal(s) => NodeKind::Signal(s.detached()),
            NodeKind::Literal(l) => NodeKind::Literal(l.detached()),
            NodeKind::Parameter(p) => NodeKind::Parameter(p.detached()),
            NodeKind::Expression(e) => NodeKind::Expression(e.detached()),
        }
    }
}

/// A typed vertex of the elaboration graph.
#[derive(Debug)]
pub struct Node {
    id: NodeId,
    name: String,
    ty: Rc<Type>,
    kind: NodeKind,
}

macro_rules! node_casts {
    ($($variant:ident => $as_ref:ident, $to_ref:ident;)*) => {
        $(
            #[doc = concat!("The [`", stringify!($variant), "`] state, or `None` for other variants.")]
            pub fn $as_ref(&self) -> Option<&$variant> {
                match &self.kind {
                    NodeKind::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            #[doc = concat!("The [`", stringify!($variant), "`] state, or a kind mismatch error.")]
            pub fn $to_ref(&self) -> Result<&$variant> {
                let actual = self.tag();
                match &self.kind {
                    NodeKind::$variant(inner) => Ok(inner),
                    _ => Err(GraphError::kind_mismatch(&self.name, NodeTag::$variant, actual)),
                }
            }
        )*
    };
}

impl Node {
    pub(crate) fn new(id: NodeId, name: String, ty: Rc<Type>, kind: NodeKind) -> Self {
        Self { id, name, ty, kind }
    }

    /// Position of this node in its graph.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Get the node name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The shared type of this node.
    pub fn ty(&self) -> &Rc<Type> {
        &self.ty
    }

    /// Get the variant discriminant.
    pub fn tag(&self) -> NodeTag {
        self.kind.tag()
    }

    /// Get the variant state.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Check if this node is a literal.
    pub fn is_literal(&self) -> bool {
        matches!(self.kind, NodeKind::Literal(_))
    }

    node_casts! {
        Port => as_port, to_port;
        Signal => as_signal, to_signal;
        Literal => as_literal, to_literal;
        Parameter => as_parameter, to_parameter;
        Expression => as_expression, to_expression;
    }

    /// Mutable port state, only reachable through [`Graph::invert_port`](crate::Graph::invert_port).
    pub(crate) fn to_port_mut(&mut self) -> Result<&mut Port> {
        let actual = self.tag();
        match &mut self.kind {
            NodeKind::Port(port) => Ok(port),
            _ => Err(GraphError::kind_mismatch(&self.name, NodeTag::Port, actual)),
        }
    }

    /// The edge driving this node. Always `None` for literals.
    pub fn input(&self) -> Option<EdgeId> {
        self.kind.normal().and_then(NormalNode::input)
    }

    /// Driving edges as a sequence of at most one entry.
    pub fn sources(&self) -> Vec<EdgeId> {
        self.kind
            .normal()
            .map(NormalNode::sources)
            .unwrap_or_default()
    }

    /// Edges driven by this node, in connection order.
    pub fn outputs(&self) -> &[EdgeId] {
        match &self.kind {
            NodeKind::Literal(l) => l.outputs().outputs(),
            _ => self.kind.normal().map(NormalNode::outputs).unwrap_or(&[]),
        }
    }

    /// Register one side of `edge` on this node.
    pub(crate) fn add_edge(&mut self, edge: &Edge) -> bool {
        let id = self.id;
        match &mut self.kind {
            NodeKind::Literal(l) => l.outputs_mut().add_edge(id, edge),
            kind => kind
                .normal_mut()
                .map(|n| n.add_edge(id, edge))
                .unwrap_or(false),
        }
    }

    /// Unregister one side of `edge` from this node.
    pub(crate) fn remove_edge(&mut self, edge: &Edge) -> bool {
        let id = self.id;
        match &mut self.kind {
            NodeKind::Literal(l) => l.outputs_mut().remove_edge(id, edge),
            kind => kind
                .normal_mut()
                .map(|n| n.remove_edge(id, edge))
                .unwrap_or(false),
        }
    }

    /// Copy name, type and variant state into a new node with no edges.
    pub(crate) fn detached_copy(&self, id: NodeId) -> Node {
        Node::new(id, self.name.clone(), Rc::clone(&self.ty), self.kind.detached())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::Literal(l) => write!(f, "{}", l.value()),
            _ => f.write_str(&self.name),
        }
    }
}
