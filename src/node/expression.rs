//! Expression nodes.
//!
//! An expression combines two operand nodes with a binary operator. Only
//! its place in the graph is modelled here; evaluation belongs to the
//! consumer of the graph.

use std::fmt;

use super::normal::NormalNode;
use crate::graph::NodeId;

/// Binary operators available to expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    /// Operator symbol as written in names, e.g. `+`.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }

    /// Parse an operator from its keyword or symbol.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "add" | "+" => Some(BinaryOp::Add),
            "sub" | "-" => Some(BinaryOp::Sub),
            "mul" | "*" => Some(BinaryOp::Mul),
            "div" | "/" => Some(BinaryOp::Div),
            _ => None,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// `lhs op rhs`, itself drivable like any normal node.
#[derive(Debug)]
pub struct Expression {
    pub(crate) edges: NormalNode,
    op: BinaryOp,
    lhs: NodeId,
    rhs: NodeId,
}

impl Expression {
    pub(crate) fn new(op: BinaryOp, lhs: NodeId, rhs: NodeId) -> Self {
        Self {
            edges: NormalNode::new(),
            op,
            lhs,
            rhs,
        }
    }

    /// Get the operator.
    pub fn op(&self) -> BinaryOp {
        self.op
    }

    /// Get the left operand.
    pub fn lhs(&self) -> NodeId {
        self.lhs
    }

    /// Get the right operand.
    pub fn rhs(&self) -> NodeId {
        self.rhs
    }

    pub(crate) fn detached(&self) -> Self {
        Self::new(self.op, self.lhs, self.rhs)
    }
}
