//! Abstract Syntax Tree types for the netlist DSL.

use crate::node::{BinaryOp, Direction};
use crate::types::TypeKind;

/// Complete AST representation of a parsed netlist.
#[derive(Debug, Clone, Default)]
pub struct GraphAst {
    /// Graph name from `.graph`
    pub name: Option<String>,
    /// Named type declarations, in source order
    pub types: Vec<TypeDef>,
    /// Node declarations, in source order
    pub nodes: Vec<NodeDef>,
    /// `connect` statements, in source order
    pub connections: Vec<ConnectDef>,
}

impl GraphAst {
    /// Create a new empty AST.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A `.type` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    pub name: String,
    pub kind: TypeKind,
    /// Source line number for error reporting
    pub line: usize,
}

/// A node declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDef {
    /// Explicit name; ports and signals may omit it
    pub name: Option<String>,
    /// What kind of node to create
    pub kind: NodeDefKind,
    /// Type name; expressions take their left operand's type
    pub type_name: Option<String>,
    /// Source line number for error reporting
    pub line: usize,
}

/// Variant-specific parts of a node declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeDefKind {
    Port(Direction),
    Signal,
    Parameter { default: Option<Constant> },
    Expression {
        op: BinaryOp,
        lhs: Operand,
        rhs: Operand,
    },
}

impl NodeDefKind {
    /// DSL keyword introducing this kind of declaration.
    pub fn keyword(&self) -> &'static str {
        match self {
            NodeDefKind::Port(_) => "port",
            NodeDefKind::Signal => "signal",
            NodeDefKind::Parameter { .. } => "param",
            NodeDefKind::Expression { .. } => "expr",
        }
    }
}

/// A constant written inline in the netlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constant {
    Bool(bool),
    Int(i64),
    Str(String),
}

/// Something that can drive a node: a named node or an inline constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Node(String),
    Constant(Constant),
}

/// A `connect <destination> <source>` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectDef {
    pub destination: String,
    pub source: Operand,
    /// Source line number for error reporting
    pub line: usize,
}
