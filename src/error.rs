//! Error types for the elaboration graph.
//!
//! This module provides a unified error type [`GraphError`] that covers
//! netlist parsing, graph construction, and validation failures.

use thiserror::Error;

use crate::graph::{EdgeId, NodeId};
use crate::node::{NodeTag, StorageKind};

/// Result type alias using [`GraphError`].
pub type Result<T> = std::result::Result<T, GraphError>;

/// Unified error type for all graph operations.
#[derive(Error, Debug)]
pub enum GraphError {
    // ============ Netlist Parsing Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Reference to a type that was never declared
    #[error("Unknown type '{name}' at line {line}")]
    UnknownType { name: String, line: usize },

    /// Type name declared twice (or shadowing a built-in)
    #[error("Duplicate type name '{name}'")]
    DuplicateType { name: String },

    // ============ Graph Construction Errors ============
    /// Node name declared twice
    #[error("Duplicate node name '{name}'")]
    DuplicateNode { name: String },

    /// Node not found by name
    #[error("Node '{node}' not found in graph")]
    NodeNotFound { node: String },

    /// Node id does not belong to this graph
    #[error("Node id {id} is not part of this graph")]
    InvalidNodeId { id: NodeId },

    /// Edge id is unknown or was already disconnected
    #[error("Edge {edge} is not connected")]
    EdgeNotFound { edge: EdgeId },

    /// Attempt to use a literal as an edge destination
    #[error("Cannot drive literal node '{name}'")]
    CannotDriveLiteral { name: String },

    /// Downcast to a variant that disagrees with the node's tag
    #[error("Node '{node}' is a {actual}, not a {expected}")]
    NodeKindMismatch {
        node: String,
        expected: NodeTag,
        actual: NodeTag,
    },

    /// Raw value requested with the wrong storage kind
    #[error("Literal holds a {actual} value, not a {expected} value")]
    LiteralKindMismatch {
        expected: StorageKind,
        actual: StorageKind,
    },

    /// Second driver on a node while replacement is rejected
    #[error("Node '{node}' is already driven by edge '{edge}'")]
    InputAlreadyDriven { node: String, edge: String },

    // ============ Validation Errors ============
    /// Edge registered on only one of its endpoints
    #[error("Edge '{edge}' is not registered symmetrically: {message}")]
    AsymmetricEdge { edge: String, message: String },

    /// Parameter with neither a driver nor a default value
    #[error("Parameter '{name}' has no driver and no default value")]
    UnresolvedParameter { name: String },

    // ============ I/O Errors ============
    /// Error reading a netlist file
    #[error("Failed to read netlist file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl GraphError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create a node-not-found error
    pub fn node_not_found(node: impl Into<String>) -> Self {
        Self::NodeNotFound { node: node.into() }
    }

    /// Create a kind mismatch error for a failed downcast
    pub fn kind_mismatch(node: impl Into<String>, expected: NodeTag, actual: NodeTag) -> Self {
        Self::NodeKindMismatch {
            node: node.into(),
            expected,
            actual,
        }
    }

    /// Create an asymmetric edge error
    pub fn asymmetric(edge: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AsymmetricEdge {
            edge: edge.into(),
            message: message.into(),
        }
    }
}
