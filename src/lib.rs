//! # Elab Graph
//!
//! A typed node/edge graph describing the wiring of a hardware design
//! during elaboration.
//!
//! This library provides:
//! - Node variants for ports, signals, parameters, literals and expressions
//! - Directed edges with a single driver per node and unlimited fan-out
//! - Shared, immutable hardware types
//! - A small netlist language for describing graphs as text
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`node`] - Node variants, downcasting and per-node edge bookkeeping
//! - [`graph`] - The graph arena, connect/disconnect and validation
//! - [`types`] - Hardware types shared between nodes
//! - [`dsl`] - Parser for the netlist description language
//!
//! ## Usage
//!
//! ```
//! use elab_graph::{Direction, Graph};
//!
//! let mut graph = Graph::new("top");
//! let bit = graph.types().bit();
//! let input = graph.port("a", bit.clone(), Direction::In);
//! let wire = graph.signal("w", bit);
//! graph.connect(wire, input).unwrap();
//! assert_eq!(graph.driver(wire), Some(input));
//! ```
//!
//! ## Edge Bookkeeping
//!
//! Every edge is recorded twice: in the output list of its source and in
//! the input slot of its destination. Only [`Graph::connect`] and
//! [`Graph::disconnect`] touch these records, so both sides always agree.
//! Literals can drive any number of nodes but are never driven.

pub mod dsl;
pub mod error;
pub mod graph;
pub mod node;
pub mod types;

// Re-export main types for convenience
pub use error::{GraphError, Result};
pub use graph::{Edge, EdgeId, Graph, GraphConfig, InputReplacement, NodeId};
pub use node::{Direction, LiteralValue, Node, NodeKind, NodeTag};
pub use types::{Type, TypeKind};
