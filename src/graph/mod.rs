//! Graph arena, edges and validation.
//!
//! The [`Graph`] owns every node and edge of a design and is the only
//! place where edges are created or destroyed, so both endpoints of an
//! edge always agree about it.

mod build;
mod config;
mod design;
mod edge;
mod ids;
mod validate;

pub use config::{GraphConfig, InputReplacement};
pub use design::Graph;
pub use edge::Edge;
pub use ids::{EdgeId, NodeId};
pub use validate::{undriven_signals, unresolved_parameters, validate_graph};
