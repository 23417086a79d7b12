//! Nodes with a single driver and any number of sinks.

use super::output::MultiOutputNode;
use crate::graph::{Edge, EdgeId, NodeId};

/// Edge bookkeeping for ports, signals, parameters and expressions.
#[derive(Debug, Default)]
pub struct NormalNode {
    outputs: MultiOutputNode,
    input: Option<EdgeId>,
}

impl NormalNode {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The edge driving this node, if any.
    pub fn input(&self) -> Option<EdgeId> {
        self.input
    }

    /// The driving edges as a sequence; holds at most one entry.
    pub fn sources(&self) -> Vec<EdgeId> {
        self.input.into_iter().collect()
    }

    /// Edges driven by this node, in connection order.
    pub fn outputs(&self) -> &[EdgeId] {
        self.outputs.outputs()
    }

    /// Register `edge` on `owner`, as an output first and otherwise as its input.
    ///
    /// An existing input is overwritten. [`Graph::connect`](crate::Graph::connect)
    /// resolves the previous edge before calling this.
    pub(crate) fn add_edge(&mut self, owner: NodeId, edge: &Edge) -> bool {
        if self.outputs.add_edge(owner, edge) {
            return true;
        }
        if edge.destination() == Some(owner) {
            self.input = Some(edge.id());
            return true;
        }
        false
    }

    pub(crate) fn remove_edge(&mut self, owner: NodeId, edge: &Edge) -> bool {
        if self.outputs.remove_edge(owner, edge) {
            return true;
        }
        if edge.destination() == Some(owner) && self.input == Some(edge.id()) {
            self.input = None;
            return true;
        }
        false
    }
}
