//! Directed edges between nodes.

use super::ids::{EdgeId, NodeId};

/// A directed edge: the destination is driven by the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    id: EdgeId,
    name: String,
    source: Option<NodeId>,
    destination: Option<NodeId>,
}

impl Edge {
    /// Edges are only created by [`Graph::connect`](super::Graph::connect).
    pub(crate) fn new(
        id: EdgeId,
        name: String,
        source: Option<NodeId>,
        destination: Option<NodeId>,
    ) -> Self {
        Self {
            id,
            name,
            source,
            destination,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The driving node.
    pub fn source(&self) -> Option<NodeId> {
        self.source
    }

    /// The driven node.
    pub fn destination(&self) -> Option<NodeId> {
        self.destination
    }
}
