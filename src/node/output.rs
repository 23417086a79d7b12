//! Output edge bookkeeping shared by every node variant.

use crate::graph::{Edge, EdgeId, NodeId};

/// Ordered set of edges driven by a node.
///
/// Not `Clone`: copies of a node never inherit its connections.
#[derive(Debug, Default)]
pub struct MultiOutputNode {
    outputs: Vec<EdgeId>,
}

impl MultiOutputNode {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Edges sourced by this node, in connection order.
    pub fn outputs(&self) -> &[EdgeId] {
        &self.outputs
    }

    /// Number of registered output edges.
    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Register `edge` as an output of `owner`.
    ///
    /// Returns `false` when `owner` is not the edge's source or the edge
    /// is already registered.
    pub(crate) fn add_edge(&mut self, owner: NodeId, edge: &Edge) -> bool {
        if edge.source() != Some(owner) || self.outputs.contains(&edge.id()) {
            return false;
        }
        self.outputs.push(edge.id());
        true
    }

    /// Remove `edge` from the outputs of `owner`.
    pub(crate) fn remove_edge(&mut self, owner: NodeId, edge: &Edge) -> bool {
        if edge.source() != Some(owner) {
            return false;
        }
        match self.outputs.iter().position(|&id| id == edge.id()) {
            Some(idx) => {
                self.outputs.remove(idx);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(id: usize, src: usize, dst: usize) -> Edge {
        Edge::new(
            EdgeId(id),
            format!("e{}", id),
            Some(NodeId(src)),
            Some(NodeId(dst)),
        )
    }

    #[test]
    fn test_add_output_edge() {
        let mut node = MultiOutputNode::new();
        assert!(node.add_edge(NodeId(0), &edge(0, 0, 1)));
        assert!(node.add_edge(NodeId(0), &edge(1, 0, 2)));
        assert_eq!(node.outputs(), &[EdgeId(0), EdgeId(1)]);
    }

    #[test]
    fn test_duplicate_and_foreign_edges_rejected() {
        let mut node = MultiOutputNode::new();
        let e = edge(0, 0, 1);
        assert!(node.add_edge(NodeId(0), &e));
        assert!(!node.add_edge(NodeId(0), &e));
        assert!(!node.add_edge(NodeId(0), &edge(1, 3, 0)));
        assert_eq!(node.num_outputs(), 1);
    }

    #[test]
    fn test_remove_output_edge() {
        let mut node = MultiOutputNode::new();
        let e = edge(0, 0, 1);
        node.add_edge(NodeId(0), &e);
        assert!(!node.remove_edge(NodeId(0), &edge(5, 0, 2)));
        assert!(node.remove_edge(NodeId(0), &e));
        assert!(!node.remove_edge(NodeId(0), &e));
        assert!(node.outputs().is_empty());
    }
}
