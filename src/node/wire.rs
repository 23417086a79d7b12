//! Ports, signals and parameters.

use super::normal::NormalNode;
use super::term::Direction;
use crate::graph::{Graph, NodeId};

/// A terminal on a component boundary.
#[derive(Debug)]
pub struct Port {
    pub(crate) edges: NormalNode,
    dir: Direction,
}

impl Port {
    pub(crate) fn new(dir: Direction) -> Self {
        Self {
            edges: NormalNode::new(),
            dir,
        }
    }

    /// Get the port direction.
    pub fn direction(&self) -> Direction {
        self.dir
    }

    /// Flip `In`/`Out` in place.
    pub(crate) fn invert_direction(&mut self) -> &mut Self {
        self.dir = self.dir.invert();
        self
    }

    pub(crate) fn detached(&self) -> Self {
        Self::new(self.dir)
    }
}

/// An internal wire.
#[derive(Debug)]
pub struct Signal {
    pub(crate) edges: NormalNode,
}

impl Signal {
    pub(crate) fn new() -> Self {
        Self {
            edges: NormalNode::new(),
        }
    }

    pub(crate) fn detached(&self) -> Self {
        Self::new()
    }
}

/// A configurable value, resolved through its driver or its default literal.
#[derive(Debug)]
pub struct Parameter {
    pub(crate) edges: NormalNode,
    default: Option<NodeId>,
}

impl Parameter {
    /// `default` must refer to a literal node; the graph factory checks this.
    pub(crate) fn new(default: Option<NodeId>) -> Self {
        Self {
            edges: NormalNode::new(),
            default,
        }
    }

    /// The literal used when nothing drives the parameter.
    pub fn default_value(&self) -> Option<NodeId> {
        self.default
    }

    /// Resolve the parameter.
    ///
    /// A connected driver wins over the default. `None` means unresolved.
    pub fn val(&self, graph: &Graph) -> Option<NodeId> {
        match self.edges.input() {
            Some(edge) => graph.edge(edge).and_then(|e| e.source()),
            None => self.default,
        }
    }

    pub(crate) fn detached(&self) -> Self {
        Self::new(self.default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_direction_chains() {
        let mut port = Port::new(Direction::In);
        assert_eq!(port.invert_direction().direction(), Direction::Out);
        assert_eq!(
            port.invert_direction().invert_direction().direction(),
            Direction::Out
        );

        let mut port = Port::new(Direction::None);
        assert_eq!(port.invert_direction().direction(), Direction::None);
    }

    #[test]
    fn test_parameter_default_only() {
        let graph = Graph::new("params");
        let param = Parameter::new(Some(NodeId(4)));
        assert_eq!(param.val(&graph), Some(NodeId(4)));
        assert_eq!(Parameter::new(None).val(&graph), None);
    }
}
