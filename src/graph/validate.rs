//! Graph validation.

use log::warn;

use super::{Graph, NodeId};
use crate::error::{GraphError, Result};
use crate::node::{NodeKind, NodeTag};

/// Validate a graph before handing it to a backend.
///
/// Checks:
/// - Every connected edge is registered on both of its endpoints
/// - Every edge a node refers to is connected and names that node
/// - No literal is driven
/// - Parameters resolve, unless the config allows unresolved ones
///
/// Undriven signals are reported as warnings only.
pub fn validate_graph(graph: &Graph) -> Result<()> {
    for edge in graph.edges() {
        if let Some(src) = edge.source() {
            let node = graph.node(src)?;
            if !node.outputs().contains(&edge.id()) {
                return Err(GraphError::asymmetric(
                    edge.name(),
                    format!("missing from outputs of '{}'", node.name()),
                ));
            }
        }
        if let Some(dst) = edge.destination() {
            let node = graph.node(dst)?;
            if node.is_literal() {
                return Err(GraphError::CannotDriveLiteral {
                    name: node.name().to_string(),
                });
            }
            if node.input() != Some(edge.id()) {
                return Err(GraphError::asymmetric(
                    edge.name(),
                    format!("not the input of '{}'", node.name()),
                ));
            }
        }
    }

    for node in graph.nodes() {
        for &id in node.outputs() {
            match graph.edge(id) {
                Some(edge) if edge.source() == Some(node.id()) => {}
                _ => {
                    return Err(GraphError::asymmetric(
                        id.to_string(),
                        format!("stale output of '{}'", node.name()),
                    ))
                }
            }
        }
        if let Some(id) = node.input() {
            match graph.edge(id) {
                Some(edge) if edge.destination() == Some(node.id()) => {}
                _ => {
                    return Err(GraphError::asymmetric(
                        id.to_string(),
                        format!("stale input of '{}'", node.name()),
                    ))
                }
            }
        }
    }

    for id in unresolved_parameters(graph) {
        let name = graph.node(id)?.name().to_string();
        if !graph.config().allow_unresolved_parameters {
            return Err(GraphError::UnresolvedParameter { name });
        }
        warn!("parameter '{}' is unresolved", name);
    }

    for id in undriven_signals(graph) {
        warn!("signal '{}' has no driver", graph.node(id)?.name());
    }

    Ok(())
}

/// Parameters with neither a driver nor a default value.
pub fn unresolved_parameters(graph: &Graph) -> Vec<NodeId> {
    graph
        .nodes()
        .filter_map(|node| match node.kind() {
            NodeKind::Parameter(p) if p.val(graph).is_none() => Some(node.id()),
            _ => None,
        })
        .collect()
}

/// Signals without a driver.
pub fn undriven_signals(graph: &Graph) -> Vec<NodeId> {
    graph
        .nodes_with_tag(NodeTag::Signal)
        .filter(|node| node.input().is_none())
        .map(|node| node.id())
        .collect()
}
