use crate::workflow::{BranchTag, NodeType, WorkflowEdge, WorkflowNode};
use ahash::AHashMap;
use tracing::debug;

/// Position of a node in the input node list.
pub type NodeIndex = usize;

/// A resolved outgoing edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub target: NodeIndex,
    pub branch: Option<BranchTag>,
}

/// Arena-style lookup tables over a borrowed node/edge snapshot.
///
/// Edges whose source or target does not name a node are dropped here, so every
/// consumer sees the same fail-soft view of the graph.
#[derive(Debug)]
pub struct GraphIndex<'g> {
    nodes: &'g [WorkflowNode],
    by_id: AHashMap<&'g str, NodeIndex>,
    outgoing: Vec<Vec<Link>>,
    in_degree: Vec<usize>,
}

impl<'g> GraphIndex<'g> {
    pub fn new(nodes: &'g [WorkflowNode], edges: &'g [WorkflowEdge]) -> Self {
        let mut by_id = AHashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            // First declaration wins if an id repeats.
            by_id.entry(node.id.as_str()).or_insert(index);
        }

        let mut outgoing = vec![Vec::new(); nodes.len()];
        let mut in_degree = vec![0; nodes.len()];
        for edge in edges {
            match (
                by_id.get(edge.source.as_str()),
                by_id.get(edge.target.as_str()),
            ) {
                (Some(&source), Some(&target)) => {
                    outgoing[source].push(Link {
                        target,
                        branch: edge.branch,
                    });
                    in_degree[target] += 1;
                }
                _ => debug!(
                    edge_id = %edge.id,
                    source = %edge.source,
                    target = %edge.target,
                    "Skipping edge with a dangling endpoint"
                ),
            }
        }

        Self {
            nodes,
            by_id,
            outgoing,
            in_degree,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, index: NodeIndex) -> &'g WorkflowNode {
        &self.nodes[index]
    }

    pub fn nodes(&self) -> &'g [WorkflowNode] {
        self.nodes
    }

    pub fn lookup(&self, id: &str) -> Option<NodeIndex> {
        self.by_id.get(id).copied()
    }

    /// Outgoing edges of a node, in declaration order.
    pub fn outgoing(&self, index: NodeIndex) -> &[Link] {
        &self.outgoing[index]
    }

    /// The first outgoing edge carrying `tag`.
    pub fn branch(&self, index: NodeIndex, tag: BranchTag) -> Option<NodeIndex> {
        self.outgoing[index]
            .iter()
            .find(|link| link.branch == Some(tag))
            .map(|link| link.target)
    }

    pub fn in_degree(&self, index: NodeIndex) -> usize {
        self.in_degree[index]
    }

    /// Nodes the generated body starts from: no incoming edge and not an End node.
    pub fn entry_points(&self) -> Vec<NodeIndex> {
        (0..self.nodes.len())
            .filter(|&i| self.in_degree[i] == 0 && self.nodes[i].node_type() != NodeType::End)
            .collect()
    }
}
