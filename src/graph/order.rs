use super::index::{GraphIndex, NodeIndex};
use crate::workflow::{WorkflowEdge, WorkflowNode};
use std::collections::VecDeque;

/// Computes a deterministic topological order of the graph.
///
/// Nodes that start with no incoming edges are seeded in input order; every other
/// node is appended the moment its last incoming edge has been consumed, following
/// edge declaration order. Nodes on or behind a cycle never reach in-degree zero
/// and are left out.
pub fn dependency_order(index: &GraphIndex<'_>) -> Vec<NodeIndex> {
    let mut remaining: Vec<usize> = (0..index.len()).map(|i| index.in_degree(i)).collect();
    let mut queue: VecDeque<NodeIndex> = (0..index.len()).filter(|&i| remaining[i] == 0).collect();
    let mut order = Vec::with_capacity(index.len());

    while let Some(current) = queue.pop_front() {
        order.push(current);
        for link in index.outgoing(current) {
            remaining[link.target] -= 1;
            if remaining[link.target] == 0 {
                queue.push_back(link.target);
            }
        }
    }

    order
}

/// Convenience wrapper returning node ids instead of indices.
pub fn order(nodes: &[WorkflowNode], edges: &[WorkflowEdge]) -> Vec<String> {
    let index = GraphIndex::new(nodes, edges);
    dependency_order(&index)
        .into_iter()
        .map(|i| index.node(i).id.clone())
        .collect()
}
