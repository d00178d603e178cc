use super::naming;
use crate::graph::{GraphIndex, NodeIndex, dependency_order};
use crate::workflow::{NodeKind, NodeType, WorkflowEdge, WorkflowNode};

/// Per-call traversal state: lookup tables, resolved identifiers and the
/// visited set. Built fresh for every compilation and dropped afterwards.
pub(super) struct TraversalContext<'g> {
    pub(super) graph: GraphIndex<'g>,
    /// Full dependency order of the graph.
    pub(super) order: Vec<NodeIndex>,
    /// Agent nodes in declaration order.
    pub(super) agents: Vec<NodeIndex>,
    identifiers: Vec<Option<String>>,
    reserved: Vec<String>,
    visited: Vec<bool>,
    emitted: usize,
}

impl<'g> TraversalContext<'g> {
    pub(super) fn new(
        nodes: &'g [WorkflowNode],
        edges: &'g [WorkflowEdge],
        reserved: &[&str],
    ) -> Self {
        let graph = GraphIndex::new(nodes, edges);
        let order = dependency_order(&graph);

        // Agents the order reaches come first; agents stuck behind a cycle are
        // still declared, after them, in input order.
        let mut agents: Vec<NodeIndex> = order
            .iter()
            .copied()
            .filter(|&i| graph.node(i).node_type() == NodeType::Agent)
            .collect();
        let mut in_order = vec![false; graph.len()];
        for &i in &order {
            in_order[i] = true;
        }
        agents.extend(
            (0..graph.len())
                .filter(|&i| !in_order[i] && graph.node(i).node_type() == NodeType::Agent),
        );

        let mut identifiers = vec![None; graph.len()];
        for (position, &i) in agents.iter().enumerate() {
            if let NodeKind::Agent(data) = &graph.node(i).kind {
                let ident = naming::resolve(&data.name, position);
                identifiers[i] = Some(naming::avoid_reserved(ident, reserved, "agent"));
            }
        }
        let teams = (0..graph.len()).filter_map(|i| match &graph.node(i).kind {
            NodeKind::Team(data) => Some((i, data)),
            _ => None,
        });
        for (position, (i, data)) in teams.enumerate() {
            let ident = naming::resolve_with_prefix(&data.name, position, "team");
            identifiers[i] = Some(naming::avoid_reserved(ident, reserved, "team"));
        }

        let visited = vec![false; graph.len()];
        Self {
            graph,
            order,
            agents,
            identifiers,
            reserved: reserved.iter().map(|name| name.to_string()).collect(),
            visited,
            emitted: 0,
        }
    }

    /// The resolved identifier of an Agent or Team node.
    pub(super) fn identifier(&self, index: NodeIndex) -> &str {
        self.identifiers[index].as_deref().unwrap_or_default()
    }

    /// Names resolved identifiers must not take.
    pub(super) fn reserved(&self) -> &[String] {
        &self.reserved
    }

    /// Marks a node visited. Returns `false` if it already was.
    pub(super) fn mark_visited(&mut self, index: NodeIndex) -> bool {
        !std::mem::replace(&mut self.visited[index], true)
    }

    pub(super) fn record_emitted(&mut self) {
        self.emitted += 1;
    }

    pub(super) fn emitted(&self) -> usize {
        self.emitted
    }

    pub(super) fn any_of(&self, predicate: impl Fn(NodeType) -> bool) -> bool {
        self.graph.nodes().iter().any(|n| predicate(n.node_type()))
    }
}
