use crate::workflow::{NodeType, WorkflowNode};
use serde::Serialize;
use std::fmt;

/// The overall shape of the generated program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Agent declarations wired into one declarative chain.
    Chain,
    /// A single generated function with explicit control flow.
    Procedural,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Chain => f.write_str("chain"),
            OutputFormat::Procedural => f.write_str("procedural"),
        }
    }
}

/// Node types that need the procedural shape. Unknown types are included so the
/// walker can leave a comment where they sit.
const PROCEDURAL_TYPES: &[NodeType] = &[
    NodeType::Condition,
    NodeType::Parallel,
    NodeType::BoundedLoop,
    NodeType::ExternalTool,
    NodeType::Trigger,
    NodeType::Team,
    NodeType::Unknown,
];

/// Chooses the output shape from the node types present, ignoring edges.
pub fn select_format(nodes: &[WorkflowNode]) -> OutputFormat {
    if nodes
        .iter()
        .any(|node| PROCEDURAL_TYPES.contains(&node.node_type()))
    {
        OutputFormat::Procedural
    } else {
        OutputFormat::Chain
    }
}
