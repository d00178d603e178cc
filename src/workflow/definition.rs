use super::node_data::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The complete snapshot of a workflow graph, ready for compilation.
/// This is the target structure for any editor or custom format conversion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workflow {
    pub nodes: Vec<WorkflowNode>,
    pub edges: Vec<WorkflowEdge>,
}

impl Workflow {
    pub fn new(nodes: Vec<WorkflowNode>, edges: Vec<WorkflowEdge>) -> Self {
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A single pipeline step in the workflow graph.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowNode {
    pub id: String,
    pub kind: NodeKind,
}

impl WorkflowNode {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    pub fn agent(id: impl Into<String>, data: AgentData) -> Self {
        Self::new(id, NodeKind::Agent(data))
    }

    pub fn start(id: impl Into<String>) -> Self {
        Self::new(id, NodeKind::Start)
    }

    pub fn end(id: impl Into<String>) -> Self {
        Self::new(id, NodeKind::End)
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }
}

/// The type of a node together with its type-specific data record.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Trigger(TriggerData),
    Agent(AgentData),
    ExternalTool(ExternalToolData),
    Condition(ConditionData),
    Parallel(ParallelData),
    BoundedLoop(LoopData),
    Team(TeamData),
    Start,
    End,
    /// A node type the loader did not recognise. Carried through so the
    /// generated code can point at it instead of failing.
    Unknown { type_name: String },
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Trigger(_) => NodeType::Trigger,
            NodeKind::Agent(_) => NodeType::Agent,
            NodeKind::ExternalTool(_) => NodeType::ExternalTool,
            NodeKind::Condition(_) => NodeType::Condition,
            NodeKind::Parallel(_) => NodeType::Parallel,
            NodeKind::BoundedLoop(_) => NodeType::BoundedLoop,
            NodeKind::Team(_) => NodeType::Team,
            NodeKind::Start => NodeType::Start,
            NodeKind::End => NodeType::End,
            NodeKind::Unknown { .. } => NodeType::Unknown,
        }
    }
}

/// Field-less discriminant of [`NodeKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeType {
    Trigger,
    Agent,
    ExternalTool,
    Condition,
    Parallel,
    BoundedLoop,
    Team,
    Start,
    End,
    Unknown,
}

impl NodeType {
    /// Node types whose generated code suspends on an external call.
    pub fn is_suspending(self) -> bool {
        matches!(
            self,
            NodeType::Agent | NodeType::ExternalTool | NodeType::Team
        )
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeType::Trigger => "trigger",
            NodeType::Agent => "agent",
            NodeType::ExternalTool => "external tool",
            NodeType::Condition => "condition",
            NodeType::Parallel => "parallel",
            NodeType::BoundedLoop => "loop",
            NodeType::Team => "team",
            NodeType::Start => "start",
            NodeType::End => "end",
            NodeType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Marks which outcome of a Condition node an edge feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchTag {
    True,
    False,
}

impl BranchTag {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "true" => Some(BranchTag::True),
            "false" => Some(BranchTag::False),
            _ => None,
        }
    }
}

/// A directed control/data-flow connection between two nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub branch: Option<BranchTag>,
}

impl WorkflowEdge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            branch: None,
        }
    }

    pub fn with_branch(mut self, branch: BranchTag) -> Self {
        self.branch = Some(branch);
        self
    }
}
