//! Loader for the visual editor's JSON export.
//!
//! The editor stores its canvas as a list of typed nodes with a free-form `data`
//! record and a list of edges that carry the handle they leave their source
//! through. This module maps that shape onto the canonical [`Workflow`] model.

use super::conversion::IntoWorkflow;
use super::definition::{BranchTag, NodeKind, Workflow, WorkflowEdge, WorkflowNode};
use crate::error::{ConversionError, WorkflowLoadError};
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use tracing::debug;

/// The editor's canvas as exported to JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditorSnapshot {
    #[serde(default)]
    pub nodes: Vec<SnapshotNode>,
    #[serde(default)]
    pub edges: Vec<SnapshotEdge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEdge {
    #[serde(default)]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_tag: Option<BranchTag>,
}

impl SnapshotEdge {
    /// The explicit branch tag, falling back to a `"true"`/`"false"` source handle.
    fn resolve_branch(&self) -> Option<BranchTag> {
        self.branch_tag
            .or_else(|| self.source_handle.as_deref().and_then(BranchTag::parse))
    }
}

impl EditorSnapshot {
    pub fn from_json(json: &str) -> Result<Self, WorkflowLoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &str) -> Result<Self, WorkflowLoadError> {
        let content = fs::read_to_string(path).map_err(|source| WorkflowLoadError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content)
    }
}

impl IntoWorkflow for EditorSnapshot {
    fn into_workflow(self) -> Result<Workflow, ConversionError> {
        SnapshotConverter::new().convert(self)
    }
}

/// Built-in editor type names and the node kind each one parses into.
const BUILTIN_TYPES: &[&str] = &[
    "trigger",
    "agent",
    "mcp",
    "externalTool",
    "condition",
    "parallel",
    "loop",
    "team",
    "start",
    "end",
];

fn is_builtin(name: &str) -> bool {
    BUILTIN_TYPES.contains(&name)
}

/// Parses a node's `data` record according to a built-in type name.
/// Returns `None` for names that are not built in.
fn parse_builtin(builtin: &str, data: Value) -> Option<Result<NodeKind, serde_json::Error>> {
    // Start/End carry no fields; an absent record must still parse for the others.
    let data = if data.is_null() {
        Value::Object(Default::default())
    } else {
        data
    };
    let parsed = match builtin {
        "trigger" => serde_json::from_value(data).map(NodeKind::Trigger),
        "agent" => serde_json::from_value(data).map(NodeKind::Agent),
        "mcp" | "externalTool" => serde_json::from_value(data).map(NodeKind::ExternalTool),
        "condition" => serde_json::from_value(data).map(NodeKind::Condition),
        "parallel" => serde_json::from_value(data).map(NodeKind::Parallel),
        "loop" => serde_json::from_value(data).map(NodeKind::BoundedLoop),
        "team" => serde_json::from_value(data).map(NodeKind::Team),
        "start" => Ok(NodeKind::Start),
        "end" => Ok(NodeKind::End),
        _ => return None,
    };
    Some(parsed)
}

/// Converts an [`EditorSnapshot`] into a [`Workflow`], with optional aliases for
/// editors that name their node types differently.
#[derive(Debug, Clone, Default)]
pub struct SnapshotConverter {
    aliases: AHashMap<String, String>,
}

impl SnapshotConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat nodes of type `user_type_name` as the built-in `builtin_type_name`.
    /// Mappings onto names that are not built in are ignored.
    pub fn with_type_mapping(mut self, user_type_name: &str, builtin_type_name: &str) -> Self {
        if is_builtin(builtin_type_name) {
            self.aliases
                .insert(user_type_name.to_string(), builtin_type_name.to_string());
        }
        self
    }

    pub fn convert(&self, snapshot: EditorSnapshot) -> Result<Workflow, ConversionError> {
        let mut seen = AHashSet::new();
        let mut nodes = Vec::with_capacity(snapshot.nodes.len());

        for raw in snapshot.nodes {
            if !seen.insert(raw.id.clone()) {
                return Err(ConversionError::DuplicateNodeId(raw.id));
            }
            let builtin = self
                .aliases
                .get(&raw.node_type)
                .map(String::as_str)
                .unwrap_or(raw.node_type.as_str());

            let kind = match parse_builtin(builtin, raw.data) {
                Some(parsed) => parsed.map_err(|e| ConversionError::InvalidNodeData {
                    node_id: raw.id.clone(),
                    type_name: raw.node_type.clone(),
                    message: e.to_string(),
                })?,
                None => {
                    debug!(node_id = %raw.id, type_name = %raw.node_type, "Unrecognised node type");
                    NodeKind::Unknown {
                        type_name: raw.node_type.clone(),
                    }
                }
            };
            nodes.push(WorkflowNode::new(raw.id, kind));
        }

        let edges = snapshot
            .edges
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                let branch = raw.resolve_branch();
                WorkflowEdge {
                    id: raw
                        .id
                        .unwrap_or_else(|| format!("e{}-{}-{}", index, raw.source, raw.target)),
                    source: raw.source,
                    target: raw.target,
                    branch,
                }
            })
            .collect();

        Ok(Workflow::new(nodes, edges))
    }
}
