//! Common test utilities for building workflow graphs.
use hensei::prelude::*;

#[allow(dead_code)]
pub fn agent(id: &str, name: &str) -> WorkflowNode {
    WorkflowNode::agent(id, AgentData::new(name))
}

#[allow(dead_code)]
pub fn edge(source: &str, target: &str) -> WorkflowEdge {
    WorkflowEdge::new(format!("{}->{}", source, target), source, target)
}

#[allow(dead_code)]
pub fn branch(source: &str, target: &str, tag: BranchTag) -> WorkflowEdge {
    edge(source, target).with_branch(tag)
}

#[allow(dead_code)]
pub fn condition(id: &str, expression: &str) -> WorkflowNode {
    WorkflowNode::new(id, NodeKind::Condition(ConditionData::new(expression)))
}

#[allow(dead_code)]
pub fn parallel(id: &str, merge: MergePolicy) -> WorkflowNode {
    WorkflowNode::new(id, NodeKind::Parallel(ParallelData { merge }))
}

#[allow(dead_code)]
pub fn bounded_loop(id: &str, cap: u32, stop: &str) -> WorkflowNode {
    WorkflowNode::new(id, NodeKind::BoundedLoop(LoopData::new(cap, stop)))
}

/// Creates a linear chain of `n` agents named `Agent One`, `Agent Two`, ...
///
/// Logic: `a1 -> a2 -> ... -> an`
#[allow(dead_code)]
pub fn linear_chain(names: &[&str]) -> Workflow {
    let nodes = names
        .iter()
        .enumerate()
        .map(|(i, name)| agent(&format!("a{}", i + 1), name))
        .collect();
    let edges = (1..names.len())
        .map(|i| edge(&format!("a{}", i), &format!("a{}", i + 1)))
        .collect();
    Workflow::new(nodes, edges)
}

/// Creates a branching workflow.
///
/// Logic: `start -> check -> (true: writer, false: editor) -> end`
#[allow(dead_code)]
pub fn branching_workflow() -> Workflow {
    Workflow::new(
        vec![
            WorkflowNode::start("start"),
            condition("check", "result.score > 0.5"),
            agent("writer", "Writer"),
            agent("editor", "Editor"),
            WorkflowNode::end("end"),
        ],
        vec![
            edge("start", "check"),
            branch("check", "writer", BranchTag::True),
            branch("check", "editor", BranchTag::False),
            edge("writer", "end"),
            edge("editor", "end"),
        ],
    )
}

/// Creates a workflow with a parallel fan-out over two agents.
///
/// Logic: `fan -> (researcher | analyst)` merged with `merge`
#[allow(dead_code)]
pub fn fan_out_workflow(merge: MergePolicy) -> Workflow {
    Workflow::new(
        vec![
            parallel("fan", merge),
            agent("researcher", "Researcher"),
            agent("analyst", "Analyst"),
        ],
        vec![edge("fan", "researcher"), edge("fan", "analyst")],
    )
}

/// A small editor export touching every node type.
#[allow(dead_code)]
pub const FULL_SNAPSHOT_JSON: &str = r#"{
  "nodes": [
    { "id": "t", "type": "trigger", "data": { "triggerType": "schedule", "schedule": "0 9 * * *" } },
    { "id": "s", "type": "start", "data": {} },
    { "id": "r", "type": "agent", "data": { "label": "Research Lead", "role": "Finds sources", "model": "gpt-4o-mini", "temperature": 0.2, "maxTokens": 2048, "systemPrompt": "Be thorough." } },
    { "id": "m", "type": "mcp", "data": { "serverId": "brave", "serverName": "Brave Search", "toolName": "web_search", "parameters": { "query": "rust compilers" } } },
    { "id": "c", "type": "condition", "data": { "condition": "len(result) > 100", "trueLabel": "Long enough", "falseLabel": "Too short" } },
    { "id": "l", "type": "loop", "data": { "maxIterations": 4, "stopCondition": "result.done" } },
    { "id": "w", "type": "agent", "data": { "label": "Writer" } },
    { "id": "p", "type": "parallel", "data": { "mergeStrategy": "last" } },
    { "id": "x", "type": "agent", "data": { "label": "Critic" } },
    { "id": "y", "type": "agent", "data": { "label": "Fact Checker" } },
    { "id": "team", "type": "team", "data": { "name": "Review Board", "strategy": "round_robin", "maxRounds": 2, "members": [ { "name": "Lead", "role": "Chair" }, { "name": "", "role": "Scribe" } ] } },
    { "id": "e", "type": "end", "data": {} }
  ],
  "edges": [
    { "id": "e1", "source": "t", "target": "s" },
    { "id": "e2", "source": "s", "target": "r" },
    { "id": "e3", "source": "r", "target": "m" },
    { "id": "e4", "source": "m", "target": "c" },
    { "id": "e5", "source": "c", "target": "l", "sourceHandle": "true" },
    { "id": "e6", "source": "c", "target": "p", "sourceHandle": "false" },
    { "id": "e7", "source": "l", "target": "w" },
    { "id": "e8", "source": "p", "target": "x" },
    { "id": "e9", "source": "p", "target": "y" },
    { "id": "e10", "source": "w", "target": "team" },
    { "id": "e11", "source": "team", "target": "e" }
  ]
}"#;
