use clap::Parser;
use hensei::workflow::{EditorSnapshot, SnapshotEdge, SnapshotNode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{Value, json};
use std::fs;

const ROLES: &[&str] = &["Researcher", "Writer", "Critic", "Planner", "Analyst", "Editor"];
const MERGES: &[&str] = &["concat", "first", "last", "custom"];

/// A CLI tool to generate random editor snapshots for the Hensei compiler
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_flow.json")]
    output: String,

    /// Number of step nodes between the start and end nodes
    #[arg(short, long, default_value_t = 20)]
    nodes: usize,

    /// Probability that a step is a control-flow node instead of an agent
    #[arg(long, default_value_t = 0.3)]
    control: f64,

    /// Seed for a reproducible graph
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if !(0.0..=1.0).contains(&cli.control) {
        eprintln!(
            "Error: --control ({}) must be between 0.0 and 1.0",
            cli.control
        );
        std::process::exit(1);
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!(
        "Generating a workflow with {} step(s) (control-flow probability {})...",
        cli.nodes, cli.control
    );

    let snapshot = generate_snapshot(&mut rng, cli.nodes, cli.control);
    let json_output = serde_json::to_string_pretty(&snapshot)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated {} node(s) and {} edge(s) into '{}'",
        snapshot.nodes.len(),
        snapshot.edges.len(),
        cli.output
    );

    Ok(())
}

/// Builds a random DAG: every step hangs off an earlier node, so the graph is
/// acyclic and fully reachable from the start node.
fn generate_snapshot(rng: &mut StdRng, steps: usize, control: f64) -> EditorSnapshot {
    let mut nodes = vec![node("start", "start", json!({}))];
    let mut out_degree = vec![0usize];
    let mut edges = Vec::new();

    for i in 1..=steps {
        let id = format!("n{}", i);
        let (node_type, data) = if rng.random_bool(control) {
            generate_control_node(rng, i)
        } else {
            ("agent", generate_agent_data(rng, i))
        };

        let parent = rng.random_range(0..nodes.len());
        edges.push(connect(&nodes[parent], out_degree[parent], &id, edges.len()));
        out_degree[parent] += 1;

        nodes.push(node(&id, node_type, data));
        out_degree.push(0);
    }

    let last = nodes.len() - 1;
    edges.push(connect(&nodes[last], out_degree[last], "end", edges.len()));
    nodes.push(node("end", "end", json!({})));

    EditorSnapshot { nodes, edges }
}

fn node(id: &str, node_type: &str, data: Value) -> SnapshotNode {
    SnapshotNode {
        id: id.to_string(),
        node_type: node_type.to_string(),
        data,
    }
}

/// The first two edges out of a condition become its true and false branches.
fn connect(source: &SnapshotNode, existing: usize, target: &str, index: usize) -> SnapshotEdge {
    let source_handle = match (source.node_type.as_str(), existing) {
        ("condition", 0) => Some("true".to_string()),
        ("condition", 1) => Some("false".to_string()),
        _ => None,
    };
    SnapshotEdge {
        id: Some(format!("e{}", index + 1)),
        source: source.id.clone(),
        target: target.to_string(),
        source_handle,
        branch_tag: None,
    }
}

fn generate_agent_data(rng: &mut StdRng, i: usize) -> Value {
    let role = ROLES[rng.random_range(0..ROLES.len())];
    json!({
        "label": format!("{} {}", role, i),
        "role": role,
        "temperature": (rng.random_range(0.0..1.0f64) * 10.0).round() / 10.0,
        "maxTokens": rng.random_range(1..=8) * 256,
    })
}

fn generate_control_node(rng: &mut StdRng, i: usize) -> (&'static str, Value) {
    match rng.random_range(0..5) {
        0 => (
            "condition",
            json!({ "condition": format!("len(result) > {}", rng.random_range(10..500)) }),
        ),
        1 => (
            "parallel",
            json!({ "mergeStrategy": MERGES[rng.random_range(0..MERGES.len())] }),
        ),
        2 => (
            "loop",
            json!({ "maxIterations": rng.random_range(1..=5), "stopCondition": "result.done" }),
        ),
        3 => (
            "mcp",
            json!({
                "serverId": "search",
                "serverName": "Search",
                "toolName": "query",
                "parameters": { "q": format!("topic {}", i) },
            }),
        ),
        _ => (
            "team",
            json!({
                "name": format!("Team {}", i),
                "strategy": "round_robin",
                "members": [
                    { "name": "Lead", "role": "Coordinator" },
                    { "name": "Member", "role": ROLES[rng.random_range(0..ROLES.len())] },
                ],
            }),
        ),
    }
}
