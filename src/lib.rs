//! # Hensei - Workflow Graph Compiler
//!
//! **Hensei** compiles the node graphs drawn in a visual agent-pipeline editor into
//! readable source code. A graph of typed steps (agent calls, branches, parallel
//! fan-out, bounded loops, external tool calls, triggers and agent teams) is
//! ordered, lowered into structured control flow and printed in one of several
//! target dialects.
//!
//! ## Core Workflow
//!
//! 1.  **Load the Graph**: Parse an editor export with [`EditorSnapshot`](workflow::EditorSnapshot),
//!     or implement [`IntoWorkflow`](workflow::IntoWorkflow) for your own format.
//! 2.  **Configure**: Use [`Compiler::builder`](compiler::Compiler::builder) to pick a dialect and
//!     tune the generated program.
//! 3.  **Compile**: [`Compiler::compile`](compiler::Compiler::compile) returns the source text
//!     together with the chosen output format and the dependency order.
//!
//! Graphs made only of agents compile to a declarative *chain*; anything with
//! control flow compiles to a single *procedural* function. Compilation never
//! fails: dangling edges are skipped and unknown node types leave a comment.
//!
//! ## Quick Start
//!
//! ```rust
//! use hensei::prelude::*;
//!
//! let nodes = vec![
//!     WorkflowNode::agent("1", AgentData::new("Researcher")),
//!     WorkflowNode::agent("2", AgentData::new("Writer")),
//! ];
//! let edges = vec![WorkflowEdge::new("e1", "1", "2")];
//!
//! let source = generate(&nodes, &edges);
//! assert!(source.contains("flow=\"researcher -> writer\""));
//!
//! let compiled = Compiler::builder()
//!     .dialect(DialectChoice::TypeScript)
//!     .build()
//!     .compile(&Workflow::new(nodes, edges));
//! assert_eq!(compiled.format, OutputFormat::Chain);
//! ```

pub mod compiler;
pub mod dialect;
pub mod error;
pub mod graph;
pub mod prelude;
pub mod workflow;
