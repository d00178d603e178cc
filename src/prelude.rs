//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the hensei crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use hensei::prelude::*;
//!
//! # fn run_example() -> Result<(), Box<dyn std::error::Error>> {
//! let snapshot = EditorSnapshot::from_file("path/to/workflow.json")?;
//! let workflow = snapshot.into_workflow()?;
//!
//! let compiled = Compiler::new(DialectChoice::Python).compile(&workflow);
//! println!("{}", compiled.source);
//! # Ok(())
//! # }
//! ```

// Compilation
pub use crate::compiler::{
    CodeGenerator, CompiledWorkflow, Compiler, CompilerBuilder, CompilerOptions, OutputFormat,
    generate, generate_with, select_format,
};
pub use crate::dialect::{Dialect, DialectChoice};

// Graph model
pub use crate::workflow::{
    AgentData, BranchTag, ConditionData, EditorSnapshot, ExternalToolData, IntoWorkflow,
    LoopData, MergePolicy, NodeKind, NodeType, ParallelData, SnapshotConverter, TeamData,
    TeamMember, TriggerData, TriggerKind, Workflow, WorkflowEdge, WorkflowNode,
};

// Error types
pub use crate::error::{ConversionError, WorkflowLoadError};
