use crate::error::WorkflowLoadError;
use serde::{Deserialize, Serialize};
use std::fs;

fn default_function_name() -> String {
    "run_workflow".to_string()
}

fn default_sample_input() -> String {
    "Hello, world!".to_string()
}

fn default_runtime_module() -> String {
    "agentflow".to_string()
}

fn default_indent_width() -> usize {
    4
}

fn default_header() -> bool {
    true
}

/// Knobs for the generated program. Every field has a default, so a partial JSON
/// document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    /// Name of the generated function in the procedural format.
    #[serde(default = "default_function_name")]
    pub function_name: String,
    /// Placeholder input passed by the generated entry point.
    #[serde(default = "default_sample_input")]
    pub sample_input: String,
    /// Module the agent runtime types are imported from.
    #[serde(default = "default_runtime_module")]
    pub runtime_module: String,
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
    /// Emit the "generated file" banner at the top.
    #[serde(default = "default_header")]
    pub header: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            function_name: default_function_name(),
            sample_input: default_sample_input(),
            runtime_module: default_runtime_module(),
            indent_width: default_indent_width(),
            header: default_header(),
        }
    }
}

impl CompilerOptions {
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
