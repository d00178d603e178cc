use super::definition::Workflow;
use crate::error::ConversionError;

/// A trait for custom data models that can be converted into a Hensei `Workflow`.
///
/// This is the primary extension point for feeding graphs from editors other than
/// the built-in [`EditorSnapshot`](super::EditorSnapshot) format. Implement it on your
/// own structs to provide a translation layer into the compiler's graph model.
///
/// # Example
///
/// ```rust,no_run
/// use hensei::prelude::*;
///
/// struct MyStep { id: String, label: String }
/// struct MyPipeline { steps: Vec<MyStep> }
///
/// impl IntoWorkflow for MyPipeline {
///     fn into_workflow(self) -> Result<Workflow, ConversionError> {
///         let nodes = self
///             .steps
///             .into_iter()
///             .map(|step| WorkflowNode::agent(step.id, AgentData::new(step.label)))
///             .collect();
///         Ok(Workflow::new(nodes, vec![]))
///     }
/// }
/// ```
pub trait IntoWorkflow {
    /// Consumes the object and converts it into a compilable workflow graph.
    fn into_workflow(self) -> Result<Workflow, ConversionError>;
}

impl IntoWorkflow for Workflow {
    fn into_workflow(self) -> Result<Workflow, ConversionError> {
        Ok(self)
    }
}
