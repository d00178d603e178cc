use thiserror::Error;

/// Errors that can occur when converting an editor or custom format into a `Workflow`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Node '{node_id}' of type '{type_name}' has invalid data: {message}")]
    InvalidNodeData {
        node_id: String,
        type_name: String,
        message: String,
    },

    #[error("Node id '{0}' is used by more than one node")]
    DuplicateNodeId(String),

    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}

/// Errors that can occur while loading a workflow snapshot or compiler options.
#[derive(Error, Debug)]
pub enum WorkflowLoadError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}
