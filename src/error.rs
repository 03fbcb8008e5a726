use thiserror::Error;

/// Errors that can occur while compiling a flow graph into a rule.
///
/// Malformed-but-recoverable graphs (unknown operators, missing node data,
/// unreachable actions) are the validator's territory and never surface
/// here; compilation only refuses a graph it cannot anchor at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowCompileError {
    #[error("flow has no trigger node; a rule cannot be compiled without one")]
    MissingTrigger,
}

/// Errors that can occur when reading rules from an external encoding.
#[derive(Error, Debug, Clone)]
pub enum RuleParseError {
    #[error("failed to parse rule JSON: {0}")]
    Json(String),

    #[error("could not read rule archive '{path}': {message}")]
    Io { path: String, message: String },
}

/// Errors reported by an [`ActionExecutor`](crate::engine::ActionExecutor)
/// while running a matched rule's actions.
#[derive(Error, Debug, Clone)]
pub enum ActionError {
    #[error("action '{action_type}' is not known for entity type '{entity_type}'")]
    UnknownAction {
        action_type: String,
        entity_type: String,
    },

    #[error("action '{action_type}' failed: {message}")]
    Failed {
        action_type: String,
        message: String,
    },
}
