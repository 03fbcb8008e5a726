//! Prelude module for convenient imports
//!
//! Re-exports the types and functions most callers need: the flow
//! compiler and validator, the evaluator, and the rule data model.

// Flow compilation and validation
pub use crate::flow::{FlowEdge, FlowNode, NodeData, NodeKind, flow_to_rule, validate_flow};

// Evaluation
pub use crate::eval::{
    EvaluationContext, evaluate_condition, evaluate_condition_group, get_field_value,
};

// Rule data model
pub use crate::rule::{
    Action, Condition, ConditionGroup, ConditionNode, ConditionOperator, GroupOperator, Rule,
    RuleArchive, TriggerDescriptor,
};

// Rule registry and action dispatch
pub use crate::engine::{ActionExecutor, ActionOutcome, RuleSet, run_actions};

// Error types
pub use crate::error::{ActionError, FlowCompileError, RuleParseError};
