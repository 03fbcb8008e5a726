//! Condition evaluation.
//!
//! Everything here is a pure, synchronous function of its arguments: no
//! I/O, no shared mutable state, safe to call concurrently on shared
//! immutable rule data. Evaluation never errors — malformed conditions
//! simply fail to match, so one bad condition in a stored rule set cannot
//! crash entity-event processing.

mod context;
mod field;
mod operators;

pub use context::EvaluationContext;
pub use field::get_field_value;

use crate::rule::{Condition, ConditionGroup, ConditionNode, GroupOperator};
use serde_json::Value;

/// Evaluates one condition against an entity snapshot.
///
/// Resolves the condition's dotted field path, dispatches on the operator,
/// then applies `negate` to the result. The `context` is only consulted by
/// group-membership operators (`inGroup`); without one they never match.
pub fn evaluate_condition(
    condition: &Condition,
    entity: &Value,
    context: Option<&EvaluationContext>,
) -> bool {
    let field_value = get_field_value(entity, &condition.field);
    let matched = operators::apply(
        condition.operator,
        field_value,
        &condition.value,
        condition.value2.as_ref(),
        context,
    );
    if condition.negate { !matched } else { matched }
}

/// Evaluates a condition group against an entity snapshot.
///
/// Children that are themselves groups recurse; leaves go through
/// [`evaluate_condition`]. Combination is short-circuit AND/OR per the
/// group's operator. An empty group matches — `true` is the identity for
/// both combinators.
pub fn evaluate_condition_group(
    group: &ConditionGroup,
    entity: &Value,
    context: Option<&EvaluationContext>,
) -> bool {
    if group.conditions.is_empty() {
        return true;
    }
    match group.operator {
        GroupOperator::And => group
            .conditions
            .iter()
            .all(|node| evaluate_node(node, entity, context)),
        GroupOperator::Or => group
            .conditions
            .iter()
            .any(|node| evaluate_node(node, entity, context)),
    }
}

fn evaluate_node(node: &ConditionNode, entity: &Value, context: Option<&EvaluationContext>) -> bool {
    match node {
        ConditionNode::Group(group) => evaluate_condition_group(group, entity, context),
        ConditionNode::Leaf(condition) => evaluate_condition(condition, entity, context),
    }
}
