use super::condition::ConditionGroup;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The `(entity type, event)` pair that causes a rule's conditions to be
/// checked, plus an optional debounce window applied by the event pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerDescriptor {
    pub entity_type: String,
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debounce_ms: Option<u64>,
}

/// A typed, parameterized effect applied when a rule's conditions match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default)]
    pub params: Map<String, Value>,
    /// When set, a failure of this action does not abort the remaining list.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub continue_on_error: bool,
}

/// A compiled automation rule.
///
/// Constructed once by [`flow_to_rule`](crate::flow::flow_to_rule) from an
/// authored graph and read-only thereafter; a rule edit produces a new
/// compiled `Rule` rather than mutating this one in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub trigger: TriggerDescriptor,
    pub conditions: ConditionGroup,
    pub actions: Vec<Action>,
}
