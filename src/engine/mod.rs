//! In-memory rule registry and action dispatch for the event-trigger
//! pipeline. The registry only reads its own arguments during a lookup,
//! so a shared `RuleSet` can serve concurrent evaluations.

use crate::error::ActionError;
use crate::eval::{EvaluationContext, evaluate_condition_group};
use crate::rule::{Action, Rule};
use ahash::AHashMap;
use serde_json::Value;
use tracing::{debug, trace};

/// Executes a matched rule's actions.
///
/// Implementations own the actual side effects — updating entities,
/// sending notifications — while the engine sequences the calls and
/// applies each action's `continue_on_error` flag.
pub trait ActionExecutor {
    fn execute(&mut self, action: &Action) -> Result<(), ActionError>;
}

/// Compiled rules indexed by `(entity type, event)`.
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: AHashMap<(String, String), Vec<Rule>>,
    len: usize,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rule: Rule) {
        let key = (
            rule.trigger.entity_type.clone(),
            rule.trigger.event.clone(),
        );
        self.rules.entry(key).or_default().push(rule);
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Rules registered for an `(entity type, event)` pair, in insertion
    /// order.
    pub fn rules_for(&self, entity_type: &str, event: &str) -> &[Rule] {
        self.rules
            .get(&(entity_type.to_string(), event.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Evaluates every rule registered for the event against an entity
    /// snapshot and returns the matches, preserving registration order.
    pub fn matching_rules(
        &self,
        entity_type: &str,
        event: &str,
        entity: &Value,
        context: Option<&EvaluationContext>,
    ) -> Vec<&Rule> {
        let candidates = self.rules_for(entity_type, event);
        let matched: Vec<&Rule> = candidates
            .iter()
            .filter(|rule| evaluate_condition_group(&rule.conditions, entity, context))
            .collect();
        debug!(
            entity_type,
            event,
            candidates = candidates.len(),
            matched = matched.len(),
            "rule evaluation pass"
        );
        matched
    }
}

/// The result of running a matched rule's action list.
#[derive(Debug, Default)]
pub struct ActionOutcome {
    pub executed: usize,
    /// Failures that were skipped past because the action allowed it.
    pub tolerated: Vec<ActionError>,
}

/// Runs a rule's actions in order through the executor.
///
/// A failing action aborts the remaining list unless it is flagged
/// `continue_on_error`, in which case the failure is recorded on the
/// outcome and execution moves on.
pub fn run_actions(
    actions: &[Action],
    executor: &mut dyn ActionExecutor,
) -> Result<ActionOutcome, ActionError> {
    let mut outcome = ActionOutcome::default();
    for action in actions {
        trace!(action = %action.action_type, "executing action");
        match executor.execute(action) {
            Ok(()) => outcome.executed += 1,
            Err(err) if action.continue_on_error => {
                debug!(action = %action.action_type, error = %err, "action failed, continuing");
                outcome.tolerated.push(err);
            }
            Err(err) => return Err(err),
        }
    }
    Ok(outcome)
}
