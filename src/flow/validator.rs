use super::definition::{FlowEdge, FlowNode, NodeKind};
use crate::catalog;
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use std::collections::VecDeque;

/// Statically checks a flow graph for structural correctness.
///
/// Returns one human-readable string per defect found, so the authoring UI
/// can surface every problem at once; an empty list means the graph is
/// valid. Never errors — validation findings are data, not exceptions.
pub fn validate_flow(nodes: &[FlowNode], edges: &[FlowEdge]) -> Vec<String> {
    let mut errors = Vec::new();

    let triggers: Vec<&FlowNode> = nodes.iter().filter(|n| n.kind == NodeKind::Trigger).collect();
    match triggers.len() {
        0 => errors.push("Flow must have a trigger node".to_string()),
        1 => {}
        _ => errors.push("Flow can only have one trigger node".to_string()),
    }

    if let Some(trigger) = triggers.first() {
        if trigger.data.entity_type.as_deref().unwrap_or("").is_empty() {
            errors.push(format!(
                "Trigger node '{}' is missing an entity type",
                trigger.id
            ));
        }
        if trigger.data.event.as_deref().unwrap_or("").is_empty() {
            errors.push(format!("Trigger node '{}' is missing an event", trigger.id));
        }
        if !edges.iter().any(|e| e.source == trigger.id) {
            errors.push(format!(
                "Trigger node '{}' has no outgoing connections",
                trigger.id
            ));
        }
    }

    let actions: Vec<&FlowNode> = nodes.iter().filter(|n| n.kind == NodeKind::Action).collect();
    if actions.is_empty() {
        errors.push("Flow must have at least one action node".to_string());
    }
    for action in &actions {
        if action.data.action_type.as_deref().unwrap_or("").is_empty() {
            errors.push(format!(
                "Action node '{}' is missing an action type",
                action.id
            ));
        }
    }

    for condition in nodes.iter().filter(|n| n.kind == NodeKind::Condition) {
        if condition.data.field.as_deref().unwrap_or("").is_empty() {
            errors.push(format!(
                "Condition node '{}' is missing a field",
                condition.id
            ));
        }
        match condition.data.operator.as_deref() {
            None | Some("") => errors.push(format!(
                "Condition node '{}' is missing an operator",
                condition.id
            )),
            Some(name) if !catalog::is_known_operator(name) => errors.push(format!(
                "Condition node '{}' has an unknown operator '{}'",
                condition.id, name
            )),
            Some(_) => {}
        }
    }

    for group in nodes.iter().filter(|n| n.kind == NodeKind::Group) {
        if !matches!(group.data.operator.as_deref(), Some("AND") | Some("OR")) {
            errors.push(format!(
                "Group node '{}' must use operator \"AND\" or \"OR\"",
                group.id
            ));
        }
    }

    for id in nodes.iter().map(|n| n.id.as_str()).duplicates() {
        errors.push(format!("Duplicate node id '{}'", id));
    }

    // Every action must be reachable from the trigger by following edges
    // forward; each stranded one is flagged individually.
    if let Some(trigger) = triggers.first() {
        let reachable = reachable_from(&trigger.id, edges);
        for action in &actions {
            if !reachable.contains(action.id.as_str()) {
                errors.push(format!(
                    "Action node '{}' is not connected to the trigger",
                    action.id
                ));
            }
        }
    }

    errors
}

fn reachable_from<'a>(start: &'a str, edges: &'a [FlowEdge]) -> AHashSet<&'a str> {
    let mut adjacency: AHashMap<&str, Vec<&str>> = AHashMap::new();
    for edge in edges {
        adjacency
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
    }

    let mut reachable = AHashSet::new();
    reachable.insert(start);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        if let Some(targets) = adjacency.get(current) {
            for &target in targets {
                if reachable.insert(target) {
                    queue.push_back(target);
                }
            }
        }
    }
    reachable
}
