//! Tests for flow validation findings.
mod common;
use common::*;
use jidou::prelude::*;
use serde_json::json;

#[test]
fn a_well_formed_flow_has_no_findings() {
    let (nodes, edges) = simple_flow();
    assert_eq!(validate_flow(&nodes, &edges), Vec::<String>::new());
}

#[test]
fn missing_trigger_is_reported() {
    let nodes = vec![action_node("a", "sendNotification")];
    let findings = validate_flow(&nodes, &[]);
    assert!(findings.contains(&"Flow must have a trigger node".to_string()));
}

#[test]
fn every_defect_is_reported_not_just_the_first() {
    // Two triggers AND zero actions: both findings must be present.
    let nodes = vec![
        trigger_node("t1", "transaction", "created"),
        trigger_node("t2", "transaction", "updated"),
    ];
    let edges = vec![edge("t1", "t2")];
    let findings = validate_flow(&nodes, &edges);

    assert!(findings.contains(&"Flow can only have one trigger node".to_string()));
    assert!(findings.contains(&"Flow must have at least one action node".to_string()));
    assert_eq!(findings.len(), 2);
}

#[test]
fn trigger_fields_are_required() {
    let mut trigger = trigger_node("t", "", "");
    trigger.data.entity_type = None;
    let nodes = vec![trigger, action_node("a", "sendNotification")];
    let edges = vec![edge("t", "a")];

    let findings = validate_flow(&nodes, &edges);
    assert!(findings.contains(&"Trigger node 't' is missing an entity type".to_string()));
    assert!(findings.contains(&"Trigger node 't' is missing an event".to_string()));
}

#[test]
fn trigger_must_have_an_outgoing_edge() {
    let nodes = vec![
        trigger_node("t", "transaction", "created"),
        action_node("a", "sendNotification"),
    ];
    let findings = validate_flow(&nodes, &[]);
    assert!(findings.contains(&"Trigger node 't' has no outgoing connections".to_string()));
}

#[test]
fn action_type_is_required() {
    let nodes = vec![
        trigger_node("t", "transaction", "created"),
        action_node("a", ""),
    ];
    let edges = vec![edge("t", "a")];
    let findings = validate_flow(&nodes, &edges);
    assert!(findings.contains(&"Action node 'a' is missing an action type".to_string()));
}

#[test]
fn condition_field_and_operator_are_required() {
    let mut bare = condition_node("c", "", "", json!(null));
    bare.data.operator = None;
    let nodes = vec![
        trigger_node("t", "transaction", "created"),
        bare,
        action_node("a", "sendNotification"),
    ];
    let edges = vec![edge("t", "c"), edge("c", "a")];

    let findings = validate_flow(&nodes, &edges);
    assert!(findings.contains(&"Condition node 'c' is missing a field".to_string()));
    assert!(findings.contains(&"Condition node 'c' is missing an operator".to_string()));
}

#[test]
fn unknown_operators_are_reported() {
    let nodes = vec![
        trigger_node("t", "transaction", "created"),
        condition_node("c", "amount", "someFutureOp", json!(1)),
        action_node("a", "sendNotification"),
    ];
    let edges = vec![edge("t", "c"), edge("c", "a")];

    let findings = validate_flow(&nodes, &edges);
    assert!(
        findings.contains(&"Condition node 'c' has an unknown operator 'someFutureOp'".to_string())
    );
}

#[test]
fn group_operator_must_be_and_or_or() {
    let nodes = vec![
        trigger_node("t", "transaction", "created"),
        group_node("g", "XOR"),
        action_node("a", "sendNotification"),
    ];
    let edges = vec![edge("t", "g"), edge("g", "a")];

    let findings = validate_flow(&nodes, &edges);
    assert!(findings.contains(&"Group node 'g' must use operator \"AND\" or \"OR\"".to_string()));
}

#[test]
fn unreachable_actions_are_named_individually() {
    let nodes = vec![
        trigger_node("t", "transaction", "created"),
        action_node("connected", "setCategory"),
        action_node("stranded", "sendNotification"),
    ];
    let edges = vec![edge("t", "connected")];

    let findings = validate_flow(&nodes, &edges);
    assert!(findings.contains(&"Action node 'stranded' is not connected to the trigger".to_string()));
    assert!(!findings.iter().any(|f| f.contains("'connected'")));
}

#[test]
fn reachability_follows_edges_transitively() {
    let nodes = vec![
        trigger_node("t", "transaction", "created"),
        condition_node("c", "amount", "greaterThan", json!(0)),
        group_node("g", "AND"),
        action_node("deep", "sendNotification"),
    ];
    let edges = vec![edge("t", "c"), edge("c", "g"), edge("g", "deep")];

    assert_eq!(validate_flow(&nodes, &edges), Vec::<String>::new());
}

#[test]
fn duplicate_node_ids_are_reported() {
    let nodes = vec![
        trigger_node("t", "transaction", "created"),
        action_node("dup", "setCategory"),
        action_node("dup", "sendNotification"),
    ];
    let edges = vec![edge("t", "dup")];

    let findings = validate_flow(&nodes, &edges);
    assert!(findings.contains(&"Duplicate node id 'dup'".to_string()));
}
