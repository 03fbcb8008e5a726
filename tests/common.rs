//! Common test utilities for building flow graphs and entity snapshots.
use jidou::prelude::*;
use serde_json::{Value, json};

#[allow(dead_code)]
pub fn trigger_node(id: &str, entity_type: &str, event: &str) -> FlowNode {
    FlowNode {
        id: id.to_string(),
        kind: NodeKind::Trigger,
        data: NodeData {
            entity_type: Some(entity_type.to_string()),
            event: Some(event.to_string()),
            ..NodeData::default()
        },
    }
}

#[allow(dead_code)]
pub fn condition_node(id: &str, field: &str, operator: &str, value: Value) -> FlowNode {
    FlowNode {
        id: id.to_string(),
        kind: NodeKind::Condition,
        data: NodeData {
            field: Some(field.to_string()),
            operator: Some(operator.to_string()),
            value: Some(value),
            ..NodeData::default()
        },
    }
}

#[allow(dead_code)]
pub fn group_node(id: &str, operator: &str) -> FlowNode {
    FlowNode {
        id: id.to_string(),
        kind: NodeKind::Group,
        data: NodeData {
            operator: Some(operator.to_string()),
            ..NodeData::default()
        },
    }
}

#[allow(dead_code)]
pub fn action_node(id: &str, action_type: &str) -> FlowNode {
    action_node_with_params(id, action_type, json!({}))
}

#[allow(dead_code)]
pub fn action_node_with_params(id: &str, action_type: &str, params: Value) -> FlowNode {
    FlowNode {
        id: id.to_string(),
        kind: NodeKind::Action,
        data: NodeData {
            action_type: Some(action_type.to_string()),
            params: params.as_object().cloned(),
            ..NodeData::default()
        },
    }
}

#[allow(dead_code)]
pub fn edge(source: &str, target: &str) -> FlowEdge {
    FlowEdge {
        id: format!("{}-{}", source, target),
        source: source.to_string(),
        target: target.to_string(),
        source_handle: None,
    }
}

/// The canonical three-node flow: transaction created, amount > 100,
/// set category 5.
#[allow(dead_code)]
pub fn simple_flow() -> (Vec<FlowNode>, Vec<FlowEdge>) {
    let nodes = vec![
        trigger_node("trigger", "transaction", "created"),
        condition_node("amount-check", "amount", "greaterThan", json!(100)),
        action_node_with_params("categorize", "setCategory", json!({ "categoryId": 5 })),
    ];
    let edges = vec![
        edge("trigger", "amount-check"),
        edge("amount-check", "categorize"),
    ];
    (nodes, edges)
}

/// A plausible transaction snapshot with nested payee/category objects.
#[allow(dead_code)]
pub fn transaction_entity(amount: f64) -> Value {
    json!({
        "id": 42,
        "amount": amount,
        "date": "2026-03-15T10:30:00Z",
        "status": "pending",
        "notes": "",
        "payee": { "id": 7, "name": "AMAZON.COM*MKT" },
        "category": {
            "id": 2,
            "name": "Shopping",
            "group": { "id": 1, "name": "Discretionary" }
        },
        "account": { "id": 1, "name": "Checking", "type": "checking" }
    })
}

/// A bare condition for evaluator-level tests.
#[allow(dead_code)]
pub fn condition(field: &str, operator: ConditionOperator, value: Value) -> Condition {
    Condition {
        id: String::new(),
        field: field.to_string(),
        operator,
        value,
        value2: None,
        negate: false,
    }
}
