//! # Jidou - Automation Rule Engine
//!
//! **Jidou** compiles visually-authored automation flows into canonical
//! rules and evaluates those rules against live entity snapshots. It is
//! the decision core of a personal-finance automation layer: accounts,
//! transactions, payees, and the rest of the household ledger raise
//! events, and rules decide which actions fire in response.
//!
//! ## Core Workflow
//!
//! 1. **Author**: the rule-builder UI produces a graph of typed nodes
//!    (trigger, condition, group, action) and edges.
//! 2. **Validate**: [`flow::validate_flow`] statically checks the graph
//!    and returns every defect as a human-readable string, so the UI can
//!    surface all problems at once.
//! 3. **Compile**: [`flow::flow_to_rule`] turns the graph into a
//!    [`rule::Rule`] — a trigger descriptor, a nested condition tree, and
//!    an ordered action list.
//! 4. **Evaluate**: at event time, [`eval::evaluate_condition_group`]
//!    walks the same condition tree against an entity snapshot (plus an
//!    optional [`eval::EvaluationContext`] for group-membership lookups)
//!    to decide whether the rule's actions fire.
//!
//! The compiler and the evaluator agree exactly on the condition-tree
//! shape; that contract is what ties the two halves together.
//!
//! ## Quick Start
//!
//! ```rust
//! use jidou::prelude::*;
//! use serde_json::json;
//!
//! // When a transaction is created with an amount over 100, categorize it.
//! let nodes = vec![
//!     FlowNode {
//!         id: "t1".into(),
//!         kind: NodeKind::Trigger,
//!         data: NodeData {
//!             entity_type: Some("transaction".into()),
//!             event: Some("created".into()),
//!             ..NodeData::default()
//!         },
//!     },
//!     FlowNode {
//!         id: "c1".into(),
//!         kind: NodeKind::Condition,
//!         data: NodeData {
//!             field: Some("amount".into()),
//!             operator: Some("greaterThan".into()),
//!             value: Some(json!(100)),
//!             ..NodeData::default()
//!         },
//!     },
//!     FlowNode {
//!         id: "a1".into(),
//!         kind: NodeKind::Action,
//!         data: NodeData {
//!             action_type: Some("setCategory".into()),
//!             ..NodeData::default()
//!         },
//!     },
//! ];
//! let edges = vec![
//!     FlowEdge { id: "e1".into(), source: "t1".into(), target: "c1".into(), source_handle: None },
//!     FlowEdge { id: "e2".into(), source: "c1".into(), target: "a1".into(), source_handle: None },
//! ];
//!
//! assert!(validate_flow(&nodes, &edges).is_empty());
//! let rule = flow_to_rule(&nodes, &edges)?;
//!
//! assert!(evaluate_condition_group(&rule.conditions, &json!({ "amount": 150 }), None));
//! assert!(!evaluate_condition_group(&rule.conditions, &json!({ "amount": 50 }), None));
//! # Ok::<(), jidou::error::FlowCompileError>(())
//! ```

pub mod catalog;
pub mod engine;
pub mod error;
pub mod eval;
pub mod flow;
pub mod prelude;
pub mod rule;
