use super::definition::{FlowEdge, FlowNode, NodeKind};
use crate::error::FlowCompileError;
use crate::rule::{
    Action, Condition, ConditionGroup, ConditionNode, ConditionOperator, GroupOperator, Rule,
    TriggerDescriptor,
};
use ahash::{AHashMap, AHashSet};

/// Compiles an authored flow graph into a [`Rule`].
///
/// The only unrecoverable shape is a graph with no trigger node; every
/// other defect is expected to have been caught by
/// [`validate_flow`](super::validate_flow) upstream, and compilation is
/// lenient about it (missing node data compiles to empty fields that fail
/// closed at evaluation time).
///
/// Traversal starts at the trigger and follows edges forward. Condition
/// nodes become leaves of the group being assembled, group nodes become
/// nested groups populated from their own outgoing edges, and action nodes
/// are appended to the rule's flat action list regardless of depth. The
/// root group combines with AND.
pub fn flow_to_rule(nodes: &[FlowNode], edges: &[FlowEdge]) -> Result<Rule, FlowCompileError> {
    let trigger = nodes
        .iter()
        .find(|n| n.kind == NodeKind::Trigger)
        .ok_or(FlowCompileError::MissingTrigger)?;

    let mut assembler = RuleAssembler::new(nodes, edges);
    let mut root = ConditionGroup {
        id: "root".to_string(),
        operator: GroupOperator::And,
        conditions: Vec::new(),
    };
    assembler.collect_into(&trigger.id, &mut root);

    Ok(Rule {
        trigger: TriggerDescriptor {
            entity_type: trigger.data.entity_type.clone().unwrap_or_default(),
            event: trigger.data.event.clone().unwrap_or_default(),
            debounce_ms: trigger.data.debounce_ms,
        },
        conditions: root,
        actions: assembler.actions,
    })
}

/// Walks the graph outward from the trigger, assembling the condition tree
/// and the action list. Built fresh per compile call; no graph state is
/// shared or retained.
struct RuleAssembler<'a> {
    nodes: AHashMap<&'a str, &'a FlowNode>,
    adjacency: AHashMap<&'a str, Vec<&'a str>>,
    actions: Vec<Action>,
    visited: AHashSet<&'a str>,
}

impl<'a> RuleAssembler<'a> {
    fn new(nodes: &'a [FlowNode], edges: &'a [FlowEdge]) -> Self {
        let node_index = nodes.iter().map(|n| (n.id.as_str(), n)).collect();
        let mut adjacency: AHashMap<&str, Vec<&str>> = AHashMap::new();
        for edge in edges {
            adjacency
                .entry(edge.source.as_str())
                .or_default()
                .push(edge.target.as_str());
        }
        Self {
            nodes: node_index,
            adjacency,
            actions: Vec::new(),
            visited: AHashSet::new(),
        }
    }

    fn collect_into(&mut self, source_id: &'a str, group: &mut ConditionGroup) {
        // Clone the target list so the traversal below can borrow self mutably.
        let targets = match self.adjacency.get(source_id) {
            Some(targets) => targets.clone(),
            None => return,
        };

        for target_id in targets {
            // The visited set makes a cyclic or diamond-shaped graph
            // terminate; each node contributes once.
            if !self.visited.insert(target_id) {
                continue;
            }
            let Some(node) = self.nodes.get(target_id).copied() else {
                // Edge to a node that does not exist; the validator's
                // problem, not ours.
                continue;
            };
            match node.kind {
                NodeKind::Condition => {
                    group.conditions.push(ConditionNode::Leaf(leaf_from(node)));
                    self.collect_into(target_id, group);
                }
                NodeKind::Group => {
                    let mut nested = ConditionGroup {
                        id: node.id.clone(),
                        operator: group_operator_from(node),
                        conditions: Vec::new(),
                    };
                    self.collect_into(target_id, &mut nested);
                    group.conditions.push(ConditionNode::Group(nested));
                }
                NodeKind::Action => {
                    self.actions.push(action_from(node));
                    self.collect_into(target_id, group);
                }
                // A second trigger wired into the graph adds nothing.
                NodeKind::Trigger => {}
            }
        }
    }
}

fn leaf_from(node: &FlowNode) -> Condition {
    Condition {
        id: node.id.clone(),
        field: node.data.field.clone().unwrap_or_default(),
        operator: node
            .data
            .operator
            .as_deref()
            .map(ConditionOperator::parse)
            .unwrap_or(ConditionOperator::Unsupported),
        value: node.data.value.clone().unwrap_or_default(),
        value2: node.data.value2.clone(),
        negate: node.data.negate.unwrap_or(false),
    }
}

fn group_operator_from(node: &FlowNode) -> GroupOperator {
    match node.data.operator.as_deref() {
        Some("OR") => GroupOperator::Or,
        // AND is the default, including for missing or invalid operators;
        // the validator reports those.
        _ => GroupOperator::And,
    }
}

fn action_from(node: &FlowNode) -> Action {
    Action {
        action_type: node.data.action_type.clone().unwrap_or_default(),
        params: node.data.params.clone().unwrap_or_default(),
        continue_on_error: node.data.continue_on_error.unwrap_or(false),
    }
}
