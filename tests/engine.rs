//! Tests for the rule-set registry, action dispatch, and rule archives.
mod common;
use common::*;
use jidou::prelude::*;
use serde_json::json;

#[derive(Default)]
struct RecordingExecutor {
    executed: Vec<String>,
    fail_on: Vec<String>,
}

impl RecordingExecutor {
    fn failing_on(action_type: &str) -> Self {
        Self {
            fail_on: vec![action_type.to_string()],
            ..Self::default()
        }
    }
}

impl ActionExecutor for RecordingExecutor {
    fn execute(&mut self, action: &Action) -> Result<(), ActionError> {
        if self.fail_on.contains(&action.action_type) {
            return Err(ActionError::Failed {
                action_type: action.action_type.clone(),
                message: "simulated failure".to_string(),
            });
        }
        self.executed.push(action.action_type.clone());
        Ok(())
    }
}

fn compiled_simple_rule() -> Rule {
    let (nodes, edges) = simple_flow();
    flow_to_rule(&nodes, &edges).unwrap()
}

#[test]
fn rule_set_indexes_by_entity_and_event() {
    let mut rules = RuleSet::new();
    rules.insert(compiled_simple_rule());
    assert_eq!(rules.len(), 1);

    assert_eq!(rules.rules_for("transaction", "created").len(), 1);
    assert!(rules.rules_for("transaction", "deleted").is_empty());
    assert!(rules.rules_for("account", "created").is_empty());
}

#[test]
fn matching_rules_evaluates_conditions() {
    let mut rules = RuleSet::new();
    rules.insert(compiled_simple_rule());

    let matched = rules.matching_rules("transaction", "created", &json!({ "amount": 150 }), None);
    assert_eq!(matched.len(), 1);

    let matched = rules.matching_rules("transaction", "created", &json!({ "amount": 50 }), None);
    assert!(matched.is_empty());
}

#[test]
fn matches_preserve_registration_order() {
    let mut rules = RuleSet::new();

    let mut first = compiled_simple_rule();
    first.actions[0].action_type = "first".to_string();
    let mut second = compiled_simple_rule();
    second.actions[0].action_type = "second".to_string();

    rules.insert(first);
    rules.insert(second);

    let matched = rules.matching_rules("transaction", "created", &json!({ "amount": 150 }), None);
    let order: Vec<&str> = matched
        .iter()
        .map(|r| r.actions[0].action_type.as_str())
        .collect();
    assert_eq!(order, vec!["first", "second"]);
}

fn action(action_type: &str, continue_on_error: bool) -> Action {
    Action {
        action_type: action_type.to_string(),
        params: serde_json::Map::new(),
        continue_on_error,
    }
}

#[test]
fn actions_run_in_order() {
    let actions = vec![action("categorize", false), action("notify", false)];
    let mut executor = RecordingExecutor::default();

    let outcome = run_actions(&actions, &mut executor).unwrap();
    assert_eq!(outcome.executed, 2);
    assert!(outcome.tolerated.is_empty());
    assert_eq!(executor.executed, vec!["categorize", "notify"]);
}

#[test]
fn a_failing_action_aborts_the_remaining_list() {
    let actions = vec![
        action("categorize", false),
        action("explodes", false),
        action("notify", false),
    ];
    let mut executor = RecordingExecutor::failing_on("explodes");

    let err = run_actions(&actions, &mut executor).unwrap_err();
    assert!(err.to_string().contains("explodes"));
    // Nothing after the failure ran.
    assert_eq!(executor.executed, vec!["categorize"]);
}

#[test]
fn continue_on_error_skips_past_the_failure() {
    let actions = vec![
        action("categorize", false),
        action("explodes", true),
        action("notify", false),
    ];
    let mut executor = RecordingExecutor::failing_on("explodes");

    let outcome = run_actions(&actions, &mut executor).unwrap();
    assert_eq!(outcome.executed, 2);
    assert_eq!(outcome.tolerated.len(), 1);
    assert_eq!(executor.executed, vec!["categorize", "notify"]);
}

#[test]
fn archives_round_trip_through_disk() {
    let archive = RuleArchive::new(vec![compiled_simple_rule()]);
    let path = std::env::temp_dir().join("jidou-archive-roundtrip.json");
    let path = path.to_str().unwrap();

    archive.save(path).unwrap();
    let restored = RuleArchive::from_file(path).unwrap();
    std::fs::remove_file(path).ok();

    assert_eq!(restored.rules.len(), 1);
    assert_eq!(restored.rules[0], archive.rules[0]);
}

#[test]
fn archive_rejects_malformed_json() {
    let err = RuleArchive::from_json("{ not json").unwrap_err();
    assert!(matches!(err, RuleParseError::Json(_)));
}

#[test]
fn missing_archive_file_is_an_io_error() {
    let err = RuleArchive::from_file("/nonexistent/jidou-rules.json").unwrap_err();
    assert!(matches!(err, RuleParseError::Io { .. }));
}
