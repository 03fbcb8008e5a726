use clap::{Parser, Subcommand};
use jidou::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::time::Instant;

/// The on-disk flow format: the node/edge arrays the rule builder exports.
#[derive(Deserialize)]
struct FlowFile {
    nodes: Vec<FlowNode>,
    edges: Vec<FlowEdge>,
}

/// Validate, compile, and evaluate automation rule flows
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a flow JSON file for structural defects
    Validate {
        /// Path to the flow JSON file
        flow_path: String,
    },
    /// Compile a flow JSON file into a rule
    Compile {
        /// Path to the flow JSON file
        flow_path: String,
        /// Write the compiled rule JSON here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Compile a flow and evaluate its conditions against an entity snapshot
    Eval {
        /// Path to the flow JSON file
        flow_path: String,
        /// Path to the entity snapshot JSON file
        entity_path: String,
    },
}

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Validate { flow_path } => run_validate(&flow_path),
        Command::Compile { flow_path, output } => run_compile(&flow_path, output.as_deref()),
        Command::Eval {
            flow_path,
            entity_path,
        } => run_eval(&flow_path, &entity_path),
    }
}

fn run_validate(flow_path: &str) {
    let flow = load_flow(flow_path);

    let start = Instant::now();
    let findings = validate_flow(&flow.nodes, &flow.edges);
    let duration = start.elapsed();

    if findings.is_empty() {
        println!("Flow is valid ({} nodes, {} edges)", flow.nodes.len(), flow.edges.len());
    } else {
        println!("Found {} problem(s):", findings.len());
        for finding in &findings {
            println!("  - {}", finding);
        }
    }
    println!("\nValidated in {:?}", duration);

    if !findings.is_empty() {
        std::process::exit(1);
    }
}

fn run_compile(flow_path: &str, output: Option<&str>) {
    let flow = load_flow(flow_path);
    report_findings(&flow);

    let start = Instant::now();
    let rule = flow_to_rule(&flow.nodes, &flow.edges)
        .unwrap_or_else(|e| exit_with_error(&format!("Compilation failed: {}", e)));
    let duration = start.elapsed();

    let json = serde_json::to_string_pretty(&rule)
        .unwrap_or_else(|e| exit_with_error(&format!("Could not serialize rule: {}", e)));

    match output {
        Some(path) => {
            fs::write(path, json).unwrap_or_else(|e| {
                exit_with_error(&format!("Could not write rule to '{}': {}", path, e))
            });
            println!("Compiled rule written to {}", path);
        }
        None => println!("{}", json),
    }
    eprintln!("\nCompiled in {:?}", duration);
}

fn run_eval(flow_path: &str, entity_path: &str) {
    let flow = load_flow(flow_path);
    report_findings(&flow);

    let entity: Value = load_json(entity_path);

    let compile_start = Instant::now();
    let rule = flow_to_rule(&flow.nodes, &flow.edges)
        .unwrap_or_else(|e| exit_with_error(&format!("Compilation failed: {}", e)));
    let compile_duration = compile_start.elapsed();

    let eval_start = Instant::now();
    let matched = evaluate_condition_group(&rule.conditions, &entity, None);
    let eval_duration = eval_start.elapsed();

    println!(
        "Trigger: {} / {}",
        rule.trigger.entity_type, rule.trigger.event
    );
    if matched {
        println!("-> Conditions MATCH; {} action(s) would fire:", rule.actions.len());
        for action in &rule.actions {
            println!("   - {}", action.action_type);
        }
    } else {
        println!("-> Conditions do not match; no actions fire");
    }

    println!("\n--- Performance Summary ---");
    println!("Compilation: {:?}", compile_duration);
    println!("Evaluation:  {:?}", eval_duration);
}

fn report_findings(flow: &FlowFile) {
    let findings = validate_flow(&flow.nodes, &flow.edges);
    if !findings.is_empty() {
        eprintln!("Warning: flow has {} validation problem(s):", findings.len());
        for finding in &findings {
            eprintln!("  - {}", finding);
        }
    }
}

fn load_flow(path: &str) -> FlowFile {
    load_json(path)
}

fn load_json<T: serde::de::DeserializeOwned>(path: &str) -> T {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read '{}': {}", path, e)));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse '{}': {}", path, e)))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
