use clap::Parser;
use nodeaudit::catalog::{CatalogEntry, VersionCatalog};
use nodeaudit::resolver::NodeTypeResolver;
use nodeaudit::workflow::wrap_item;
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use serde_json::{Value, json};
use std::fs;

/// Node types used for generated workflows, with the latest version written to the catalog.
const NODE_TYPES: &[(&str, f64)] = &[
    ("n8n-nodes-base.httpRequest", 4.2),
    ("n8n-nodes-base.set", 3.4),
    ("n8n-nodes-base.if", 2.2),
    ("n8n-nodes-base.code", 2.0),
    ("n8n-nodes-base.merge", 3.0),
    ("n8n-nodes-base.webhook", 2.0),
    ("n8n-nodes-base.respondToWebhook", 1.1),
    ("n8n-nodes-base.wait", 1.1),
    ("n8n-nodes-base.html", 1.2),
    ("n8n-nodes-base.scheduleTrigger", 1.2),
    ("@n8n/n8n-nodes-langchain.agent", 1.7),
    ("@n8n/n8n-nodes-langchain.chatTrigger", 1.1),
];

/// Types that never appear in the generated catalog.
const UNKNOWN_TYPES: &[&str] = &["acme-nodes.customConnector", "community.legacyNode"];

/// A CLI tool to generate audit fixtures
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Where to write the nodes-in-use items
    #[arg(long, default_value = "nodes-in-use.json")]
    nodes_output: String,

    /// Where to write the node version items
    #[arg(long, default_value = "node_versions.json")]
    versions_output: String,

    /// Number of workflows to generate
    #[arg(short, long, default_value_t = 5)]
    workflows: usize,

    /// The minimum number of nodes per workflow
    #[arg(long, default_value_t = 1)]
    min: usize,

    /// The maximum number of nodes per workflow
    #[arg(long, default_value_t = 12)]
    max: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.min > cli.max {
        eprintln!(
            "Error: --min ({}) cannot be greater than --max ({})",
            cli.min, cli.max
        );
        std::process::exit(1);
    }

    println!(
        "Generating {} workflows ({} to {} nodes each)...",
        cli.workflows, cli.min, cli.max
    );

    let workflows: Vec<Value> = (0..cli.workflows)
        .map(|index| wrap_item(generate_workflow(&mut rng, index, cli.min, cli.max)))
        .collect();
    fs::write(&cli.nodes_output, serde_json::to_string_pretty(&workflows)?)?;
    println!("-> Wrote workflows to '{}'", cli.nodes_output);

    let catalog = generate_catalog();
    let versions = vec![wrap_item(serde_json::to_value(&catalog)?)];
    fs::write(&cli.versions_output, serde_json::to_string_pretty(&versions)?)?;
    println!(
        "-> Wrote {} catalog entries to '{}'",
        catalog.len(),
        cli.versions_output
    );

    Ok(())
}

/// Generates one workflow with a random mix of outdated, current and unknown nodes.
fn generate_workflow(rng: &mut ThreadRng, index: usize, min: usize, max: usize) -> Value {
    let node_count = rng.random_range(min..=max);
    let nodes: Vec<Value> = (0..node_count).map(|n| generate_node(rng, n)).collect();

    json!({
        "id": format!("wf{:04}", index + 1),
        "name": format!("Workflow {}", index + 1),
        "nodes": nodes,
    })
}

fn generate_node(rng: &mut ThreadRng, n: usize) -> Value {
    // Roughly one node in ten has a type the catalog does not know.
    if rng.random_bool(0.1) {
        let node_type = UNKNOWN_TYPES.choose(rng).copied().unwrap_or("community.legacyNode");
        return json!({
            "type": node_type,
            "typeVersion": 1,
            "name": format!("Custom {}", n + 1),
        });
    }

    let (node_type, latest) = NODE_TYPES
        .choose(rng)
        .copied()
        .unwrap_or(("n8n-nodes-base.set", 3.4));
    let version = if rng.random_bool(0.5) {
        latest
    } else {
        // One decimal place, strictly below the latest version.
        let older = rng.random_range(1.0..latest.max(1.1));
        ((older * 10.0).floor() / 10.0).min(latest - 0.1).max(1.0)
    };

    let short_name = node_type.rsplit('.').next().unwrap_or(node_type);
    json!({
        "type": node_type,
        "typeVersion": version,
        "name": format!("{} {}", short_name, n + 1),
    })
}

/// The catalog keys match what the default resolver produces for `NODE_TYPES`.
fn generate_catalog() -> VersionCatalog {
    let resolver = NodeTypeResolver::default();
    NODE_TYPES
        .iter()
        .map(|(node_type, latest)| {
            let key = resolver.resolve(node_type).into_owned();
            (key, CatalogEntry::with_latest(*latest))
        })
        .collect()
}
