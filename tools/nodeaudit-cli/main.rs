use clap::{ArgAction, Parser, ValueEnum};
use nodeaudit::error::InputError;
use nodeaudit::prelude::*;
use nodeaudit::workflow::wrap_item;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Define CLI-specific enums for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeCli {
    Json,
    Html,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StyleCli {
    Plain,
    Cards,
}

/// Audits workflow exports for outdated node versions
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the nodes-in-use JSON file (a list of `{ "json": workflow }` items)
    nodes_in_use: String,
    /// Path to the node versions JSON file (a list whose first item holds the catalog)
    node_versions: String,

    /// Output shape
    #[arg(short, long, value_enum, default_value = "json")]
    mode: ModeCli,

    /// Report style for HTML output
    #[arg(short, long, value_enum)]
    style: Option<StyleCli>,

    /// Base URL for workflow links
    #[arg(long, env = "NODEAUDIT_BASE_URL")]
    base_url: Option<String>,

    /// Optional JSON config file
    #[arg(short, long)]
    config: Option<String>,

    /// Write the output here instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let total_start = Instant::now();
    let config = load_config(&cli);
    let audit = Audit::from_config(&config);
    let mode = match cli.mode {
        ModeCli::Json => AuditMode::Structured,
        ModeCli::Html => AuditMode::Report,
    };

    // --- 1. Input Loading ---
    let result = read_input(&cli.nodes_in_use).and_then(|nodes_in_use| {
        let node_versions = read_input(&cli.node_versions)?.map(as_items);
        audit.try_run(nodes_in_use.as_ref(), node_versions.as_ref())
    });

    // --- 2. Output ---
    let output = audit.shape(&result, mode);
    let body = output.body();
    match &cli.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &body) {
                exit_with_error(&format!("Failed to write output file '{}': {}", path, e));
            }
            eprintln!("Wrote {} bytes to '{}'", body.len(), path);
        }
        None => println!("{}", body),
    }

    // --- 3. Summary ---
    match &result {
        Ok(run) => {
            let summary = run.outcome.summary();
            eprintln!("\n--- Audit Summary ---");
            eprintln!("Workflows:   {}", summary.workflows);
            eprintln!("Nodes:       {}", summary.nodes);
            eprintln!("Outdated:    {}", summary.outdated);
            eprintln!("Up to date:  {}", summary.current);
            eprintln!("Not found:   {}", summary.unmatched);
            eprintln!("Skipped:     {}", summary.skipped);
            for skipped in &run.outcome.skipped {
                eprintln!(
                    "  -> {} #{}: {}",
                    skipped.workflow_name, skipped.node_index, skipped.reason
                );
            }
        }
        Err(e) => eprintln!("\nAudit failed: {}", e),
    }
    eprintln!("Total Execution: {:?}", total_start.elapsed());
}

/// Reads a JSON input file. A missing file counts as absent input.
fn read_input(path: &str) -> Result<Option<Value>, InputError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path, "input file not found");
            return Ok(None);
        }
        Err(e) => return Err(InputError::JsonParseError(format!("{}: {}", path, e))),
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| InputError::JsonParseError(format!("{}: {}", path, e)))
}

/// A bare catalog object, as written by `catalog-builder`, is wrapped as a single item.
fn as_items(value: Value) -> Value {
    match value {
        Value::Object(_) => Value::Array(vec![wrap_item(value)]),
        other => other,
    }
}

/// Loads the config file (if any) and layers the CLI flags on top.
fn load_config(cli: &Cli) -> AuditConfig {
    let mut config = match &cli.config {
        Some(path) => AuditConfig::from_file(Path::new(path))
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => AuditConfig::default(),
    };

    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(style) = cli.style {
        config = config.with_style(match style {
            StyleCli::Plain => ReportStyle::Plain,
            StyleCli::Cards => ReportStyle::Cards,
        });
    }
    config
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(env_filter)
        .try_init();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
