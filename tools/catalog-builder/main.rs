use chrono::Utc;
use clap::{ArgAction, Parser};
use nodeaudit::catalog::{SourceScanner, VersionCatalog, diff_catalogs, to_json_lines};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Builds a node version catalog from a checkout of the platform's source tree
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Root of the source checkout to scan
    source_dir: String,

    /// Where to write the catalog
    #[arg(short, long, default_value = "node_versions.json")]
    output: String,

    /// JSON lines file that version changes are appended to
    #[arg(short, long, default_value = "version_changes.jsonl")]
    changes: String,

    /// Directories (relative to the source root) to scan; defaults to the node packages
    #[arg(long = "root")]
    roots: Vec<String>,

    /// Scan every `*.node.ts` file under the source root
    #[arg(long, conflicts_with = "roots")]
    all: bool,

    /// Increase log verbosity
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let level = if cli.verbose > 0 { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();

    let mut scanner = SourceScanner::new();
    if cli.all {
        scanner = scanner.with_roots(Vec::new());
    } else if !cli.roots.is_empty() {
        scanner = scanner.with_roots(cli.roots.clone());
    }

    let now = Utc::now();
    let catalog = scanner.scan(Path::new(&cli.source_dir), now)?;
    if catalog.is_empty() {
        warn!(dir = %cli.source_dir, "no node versions found");
    }

    // Compare against the previous catalog before overwriting it.
    let output = Path::new(&cli.output);
    if output.exists() {
        match VersionCatalog::from_file(output) {
            Ok(previous) => {
                let changes = diff_catalogs(&previous, &catalog, now);
                if !changes.is_empty() {
                    let mut file = OpenOptions::new()
                        .create(true)
                        .append(true)
                        .open(&cli.changes)?;
                    file.write_all(to_json_lines(&changes)?.as_bytes())?;
                }
                info!(changes = changes.len(), file = %cli.changes, "recorded version changes");
            }
            Err(e) => warn!(error = %e, "previous catalog unreadable; skipping change log"),
        }
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    catalog.save(output)?;
    println!("Saved {} node versions to '{}'", catalog.len(), cli.output);

    Ok(())
}
