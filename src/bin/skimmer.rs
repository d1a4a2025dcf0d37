//! skimmer: normalize a saved search payload into JSON and CSV
//!
//! Usage:
//!   # Read the payload named in config/settings.json
//!   skimmer
//!
//!   # Read a specific payload, cap the batch, pick the output path
//!   skimmer data/sample_input.json --max-items 25 -o out/results.json
//!
//!   # JSON sink only
//!   skimmer data/sample_input.json --no-csv

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use skimmer::config::Settings;
use skimmer::export::{export_results, ExportOptions};
use skimmer::normalize::parse_search_results;
use skimmer::types::ParseConfig;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "skimmer")]
#[command(about = "Normalize search payloads into canonical JSON and CSV", long_about = None)]
struct Args {
    /// Raw payload file (overrides the settings file)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Destination for the JSON output; the CSV lands next to it
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Maximum number of extracted items to normalize
    #[arg(long)]
    max_items: Option<usize>,

    /// Skip the CSV sink
    #[arg(long)]
    no_csv: bool,

    /// Settings file path
    #[arg(long, default_value = "config/settings.json")]
    settings: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let settings = Settings::load(&args.settings);

    let input = args
        .input
        .unwrap_or_else(|| PathBuf::from(&settings.input_file));
    let config = ParseConfig {
        max_items: args.max_items.unwrap_or(settings.max_items),
    };
    let options = ExportOptions {
        output_file: args
            .output
            .unwrap_or_else(|| PathBuf::from(&settings.output_file)),
        include_csv: !args.no_csv && settings.include_csv,
    };

    info!(
        input = %input.display(),
        max_items = config.max_items,
        "starting payload normalization"
    );

    let raw = load_payload(&input)?;
    let records = parse_search_results(&raw, &config);
    info!(records = records.len(), "normalized payload");

    let summary = export_results(&records, &options)?;
    info!(
        json = %summary.json_path.display(),
        csv = ?summary.csv_path,
        "export complete"
    );

    Ok(())
}

/// Read a payload file, trying SIMD-accelerated parsing first and falling
/// back to serde_json for inputs simd-json rejects.
fn load_payload(path: &Path) -> Result<Value> {
    let mut content = std::fs::read(path)
        .with_context(|| format!("Failed to read payload file: {}", path.display()))?;

    match simd_json::to_owned_value(&mut content) {
        Ok(value) => {
            // Convert simd_json value to serde_json::Value
            let json = simd_json::to_string(&value)?;
            Ok(serde_json::from_str(&json)?)
        }
        Err(_) => {
            // simd-json mutates its buffer in place, so reparse from disk.
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read payload file: {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse JSON payload: {}", path.display()))
        }
    }
}
