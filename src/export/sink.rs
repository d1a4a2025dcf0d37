use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::export::csv::to_csv;
use crate::export::flatten::flatten;
use crate::types::SearchRecord;

/// Where and how a batch gets written.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Destination for the JSON sink; the CSV sink lands next to it with the
    /// extension swapped to `.csv`.
    pub output_file: PathBuf,

    /// Whether to also emit the flattened CSV.
    pub include_csv: bool,
}

impl ExportOptions {
    pub fn new(output_file: impl Into<PathBuf>) -> Self {
        ExportOptions {
            output_file: output_file.into(),
            include_csv: true,
        }
    }
}

/// Contract violations the caller must not paper over.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export requires a non-empty output file path")]
    MissingOutputPath,
}

/// What a successful export wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub json_path: PathBuf,
    pub csv_path: Option<PathBuf>,
    pub records: usize,
}

/// Write a batch of records to the JSON sink and, optionally, the CSV sink.
///
/// An empty output path fails fast with [`ExportError::MissingOutputPath`];
/// sink I/O failures propagate as fatal errors. Parent directories are
/// created on demand.
pub fn export_results(records: &[SearchRecord], options: &ExportOptions) -> Result<ExportSummary> {
    if options.output_file.as_os_str().is_empty() {
        return Err(ExportError::MissingOutputPath.into());
    }

    let json =
        serde_json::to_string_pretty(records).context("Failed to serialize records to JSON")?;
    write_text(&options.output_file, &json)?;

    let csv_path = if options.include_csv {
        let path = options.output_file.with_extension("csv");
        let rows = records
            .iter()
            .map(|record| {
                let value = serde_json::to_value(record)
                    .context("Failed to convert record for flattening")?;
                Ok(flatten(&value))
            })
            .collect::<Result<Vec<_>>>()?;

        write_text(&path, &to_csv(&rows))?;
        Some(path)
    } else {
        None
    };

    Ok(ExportSummary {
        json_path: options.output_file.clone(),
        csv_path,
        records: records.len(),
    })
}

/// Write UTF-8 text, creating parent directories on demand.
fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
}
