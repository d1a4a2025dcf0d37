//! # Skimmer - Search Payload Normalization Toolkit
//!
//! A library for normalizing heterogeneous, loosely-structured search-result
//! payloads into one canonical record shape, then exporting the batch as
//! pretty-printed JSON and a flattened CSV.
//!
//! ## Modules
//!
//! - **normalize**: envelope extraction, defensive field coercion, and the
//!   per-item record normalizer
//! - **export**: tree-to-table flattening, CSV rendering, and the file sinks
//!
//! ## Quick Start
//!
//! ### Normalizing a payload
//!
//! ```rust
//! use skimmer::normalize::parse_search_results;
//! use skimmer::types::ParseConfig;
//! use serde_json::json;
//!
//! let payload = json!({
//!     "itemList": [
//!         {"id": "7", "author": {"uniqueId": "bob"}, "stats": {"diggCount": 3}}
//!     ]
//! });
//!
//! let records = parse_search_results(&payload, &ParseConfig::default());
//!
//! assert_eq!(records[0].id, "7");
//! assert_eq!(records[0].author.as_deref(), Some("bob"));
//! ```
//!
//! ### Flattening for tabular export
//!
//! ```rust
//! use skimmer::export::{flatten, to_csv};
//! use serde_json::json;
//!
//! let flat = flatten(&json!({"id": "7", "stats": {"diggCount": 3}}));
//! let csv = to_csv(&[flat]);
//!
//! assert_eq!(csv, "id,stats.diggCount\n7,3");
//! ```

use anyhow::Result;
use serde_json::Value;

pub mod config;
pub mod export;
pub mod normalize;
pub mod types;

// Re-export commonly used items for convenience
pub use export::{export_results, flatten, to_csv, ExportError, ExportOptions, ExportSummary};
pub use normalize::{extract_items, normalize_item, parse_search_results};
pub use types::{ParseConfig, SearchRecord};

/// Main entry point: normalize a raw payload and write both sinks.
pub fn process_payload(
    raw: &Value,
    config: &ParseConfig,
    options: &ExportOptions,
) -> Result<ExportSummary> {
    let records = parse_search_results(raw, config);
    export_results(&records, options)
}
