//! Payload normalization - defensive extraction of canonical records
//!
//! Upstream search payloads arrive in several incompatible schema variants:
//! different envelope shapes, camelCase vs snake_case field names, and legacy
//! aliases for the same counters. There is no version flag to dispatch on, so
//! every field is resolved through an ordered fallback chain over an untyped
//! [`serde_json::Value`] tree, and the first variant that yields a usable
//! value wins.

pub mod access;
pub mod coerce;
pub mod extract;
pub mod record;

pub use access::{get_path, get_segments};
pub use coerce::{to_number, unix_timestamp_to_iso};
pub use extract::extract_items;
pub use record::{normalize_item, parse_search_results};
