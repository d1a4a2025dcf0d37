//! Export - tree-to-table flattening and the JSON/CSV file sinks
//!
//! A batch of canonical records leaves the process twice: verbatim as a
//! pretty-printed JSON array, and flattened into dotted-path columns as CSV
//! for tabular consumers.

pub mod csv;
pub mod flatten;
pub mod sink;

pub use csv::to_csv;
pub use flatten::flatten;
pub use sink::{export_results, ExportError, ExportOptions, ExportSummary};
