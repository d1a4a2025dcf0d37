use serde_json::{Map, Value};

/// Render flattened rows as CSV text.
///
/// The column set is the union of every key across all rows, ordered by
/// first appearance while scanning rows in input order - stable across runs
/// as long as the row order is. Missing and null cells render empty;
/// residual objects or arrays (which a well-flattened row should not
/// contain) are stringified as compact JSON before escaping. Header names
/// are written verbatim: every column this crate produces is a dotted
/// identifier, so callers feeding foreign rows must keep their column names
/// free of delimiters. Empty input yields an empty string, and there is no
/// trailing newline.
pub fn to_csv(rows: &[Map<String, Value>]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let columns = collect_columns(rows);
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(columns.join(","));

    for row in rows {
        let line = columns
            .iter()
            .map(|column| row.get(column).map(render_cell).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }

    lines.join("\n")
}

/// Union of row keys, first-seen order.
fn collect_columns(rows: &[Map<String, Value>]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

fn render_cell(value: &Value) -> String {
    let text = match value {
        Value::Null => return String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    escape(&text)
}

/// Quote-wrap a value containing a delimiter, newline, or quote, doubling
/// any internal quotes.
fn escape(value: &str) -> String {
    if value.contains([',', '\n', '\r', '"']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
