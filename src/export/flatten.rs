use serde_json::{Map, Value};

/// Delimiter used when an array collapses into a single cell.
const ARRAY_JOIN: &str = "|";

/// Flatten a nested JSON object into a single-level map with dotted keys.
///
/// Nested objects recurse with the key path extended by `.<key>`. Arrays are
/// joined into one `|`-delimited string - lossy when an element itself
/// contains `|`, which the canonical record's simple label arrays never do.
/// Null leaves stay null; how they render is the serializer's decision, not
/// the flattener's. Key order follows the input, so downstream column
/// ordering is deterministic.
pub fn flatten(value: &Value) -> Map<String, Value> {
    let mut out = Map::new();
    if let Value::Object(fields) = value {
        for (key, field) in fields {
            flatten_into(&mut out, key, field);
        }
    }
    out
}

fn flatten_into(out: &mut Map<String, Value>, prefix: &str, value: &Value) {
    match value {
        Value::Object(fields) => {
            for (key, field) in fields {
                flatten_into(out, &format!("{prefix}.{key}"), field);
            }
        }
        Value::Array(items) => {
            let joined = items
                .iter()
                .map(element_text)
                .collect::<Vec<_>>()
                .join(ARRAY_JOIN);
            out.insert(prefix.to_string(), Value::String(joined));
        }
        other => {
            out.insert(prefix.to_string(), other.clone());
        }
    }
}

fn element_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
