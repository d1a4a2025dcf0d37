use crate::normalize::access::get_path;
use serde_json::Value;

/// Locate the list of raw result items inside an arbitrary payload.
///
/// Envelope shapes are tried most-specific first, so a real list field is
/// never shadowed by the singleton fallback:
///
/// 1. the root itself is an array
/// 2. `items`
/// 3. `data.items`
/// 4. `itemList`
/// 5. any other non-null object is a single-item response
/// 6. everything else is empty
pub fn extract_items(raw: &Value) -> Vec<&Value> {
    if let Value::Array(items) = raw {
        return items.iter().collect();
    }

    if let Some(Value::Array(items)) = raw.get("items") {
        return items.iter().collect();
    }

    // Some upstream variants wrap the list as { data: { items: [...] } }.
    if let Some(Value::Array(items)) = get_path(raw, "data.items") {
        return items.iter().collect();
    }

    if let Some(Value::Array(items)) = raw.get("itemList") {
        return items.iter().collect();
    }

    // Singleton responses come back as the bare item object.
    if raw.is_object() {
        return vec![raw];
    }

    Vec::new()
}
