use serde_json::Value;

/// Resolve a dot-delimited path against an untyped JSON tree.
///
/// Walks one key at a time. A step into an object looks the key up; a step
/// into an array parses the key as a numeric index, so paths like
/// `bitrateInfo.0.bitrate` resolve. Any non-container step, missing key,
/// unparsable index, or a final value of JSON `null` yields `None` - callers
/// supply their own defaults.
pub fn get_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    get_segments(root, path.split('.'))
}

/// Same lookup as [`get_path`], for an already-split key sequence.
pub fn get_segments<'a, I, S>(root: &'a Value, segments: I) -> Option<&'a Value>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut current = root;
    for segment in segments {
        let segment = segment.as_ref();
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    // Explicit null and absent are the same thing to callers.
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_lookup() {
        let tree = json!({"a": {"b": {"c": 5}}});
        assert_eq!(get_path(&tree, "a.b.c"), Some(&json!(5)));
    }

    #[test]
    fn test_missing_step_yields_none() {
        let tree = json!({"a": 1});
        assert_eq!(get_path(&tree, "a.b"), None);
    }

    #[test]
    fn test_non_container_root_yields_none() {
        assert_eq!(get_path(&Value::Null, "a"), None);
        assert_eq!(get_path(&json!(42), "a"), None);
    }

    #[test]
    fn test_explicit_null_collapses_to_none() {
        let tree = json!({"a": null});
        assert_eq!(get_path(&tree, "a"), None);
    }

    #[test]
    fn test_array_index_step() {
        let tree = json!({"bitrateInfo": [{"bitrate": 900}, {"bitrate": 500}]});
        assert_eq!(get_path(&tree, "bitrateInfo.0.bitrate"), Some(&json!(900)));
        assert_eq!(get_path(&tree, "bitrateInfo.2.bitrate"), None);
        assert_eq!(get_path(&tree, "bitrateInfo.x.bitrate"), None);
    }

    #[test]
    fn test_pre_split_segments() {
        let tree = json!({"a": {"b": 7}});
        assert_eq!(get_segments(&tree, ["a", "b"]), Some(&json!(7)));
    }
}
