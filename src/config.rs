use std::path::Path;

use serde::Deserialize;
use tracing::warn;

/// Runtime settings, loaded from a JSON file and overridable per-field from
/// the command line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Saved payload to read when no input is given on the command line
    pub input_file: String,

    /// Destination for the JSON sink
    pub output_file: String,

    /// Cap on how many extracted items get normalized
    pub max_items: usize,

    /// Whether the CSV sink is emitted alongside the JSON sink
    pub include_csv: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            input_file: "data/sample_input.json".to_string(),
            output_file: "data/example_output.json".to_string(),
            max_items: 100,
            include_csv: true,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file.
    ///
    /// A missing or malformed file is not fatal: the defaults are close
    /// enough to run with, so the problem is logged and the defaults
    /// returned.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(path = %path.display(), %err, "settings file not readable, using defaults");
                return Settings::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(path = %path.display(), %err, "malformed settings file, using defaults");
                Settings::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let settings = Settings::load("definitely/not/here.json");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.max_items, 100);
        assert!(settings.include_csv);
    }

    #[test]
    fn test_partial_file_keeps_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"maxItems": 25, "outputFile": "out/results.json"}}"#).unwrap();

        let settings = Settings::load(file.path());
        assert_eq!(settings.max_items, 25);
        assert_eq!(settings.output_file, "out/results.json");
        assert_eq!(settings.input_file, Settings::default().input_file);
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        assert_eq!(Settings::load(file.path()), Settings::default());
    }
}
