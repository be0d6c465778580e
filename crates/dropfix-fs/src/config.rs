//! Format-agnostic configuration loading

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::{Error, Result, io};

/// Format-agnostic configuration store.
///
/// Detects the format from the file extension and deserializes
/// transparently.
#[derive(Debug, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a file.
    ///
    /// Format is detected from file extension:
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    /// - `.yaml`, `.yml` -> YAML
    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let parse_error = |format: &str, message: String| Error::ConfigParse {
            path: path.to_path_buf(),
            format: format.into(),
            message,
        };

        match extension.as_str() {
            "toml" => {
                let content = io::read_text(path)?;
                toml::from_str(&content).map_err(|e| parse_error("TOML", e.to_string()))
            }
            "json" => {
                let content = io::read_text(path)?;
                serde_json::from_str(&content).map_err(|e| parse_error("JSON", e.to_string()))
            }
            "yaml" | "yml" => {
                let content = io::read_text(path)?;
                serde_yaml::from_str(&content).map_err(|e| parse_error("YAML", e.to_string()))
            }
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        names: Vec<String>,
    }

    #[test]
    fn loads_each_format() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::new();
        let expected = Sample {
            names: vec!["build".into()],
        };

        let toml_path = temp.path().join("c.toml");
        std::fs::write(&toml_path, "names = [\"build\"]\n").unwrap();
        assert_eq!(store.load::<Sample>(&toml_path).unwrap(), expected);

        let json_path = temp.path().join("c.json");
        std::fs::write(&json_path, r#"{"names": ["build"]}"#).unwrap();
        assert_eq!(store.load::<Sample>(&json_path).unwrap(), expected);

        let yaml_path = temp.path().join("c.yml");
        std::fs::write(&yaml_path, "names:\n  - build\n").unwrap();
        assert_eq!(store.load::<Sample>(&yaml_path).unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_extension() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("c.ini");
        std::fs::write(&path, "").unwrap();

        let err = ConfigStore::new().load::<Sample>(&path).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { extension } if extension == "ini"));
    }

    #[test]
    fn reports_parse_errors_with_format() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("c.toml");
        std::fs::write(&path, "names = [").unwrap();

        let err = ConfigStore::new().load::<Sample>(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { format, .. } if format == "TOML"));
    }
}
