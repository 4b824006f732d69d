//! Configuration file loading.
//!
//! Files are dispatched on extension: `.json`, `.toml`, `.yaml`/`.yml`.
//! Whatever the format, the parsed root must be a mapping.
//!
//! TOML has no null, so null entries are left out when writing TOML. Loading
//! such a file back onto the defaults restores them.

use serde_json::Value;
use std::path::Path;

use super::tree::ConfigTree;
use crate::error::ConfigError;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    /// JSON format (.json)
    #[default]
    Json,
    /// TOML format (.toml)
    Toml,
    /// YAML format (.yaml, .yml)
    Yaml,
}

impl ConfigFormat {
    /// Detects the format from a file extension.
    ///
    /// Returns `None` if the extension is not recognized.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(Self::Json),
                "toml" => Some(Self::Toml),
                "yaml" | "yml" => Some(Self::Yaml),
                _ => None,
            })
    }

    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Toml => "toml",
            Self::Yaml => "yaml",
        }
    }
}

/// Loads and saves configuration trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Creates a new configuration loader.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Loads a configuration tree from a file.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::FileNotFound`] if the path does not exist
    /// - [`ConfigError::InvalidFormat`] if the extension is unsupported, the
    ///   content does not parse, or the root is not a mapping
    /// - [`ConfigError::FileReadError`] if the file cannot be read
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<ConfigTree, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        if !path.exists() {
            return Err(ConfigError::FileNotFound { path: display });
        }

        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            ConfigError::invalid_format(
                &display,
                "Unsupported file extension. Supported: .json, .toml, .yaml, .yml",
            )
        })?;

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: display.clone(),
            reason: e.to_string(),
        })?;

        self.parse(&content, format, &display)
    }

    /// Loads a configuration tree from a string with the specified format.
    pub fn load_str(&self, content: &str, format: ConfigFormat) -> Result<ConfigTree, ConfigError> {
        self.parse(content, format, "<string>")
    }

    fn parse(
        &self,
        content: &str,
        format: ConfigFormat,
        origin: &str,
    ) -> Result<ConfigTree, ConfigError> {
        let value: Value = match format {
            ConfigFormat::Json => serde_json::from_str(content)
                .map_err(|e| ConfigError::invalid_format(origin, format!("JSON parse error: {e}")))?,
            ConfigFormat::Toml => toml::from_str(content)
                .map_err(|e| ConfigError::invalid_format(origin, format!("TOML parse error: {e}")))?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)
                .map_err(|e| ConfigError::invalid_format(origin, format!("YAML parse error: {e}")))?,
        };

        match value {
            Value::Object(tree) => Ok(tree),
            other => Err(ConfigError::invalid_format(
                origin,
                format!("configuration root must be a mapping, got {}", type_name(&other)),
            )),
        }
    }

    /// Serializes a configuration tree to a string in the specified format.
    pub fn serialize(tree: &ConfigTree, format: ConfigFormat) -> Result<String, ConfigError> {
        match format {
            ConfigFormat::Json => serde_json::to_string_pretty(tree).map_err(|e| {
                ConfigError::invalid_format("<serialize>", format!("JSON serialization error: {e}"))
            }),
            ConfigFormat::Toml => toml::to_string_pretty(&without_nulls(tree)).map_err(|e| {
                ConfigError::invalid_format("<serialize>", format!("TOML serialization error: {e}"))
            }),
            ConfigFormat::Yaml => serde_yaml::to_string(tree).map_err(|e| {
                ConfigError::invalid_format("<serialize>", format!("YAML serialization error: {e}"))
            }),
        }
    }

    /// Saves a configuration tree to a file, format chosen by extension.
    pub fn save_file<P: AsRef<Path>>(tree: &ConfigTree, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            ConfigError::invalid_format(
                path.display().to_string(),
                "Unsupported file extension. Supported: .json, .toml, .yaml, .yml",
            )
        })?;

        let content = Self::serialize(tree, format)?;

        std::fs::write(path, content).map_err(|e| ConfigError::FileWriteError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

fn without_nulls(tree: &ConfigTree) -> ConfigTree {
    tree.iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.clone(), strip_nulls(value)))
        .collect()
}

fn strip_nulls(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(without_nulls(map)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .filter(|item| !item.is_null())
                .map(strip_nulls)
                .collect(),
        ),
        other => other.clone(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.json")),
            Some(ConfigFormat::Json)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.TOML")),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.yml")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(ConfigFormat::from_path(Path::new("config.php")), None);
        assert_eq!(ConfigFormat::from_path(Path::new("config")), None);
    }

    #[test]
    fn test_load_json() {
        let tree = ConfigLoader::new()
            .load_str(r#"{"timeout": 10, "providers": {"ovo": {"enabled": false}}}"#, ConfigFormat::Json)
            .unwrap();
        assert_eq!(tree["timeout"], json!(10));
        assert_eq!(tree["providers"]["ovo"]["enabled"], json!(false));
    }

    #[test]
    fn test_load_toml() {
        let toml = r#"
timeout = 45

[providers.gopay]
enabled = true
base_url = "https://api.gojekapi.com"
"#;
        let tree = ConfigLoader::new().load_str(toml, ConfigFormat::Toml).unwrap();
        assert_eq!(tree["timeout"], json!(45));
        assert_eq!(
            tree["providers"]["gopay"]["base_url"],
            json!("https://api.gojekapi.com")
        );
    }

    #[test]
    fn test_load_yaml() {
        let yaml = "retries: 1\nproviders:\n  ovo:\n    device_id: abc\n";
        let tree = ConfigLoader::new().load_str(yaml, ConfigFormat::Yaml).unwrap();
        assert_eq!(tree["retries"], json!(1));
        assert_eq!(tree["providers"]["ovo"]["device_id"], json!("abc"));
    }

    #[test]
    fn test_invalid_json() {
        let err = ConfigLoader::new()
            .load_str("{not json", ConfigFormat::Json)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFormat { .. }));
        assert!(err.to_string().contains("JSON parse error"));
    }

    #[test]
    fn test_non_mapping_root() {
        let err = ConfigLoader::new()
            .load_str("[1, 2, 3]", ConfigFormat::Json)
            .unwrap_err();
        assert!(err.to_string().contains("must be a mapping"));
    }

    #[test]
    fn test_serialize_roundtrip_json() {
        let tree = ConfigLoader::new()
            .load_str(r#"{"timeout": 30, "debug": true}"#, ConfigFormat::Json)
            .unwrap();
        let text = ConfigLoader::serialize(&tree, ConfigFormat::Json).unwrap();
        let parsed = ConfigLoader::new().load_str(&text, ConfigFormat::Json).unwrap();
        assert_eq!(tree, parsed);
    }

    #[test]
    fn test_toml_leaves_out_nulls() {
        let tree = ConfigLoader::new()
            .load_str(
                r#"{"device_id": null, "providers": {"ovo": {"device_id": null, "enabled": true}}, "tags": ["a", null]}"#,
                ConfigFormat::Json,
            )
            .unwrap();

        let text = ConfigLoader::serialize(&tree, ConfigFormat::Toml).unwrap();
        let parsed = ConfigLoader::new().load_str(&text, ConfigFormat::Toml).unwrap();
        assert!(parsed.get("device_id").is_none());
        assert_eq!(parsed["providers"]["ovo"], json!({"enabled": true}));
        assert_eq!(parsed["tags"], json!(["a"]));

        let text = ConfigLoader::serialize(&tree, ConfigFormat::Json).unwrap();
        assert!(text.contains("null"));
    }
}
