//! The Dompet configuration object.
//!
//! A [`Configuration`] is the built-in default tree deep-merged with caller
//! overrides. It is validated at construction and after every [`set`], and
//! never on reads.
//!
//! # Default tree
//!
//! ```yaml
//! timeout: 30
//! retries: 3
//! debug: false
//! providers:
//!   ovo:
//!     enabled: true
//!     base_url: "https://api.ovo.id"
//!     timeout: 30
//!     device_id: null
//!   gopay:
//!     enabled: true
//!     base_url: "https://api.gojekapi.com"
//!     timeout: 30
//! ```
//!
//! [`set`]: Configuration::set

use serde_json::{Map, Value, json};
use std::path::Path;

use super::loader::ConfigLoader;
use super::traits::Validatable;
use super::tree::{self, ConfigTree, is_truthy};
use super::validation::validate_tree;
use crate::error::ConfigError;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Default retry count. Stored for callers; the library itself never retries.
pub const DEFAULT_RETRIES: u64 = 3;

/// Default OVO API endpoint.
pub const DEFAULT_OVO_BASE_URL: &str = "https://api.ovo.id";

/// Default GoPay API endpoint.
pub const DEFAULT_GOPAY_BASE_URL: &str = "https://api.gojekapi.com";

/// Returns the built-in default configuration tree.
#[must_use]
pub fn default_tree() -> ConfigTree {
    let defaults = json!({
        "timeout": DEFAULT_TIMEOUT,
        "retries": DEFAULT_RETRIES,
        "debug": false,
        "providers": {
            "ovo": {
                "enabled": true,
                "base_url": DEFAULT_OVO_BASE_URL,
                "timeout": DEFAULT_TIMEOUT,
                "device_id": null,
            },
            "gopay": {
                "enabled": true,
                "base_url": DEFAULT_GOPAY_BASE_URL,
                "timeout": DEFAULT_TIMEOUT,
            },
        },
    });
    match defaults {
        Value::Object(tree) => tree,
        _ => Map::new(),
    }
}

/// Nested, validated configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    tree: ConfigTree,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            tree: default_tree(),
        }
    }
}

impl Configuration {
    /// Builds a configuration from the defaults merged with `overrides`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::InvalidValue`] found, checking
    /// `timeout`, `retries`, then each provider's `base_url` and `timeout`.
    pub fn new(overrides: ConfigTree) -> Result<Self, ConfigError> {
        let mut tree = default_tree();
        tree::merge(&mut tree, overrides);
        let config = Self { tree };
        config.validate()?;
        Ok(config)
    }

    /// Loads overrides from a `.json`, `.toml`, `.yaml`, or `.yml` file.
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigError::FileNotFound`] for a missing path and
    /// [`ConfigError::InvalidFormat`] for an unsupported extension, malformed
    /// content, or a non-mapping root. Validation errors propagate as in
    /// [`Configuration::new`].
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let overrides = ConfigLoader::new().load_file(path)?;
        Self::new(overrides)
    }

    /// Writes the current tree to a file, format chosen by extension.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        ConfigLoader::save_file(&self.tree, path)
    }

    /// Returns the value at a dotted path, or `None` if any segment is absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        tree::lookup(&self.tree, key)
    }

    /// Returns the value at a dotted path, or `default` if any segment is absent.
    #[must_use]
    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.get(key).cloned().unwrap_or(default)
    }

    /// Sets the value at a dotted path, creating intermediate mappings.
    ///
    /// The whole tree is re-validated. On failure the change is discarded and
    /// the configuration is left as it was.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<&mut Self, ConfigError> {
        let mut candidate = self.tree.clone();
        tree::assign(&mut candidate, key, value.into());
        validate_tree(&candidate)?;
        self.tree = candidate;
        Ok(self)
    }

    /// Returns the full tree.
    #[must_use]
    pub fn all(&self) -> &ConfigTree {
        &self.tree
    }

    /// Returns the settings for one provider.
    ///
    /// A provider whose subtree is present but empty is reported as not
    /// configured, the same as one that is absent.
    pub fn provider_config(&self, name: &str) -> Result<ConfigTree, ConfigError> {
        match self.provider_entry(name) {
            Some(Value::Object(settings)) if !settings.is_empty() => Ok(settings.clone()),
            _ => Err(ConfigError::ProviderNotConfigured {
                provider: name.to_string(),
            }),
        }
    }

    /// Returns true if `providers.<name>.enabled` is truthy.
    #[must_use]
    pub fn is_provider_enabled(&self, name: &str) -> bool {
        self.provider_entry(name)
            .and_then(|entry| entry.get("enabled"))
            .is_some_and(is_truthy)
    }

    /// Returns the names of enabled providers in stored order.
    #[must_use]
    pub fn enabled_providers(&self) -> Vec<String> {
        self.providers()
            .map(|providers| {
                providers
                    .iter()
                    .filter(|(_, entry)| entry.get("enabled").is_some_and(is_truthy))
                    .map(|(name, _)| name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Discards every override and restores the built-in defaults.
    pub fn reset(&mut self) -> &mut Self {
        self.tree = default_tree();
        self
    }

    /// Returns the global request timeout in seconds.
    #[must_use]
    pub fn timeout(&self) -> u64 {
        self.get("timeout")
            .and_then(Value::as_u64)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    /// Returns true if `debug` is truthy.
    #[must_use]
    pub fn debug(&self) -> bool {
        self.get("debug").is_some_and(is_truthy)
    }

    /// Applies `<PREFIX>_TIMEOUT`, `<PREFIX>_RETRIES`, and `<PREFIX>_DEBUG`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] if a variable does not parse,
    /// or a validation error if the resulting tree is invalid.
    pub fn apply_env_overrides(&mut self, prefix: &str) -> Result<&mut Self, ConfigError> {
        for key in ["timeout", "retries"] {
            let name = format!("{prefix}_{}", key.to_uppercase());
            if let Ok(raw) = std::env::var(&name) {
                let parsed: i64 = raw.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
                    name: name.clone(),
                    reason: format!("expected an integer, got '{raw}'"),
                })?;
                self.set(key, parsed)?;
            }
        }

        let name = format!("{prefix}_DEBUG");
        if let Ok(raw) = std::env::var(&name) {
            let parsed = match raw.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => true,
                "false" | "0" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidEnvVar {
                        name,
                        reason: format!("expected a boolean, got '{raw}'"),
                    });
                }
            };
            self.set("debug", parsed)?;
        }

        Ok(self)
    }

    /// Projects enabled providers into the settings map a gateway accepts.
    ///
    /// Each entry is the provider's subtree; a provider without its own
    /// `timeout` inherits the global one.
    #[must_use]
    pub fn to_gateway_settings(&self) -> ConfigTree {
        let global_timeout = self.timeout();
        let mut settings = ConfigTree::new();
        for name in self.enabled_providers() {
            let Ok(mut entry) = self.provider_config(&name) else {
                continue;
            };
            entry
                .entry("timeout")
                .or_insert_with(|| Value::from(global_timeout));
            settings.insert(name, Value::Object(entry));
        }
        settings
    }

    fn providers(&self) -> Option<&ConfigTree> {
        self.tree.get("providers").and_then(Value::as_object)
    }

    fn provider_entry(&self, name: &str) -> Option<&Value> {
        self.providers().and_then(|providers| providers.get(name))
    }
}

impl Validatable for Configuration {
    fn validate(&self) -> Result<(), ConfigError> {
        validate_tree(&self.tree)
    }
}
