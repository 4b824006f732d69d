//! Configuration management module.
//!
//! This module provides the nested configuration tree used by Dompet:
//! - Built-in defaults deep-merged with caller overrides
//! - Validation of global and per-provider settings
//! - Dotted-path `get`/`set` (`providers.ovo.enabled`)
//! - Loading from JSON, TOML, or YAML files
//!
//! # Example
//!
//! ```rust
//! use dompet_core::config::Configuration;
//! use serde_json::{json, Value};
//!
//! let overrides = json!({"timeout": 60, "providers": {"ovo": {"device_id": "abc"}}});
//! let Value::Object(overrides) = overrides else { unreachable!() };
//!
//! let config = Configuration::new(overrides)?;
//! assert_eq!(config.get("timeout"), Some(&json!(60)));
//! assert_eq!(config.get("providers.ovo.enabled"), Some(&json!(true)));
//! # Ok::<(), dompet_core::error::ConfigError>(())
//! ```

mod configuration;
mod loader;
mod traits;
pub mod tree;
pub mod validation;

pub use configuration::{
    Configuration, DEFAULT_GOPAY_BASE_URL, DEFAULT_OVO_BASE_URL, DEFAULT_RETRIES, DEFAULT_TIMEOUT,
    default_tree,
};
pub use loader::{ConfigFormat, ConfigLoader};
pub use traits::Validatable;
pub use tree::{ConfigTree, is_truthy};
pub use validation::{ValidationContext, ValidationResult, Validator};
