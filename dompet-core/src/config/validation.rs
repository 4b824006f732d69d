//! Configuration validation utilities.
//!
//! Validation walks the tree with a [`ValidationContext`] that tracks the
//! current dotted path, so errors name the exact offending field
//! (`providers.ovo.base_url`). Checks run in a fixed order and the first
//! error collected is the one reported.

use serde_json::Value;

use super::tree::ConfigTree;
use crate::error::ConfigError;

/// Result type for validation operations.
pub type ValidationResult = Result<(), ConfigError>;

/// Context for validation operations.
///
/// Tracks the current path in the configuration tree for better error messages.
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    /// Current path in the configuration (e.g., "providers.ovo").
    path: Vec<String>,
    /// Collected validation errors.
    errors: Vec<ConfigError>,
}

impl ValidationContext {
    /// Creates a new validation context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters a new section in the configuration.
    pub fn enter(&mut self, section: impl Into<String>) {
        self.path.push(section.into());
    }

    /// Exits the current section.
    pub fn exit(&mut self) {
        self.path.pop();
    }

    /// Returns the current path as a dot-separated string.
    #[must_use]
    pub fn current_path(&self) -> String {
        self.path.join(".")
    }

    /// Adds a validation error.
    pub fn add_error(&mut self, error: ConfigError) {
        self.errors.push(error);
    }

    /// Returns true if there are no validation errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the collected validation errors.
    #[must_use]
    pub fn errors(&self) -> &[ConfigError] {
        &self.errors
    }

    /// Consumes the context and returns the first error, if any.
    pub fn into_result(self) -> ValidationResult {
        self.errors.into_iter().next().map_or(Ok(()), Err)
    }

    /// Creates an invalid value error with the current path context.
    #[must_use]
    pub fn invalid_value(
        &self,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> ConfigError {
        let field_name = field.into();
        let full_field = if self.path.is_empty() {
            field_name
        } else {
            format!("{}.{}", self.current_path(), field_name)
        };
        ConfigError::InvalidValue {
            field: full_field,
            reason: reason.into(),
        }
    }
}

/// Validator for configuration values.
///
/// Provides a fluent API over loosely-typed tree values. A `None` value means
/// the key is absent.
#[derive(Debug)]
pub struct Validator<'a> {
    ctx: &'a mut ValidationContext,
}

impl<'a> Validator<'a> {
    /// Creates a new validator with the given context.
    pub fn new(ctx: &'a mut ValidationContext) -> Self {
        Self { ctx }
    }

    /// Requires an integer strictly greater than zero.
    pub fn positive_integer(&mut self, field: &str, value: Option<&Value>) -> &mut Self {
        if !value.and_then(Value::as_u64).is_some_and(|n| n > 0) {
            let err = self.ctx.invalid_value(
                field,
                format!("must be a positive integer, got {}", describe(value)),
            );
            self.ctx.add_error(err);
        }
        self
    }

    /// Requires an integer greater than or equal to zero.
    pub fn non_negative_integer(&mut self, field: &str, value: Option<&Value>) -> &mut Self {
        if value.and_then(Value::as_u64).is_none() {
            let err = self.ctx.invalid_value(
                field,
                format!("must be a non-negative integer, got {}", describe(value)),
            );
            self.ctx.add_error(err);
        }
        self
    }

    /// Requires an integer greater than zero when the key is present.
    pub fn optional_positive_integer(&mut self, field: &str, value: Option<&Value>) -> &mut Self {
        if value.is_some() {
            self.positive_integer(field, value);
        }
        self
    }

    /// Requires a syntactically valid absolute URL when the key is present.
    pub fn optional_url(&mut self, field: &str, value: Option<&Value>) -> &mut Self {
        let Some(value) = value else {
            return self;
        };
        let valid = value
            .as_str()
            .is_some_and(|s| url::Url::parse(s).is_ok());
        if !valid {
            let err = self.ctx.invalid_value(
                field,
                format!("must be a valid URL, got {}", describe(Some(value))),
            );
            self.ctx.add_error(err);
        }
        self
    }

    /// Requires a mapping.
    pub fn mapping(&mut self, field: &str, value: Option<&Value>) -> &mut Self {
        if !value.is_some_and(Value::is_object) {
            let err = self
                .ctx
                .invalid_value(field, format!("must be a mapping, got {}", describe(value)));
            self.ctx.add_error(err);
        }
        self
    }

    /// Returns the validation result.
    pub fn result(&self) -> ValidationResult {
        match self.ctx.errors().first() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

fn describe(value: Option<&Value>) -> String {
    match value {
        None => "nothing".to_string(),
        Some(Value::String(s)) => format!("'{s}'"),
        Some(other) => other.to_string(),
    }
}

/// Validates a whole configuration tree.
///
/// Order: `timeout`, `retries`, then each provider's `base_url` and
/// `timeout` in the tree's stored order.
pub fn validate_tree(tree: &ConfigTree) -> ValidationResult {
    let mut ctx = ValidationContext::new();

    Validator::new(&mut ctx)
        .positive_integer("timeout", tree.get("timeout"))
        .non_negative_integer("retries", tree.get("retries"));

    if let Some(providers) = tree.get("providers") {
        Validator::new(&mut ctx).mapping("providers", Some(providers));

        if let Value::Object(providers) = providers {
            ctx.enter("providers");
            for (name, provider) in providers {
                if let Value::Object(settings) = provider {
                    ctx.enter(name.as_str());
                    Validator::new(&mut ctx)
                        .optional_url("base_url", settings.get("base_url"))
                        .optional_positive_integer("timeout", settings.get("timeout"));
                    ctx.exit();
                } else {
                    Validator::new(&mut ctx).mapping(name, Some(provider));
                }
            }
            ctx.exit();
        }
    }

    ctx.into_result()
}
