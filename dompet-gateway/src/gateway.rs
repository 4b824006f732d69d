//! The wallet gateway façade.
//!
//! [`WalletGateway`] owns one provider instance per recognized settings key
//! and dispatches every call by provider name. Provider failures are wrapped
//! into [`GatewayError`]s that keep the original as their source.

use indexmap::IndexMap;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::debug;

use dompet_core::config::{Configuration, ConfigTree};
use dompet_core::error::{GatewayError, ProviderError};
use dompet_core::traits::{
    DEFAULT_TRANSACTION_LIMIT, LogContext, Logger, NullLogger, PaymentProvider, ResultMap,
};
use dompet_telemetry::masking::mask_phone;

use crate::gopay::{GOPAY, GoPayProvider};
use crate::normalize::into_map;
use crate::ovo::{OVO, OvoProvider};
use crate::rest::{HttpTransport, ReqwestTransport};

/// Provider names the gateway knows how to build, in canonical form.
pub const KNOWN_PROVIDERS: [&str; 2] = [OVO, GOPAY];

/// Registered providers keyed by lower-case name, in registration order.
type Registry = IndexMap<String, Box<dyn PaymentProvider>>;

/// Single entry point for every supported wallet.
///
/// # Example
///
/// ```ignore
/// use dompet_gateway::WalletGateway;
/// use serde_json::json;
///
/// let settings = json!({"ovo": {"device_id": "abc"}, "gopay": {"password": "secret"}});
/// let mut gateway = WalletGateway::new(settings.as_object().unwrap(), None)?;
///
/// gateway.login("ovo", "081234567890").await?;
/// gateway.verify_code("ovo", "123456").await?;
/// let balance = gateway.get_balance("OVO").await?;
/// ```
pub struct WalletGateway {
    providers: Registry,
    logger: Arc<dyn Logger>,
}

impl std::fmt::Debug for WalletGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletGateway")
            .field("providers", &self.available_providers())
            .finish_non_exhaustive()
    }
}

impl WalletGateway {
    /// Builds a gateway that talks to the real upstreams.
    ///
    /// Top-level keys of `settings` name providers (`ovo`, `gopay`, any
    /// case); each value holds that provider's settings. Other keys are
    /// ignored. Without a `logger`, log records are discarded.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the HTTP client cannot be created.
    pub fn new(settings: &ConfigTree, logger: Option<Arc<dyn Logger>>) -> Result<Self, GatewayError> {
        let transport = ReqwestTransport::new()
            .map_err(|e| GatewayError::configuration(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self::with_transport(settings, Arc::new(transport), logger))
    }

    /// Builds a gateway over an explicit transport.
    #[must_use]
    pub fn with_transport(
        settings: &ConfigTree,
        transport: Arc<dyn HttpTransport>,
        logger: Option<Arc<dyn Logger>>,
    ) -> Self {
        let mut providers = Registry::new();

        for (key, value) in settings {
            let name = key.to_lowercase();
            if providers.contains_key(&name) {
                continue;
            }
            let empty = Map::new();
            let provider_settings = value.as_object().unwrap_or(&empty);

            let provider: Box<dyn PaymentProvider> = match name.as_str() {
                OVO => Box::new(OvoProvider::new(provider_settings, Arc::clone(&transport))),
                GOPAY => Box::new(GoPayProvider::new(provider_settings, Arc::clone(&transport))),
                _ => {
                    debug!(key = %key, "Ignoring unknown provider key");
                    continue;
                }
            };
            debug!(provider = %name, "Registered provider");
            providers.insert(name, provider);
        }

        Self {
            providers,
            logger: logger.unwrap_or_else(|| Arc::new(NullLogger)),
        }
    }

    /// Builds a gateway from the enabled providers of `config`.
    pub fn from_configuration(
        config: &Configuration,
        logger: Option<Arc<dyn Logger>>,
    ) -> Result<Self, GatewayError> {
        Self::new(&config.to_gateway_settings(), logger)
    }

    /// Names of the registered providers, in registration order.
    #[must_use]
    pub fn available_providers(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }

    /// Looks up a provider by name, ignoring case.
    #[must_use]
    pub fn provider(&self, name: &str) -> Option<&dyn PaymentProvider> {
        self.providers
            .get(&name.to_lowercase())
            .map(|p| &**p)
    }

    /// Looks up a provider mutably by name, ignoring case.
    #[must_use]
    pub fn provider_mut(&mut self, name: &str) -> Option<&mut Box<dyn PaymentProvider>> {
        self.providers.get_mut(&name.to_lowercase())
    }

    /// Starts authentication with `provider`.
    pub async fn login(
        &mut self,
        provider: &str,
        phone_number: &str,
    ) -> Result<ResultMap, GatewayError> {
        let logger = Arc::clone(&self.logger);
        let target = resolve_mut(&mut self.providers, provider)?;
        let name = target.name().to_string();

        logger.info(
            "Login attempt",
            &context(json!({"provider": name, "phone": mask_phone(phone_number)})),
        );

        match target.login(phone_number).await {
            Ok(result) => {
                logger.info(
                    "Login successful",
                    &context(json!({
                        "provider": name,
                        "requires_verification": result.get("requires_verification").cloned().unwrap_or(Value::Null),
                    })),
                );
                Ok(result)
            }
            Err(e) => Err(fail(logger.as_ref(), "Login failed", e)),
        }
    }

    /// Completes authentication with the OTP `code`.
    pub async fn verify_code(&mut self, provider: &str, code: &str) -> Result<ResultMap, GatewayError> {
        let logger = Arc::clone(&self.logger);
        let target = resolve_mut(&mut self.providers, provider)?;
        let name = target.name().to_string();

        logger.info("Verification attempt", &context(json!({"provider": name})));

        match target.verify_code(code).await {
            Ok(result) => {
                logger.info("Verification successful", &context(json!({"provider": name})));
                Ok(result)
            }
            Err(e) => Err(fail(logger.as_ref(), "Verification failed", e)),
        }
    }

    /// Returns the balance held with `provider`.
    pub async fn get_balance(&self, provider: &str) -> Result<ResultMap, GatewayError> {
        let target = self.resolve(provider)?;

        match target.get_balance().await {
            Ok(result) => {
                self.logger.info(
                    "Balance retrieved",
                    &context(json!({"provider": target.name()})),
                );
                Ok(result)
            }
            Err(e) => Err(fail(self.logger.as_ref(), "Failed to get balance", e)),
        }
    }

    /// Returns recent transactions; `limit` defaults to
    /// [`DEFAULT_TRANSACTION_LIMIT`].
    pub async fn get_transactions(
        &self,
        provider: &str,
        limit: Option<u32>,
    ) -> Result<ResultMap, GatewayError> {
        let target = self.resolve(provider)?;
        let limit = limit.unwrap_or(DEFAULT_TRANSACTION_LIMIT);

        match target.get_transactions(limit).await {
            Ok(result) => {
                self.logger.info(
                    "Transactions retrieved",
                    &context(json!({
                        "provider": target.name(),
                        "count": result.get("count").cloned().unwrap_or(Value::Null),
                    })),
                );
                Ok(result)
            }
            Err(e) => Err(fail(self.logger.as_ref(), "Failed to get transactions", e)),
        }
    }

    /// Ends the session with `provider`.
    ///
    /// Only an unknown provider name is an error; a failed logout is logged
    /// and reported as `Ok(false)`.
    pub async fn logout(&mut self, provider: &str) -> Result<bool, GatewayError> {
        let logger = Arc::clone(&self.logger);
        let target = resolve_mut(&mut self.providers, provider)?;
        let name = target.name().to_string();

        logger.info("Logout attempt", &context(json!({"provider": name})));

        let logged_out = target.logout().await;
        if logged_out {
            logger.info("Logout successful", &context(json!({"provider": name})));
        } else {
            logger.error("Logout failed", &context(json!({"provider": name})));
        }
        Ok(logged_out)
    }

    /// Returns whether `provider` holds a usable session.
    pub fn is_authenticated(&self, provider: &str) -> Result<bool, GatewayError> {
        Ok(self.resolve(provider)?.is_authenticated())
    }

    fn resolve(&self, name: &str) -> Result<&dyn PaymentProvider, GatewayError> {
        self.provider(name)
            .ok_or_else(|| GatewayError::unknown_provider(name, &self.available_providers()))
    }
}

fn resolve_mut<'a>(
    providers: &'a mut Registry,
    name: &str,
) -> Result<&'a mut Box<dyn PaymentProvider>, GatewayError> {
    let available: Vec<String> = providers.keys().cloned().collect();
    providers
        .get_mut(&name.to_lowercase())
        .ok_or_else(|| GatewayError::unknown_provider(name, &available))
}

/// Logs a provider failure and wraps it for the caller.
fn fail(logger: &dyn Logger, operation: &str, error: ProviderError) -> GatewayError {
    logger.error(
        operation,
        &context(json!({
            "provider": error.provider(),
            "error": error.message(),
            "code": error.code(),
        })),
    );
    GatewayError::from_provider(operation, error)
}

fn context(value: Value) -> LogContext {
    into_map(value)
}
