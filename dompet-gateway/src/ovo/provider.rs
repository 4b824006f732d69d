//! OVO implementation of [`PaymentProvider`].

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::{info, warn};

use dompet_core::config::DEFAULT_OVO_BASE_URL;
use dompet_core::error::ProviderError;
use dompet_core::traits::{AuthState, PaymentProvider, ResultMap};

use crate::normalize::{CURRENCY, decode, encode, history_endpoint, into_map, non_empty};
use crate::rest::{
    AuthHeader, HttpTransport, Method, ProviderDescriptor, RequestExecutor, SessionHeaders,
};

use super::types::{
    OVO, OVO_APP_ID, OVO_APP_VERSION, OVO_CASH_WALLET, OVO_OS, OVO_POINTS_WALLET, OVO_USER_AGENT,
    OvoFrontResponse, OvoLoginRequest, OvoLoginResponse, OvoVerifyRequest, OvoVerifyResponse,
    endpoints, history_entries,
};

/// OVO wallet provider.
///
/// Settings: `base_url`, `timeout`, `user_agent`, and `device_id`. The
/// device id is sent with login and verification when configured.
#[derive(Debug)]
pub struct OvoProvider {
    executor: RequestExecutor,
    device_id: Option<String>,
    state: AuthState,
}

impl OvoProvider {
    /// Creates a provider from its settings entry.
    #[must_use]
    pub fn new(settings: &Map<String, Value>, transport: Arc<dyn HttpTransport>) -> Self {
        let device_id = non_empty(
            settings
                .get("device_id")
                .and_then(Value::as_str)
                .map(str::to_string),
        );
        Self {
            executor: RequestExecutor::new(Self::descriptor(settings), transport),
            device_id,
            state: AuthState::default(),
        }
    }

    /// Descriptor for OVO with `settings` applied.
    #[must_use]
    pub fn descriptor(settings: &Map<String, Value>) -> ProviderDescriptor {
        ProviderDescriptor::new(
            OVO,
            DEFAULT_OVO_BASE_URL,
            OVO_USER_AGENT,
            AuthHeader::Raw("Authorization".to_string()),
        )
        .header("app-id", OVO_APP_ID)
        .header("app-version", OVO_APP_VERSION)
        .header("os", OVO_OS)
        .from_settings(settings)
    }

    /// Current authentication state.
    #[must_use]
    pub fn auth_state(&self) -> &AuthState {
        &self.state
    }

    /// Configured device id.
    #[must_use]
    pub fn device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    fn session(&self) -> Result<SessionHeaders<'_>, ProviderError> {
        if self.state.is_authenticated() {
            Ok(SessionHeaders::from_state(&self.state))
        } else {
            Err(ProviderError::not_authenticated(OVO))
        }
    }
}

#[async_trait]
impl PaymentProvider for OvoProvider {
    fn name(&self) -> &str {
        OVO
    }

    async fn login(&mut self, phone_number: &str) -> Result<ResultMap, ProviderError> {
        let body = encode(
            OVO,
            endpoints::LOGIN,
            &OvoLoginRequest {
                mobile: phone_number,
                device_id: self.device_id.as_deref(),
            },
        )?;

        let response = self
            .executor
            .execute(Method::POST, endpoints::LOGIN, Some(&body), SessionHeaders::none())
            .await?;
        let login: OvoLoginResponse = decode(OVO, endpoints::LOGIN, &response)?;

        let ref_id = non_empty(login.ref_id);
        if ref_id.is_none() {
            warn!(provider = OVO, "Login response carries no refId");
        }

        self.state.begin(phone_number, ref_id.clone());
        info!(provider = OVO, "OTP requested");

        Ok(into_map(json!({
            "success": true,
            "requires_verification": true,
            "message": login.message.unwrap_or_else(|| "OTP sent. Please verify the code.".to_string()),
            "ref_id": ref_id,
            "device_id": self.device_id,
        })))
    }

    async fn verify_code(&mut self, code: &str) -> Result<ResultMap, ProviderError> {
        let (Some(phone), Some(ref_id)) = (
            self.state.phone_number.clone(),
            self.state.session_id.clone(),
        ) else {
            return Err(ProviderError::not_logged_in(OVO));
        };

        let body = encode(
            OVO,
            endpoints::VERIFY,
            &OvoVerifyRequest {
                mobile: &phone,
                ref_id: &ref_id,
                verification_code: code,
                device_id: self.device_id.as_deref(),
                app_version: OVO_APP_VERSION,
            },
        )?;

        let response = self
            .executor
            .execute(Method::POST, endpoints::VERIFY, Some(&body), SessionHeaders::none())
            .await?;
        let verified: OvoVerifyResponse = decode(OVO, endpoints::VERIFY, &response)?;

        let Some(token) = non_empty(verified.token) else {
            return Err(ProviderError::invalid_response(
                OVO,
                endpoints::VERIFY,
                "Verification response carries no token",
                response,
            ));
        };

        self.state.grant(token);
        info!(provider = OVO, "Verification succeeded");

        Ok(into_map(json!({
            "success": true,
            "message": verified.message.unwrap_or_else(|| "Verification successful".to_string()),
        })))
    }

    async fn get_balance(&self) -> Result<ResultMap, ProviderError> {
        let session = self.session()?;
        let response = self
            .executor
            .execute(Method::GET, endpoints::BALANCE, None, session)
            .await?;
        let front: OvoFrontResponse = decode(OVO, endpoints::BALANCE, &response)?;

        let balance = front
            .wallet_balance(OVO_CASH_WALLET)
            .map_or(json!(0), Value::Number);
        let points = front
            .wallet_balance(OVO_POINTS_WALLET)
            .map_or(json!(0), Value::Number);

        Ok(into_map(json!({
            "success": true,
            "balance": balance,
            "points": points,
            "currency": CURRENCY,
            "raw": response,
        })))
    }

    async fn get_transactions(&self, limit: u32) -> Result<ResultMap, ProviderError> {
        let session = self.session()?;
        let endpoint = history_endpoint(endpoints::TRANSACTIONS, limit);
        let response = self
            .executor
            .execute(Method::GET, &endpoint, None, session)
            .await?;

        let transactions = history_entries(&response);
        Ok(into_map(json!({
            "success": true,
            "count": transactions.len(),
            "transactions": transactions,
        })))
    }

    fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    async fn logout(&mut self) -> bool {
        if !self.state.is_authenticated() {
            return true;
        }

        let result = self
            .executor
            .execute(
                Method::POST,
                endpoints::LOGOUT,
                None,
                SessionHeaders::from_state(&self.state),
            )
            .await;
        if let Err(e) = result {
            warn!(provider = OVO, error = %e, "Upstream logout failed, clearing local session");
        }

        self.state.clear();
        info!(provider = OVO, "Logged out");
        true
    }
}
