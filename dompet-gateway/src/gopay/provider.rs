//! GoPay implementation of [`PaymentProvider`].

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::{info, warn};

use dompet_core::config::DEFAULT_GOPAY_BASE_URL;
use dompet_core::error::ProviderError;
use dompet_core::traits::{AuthState, PaymentProvider, ResultMap};

use crate::normalize::{CURRENCY, decode, encode, history_endpoint, into_map, non_empty};
use crate::rest::{
    AuthHeader, HttpTransport, Method, ProviderDescriptor, RequestExecutor, SessionHeaders,
};

use super::types::{
    GOPAY, GOPAY_SESSION_HEADER, GOPAY_USER_AGENT, GoPayEnvelope, GoPayLoginData,
    GoPayLoginRequest, GoPayProfileData, GoPayVerifyData, GoPayVerifyRequest, endpoints,
    history_entries,
};

/// GoPay wallet provider.
///
/// Settings: `base_url`, `timeout`, `user_agent`, and `password`. Login
/// fails without a password and never reaches the network.
pub struct GoPayProvider {
    executor: RequestExecutor,
    password: Option<String>,
    state: AuthState,
}

impl std::fmt::Debug for GoPayProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoPayProvider")
            .field("executor", &self.executor)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("authenticated", &self.state.is_authenticated())
            .finish()
    }
}

impl GoPayProvider {
    /// Creates a provider from its settings entry.
    #[must_use]
    pub fn new(settings: &Map<String, Value>, transport: Arc<dyn HttpTransport>) -> Self {
        let password = non_empty(
            settings
                .get("password")
                .and_then(Value::as_str)
                .map(str::to_string),
        );
        Self {
            executor: RequestExecutor::new(Self::descriptor(settings), transport),
            password,
            state: AuthState::default(),
        }
    }

    /// Descriptor for GoPay with `settings` applied.
    #[must_use]
    pub fn descriptor(settings: &Map<String, Value>) -> ProviderDescriptor {
        ProviderDescriptor::new(
            GOPAY,
            DEFAULT_GOPAY_BASE_URL,
            GOPAY_USER_AGENT,
            AuthHeader::Bearer,
        )
        .session_header(GOPAY_SESSION_HEADER)
        .from_settings(settings)
    }

    /// Current authentication state.
    #[must_use]
    pub fn auth_state(&self) -> &AuthState {
        &self.state
    }

    fn session(&self) -> Result<SessionHeaders<'_>, ProviderError> {
        if self.state.is_authenticated() {
            Ok(SessionHeaders::from_state(&self.state))
        } else {
            Err(ProviderError::not_authenticated(GOPAY))
        }
    }
}

#[async_trait]
impl PaymentProvider for GoPayProvider {
    fn name(&self) -> &str {
        GOPAY
    }

    async fn login(&mut self, phone_number: &str) -> Result<ResultMap, ProviderError> {
        let Some(password) = self.password.as_deref() else {
            return Err(ProviderError::missing_credentials(GOPAY, "password"));
        };

        let body = encode(
            GOPAY,
            endpoints::LOGIN,
            &GoPayLoginRequest {
                phone: phone_number,
                password,
            },
        )?;
        let response = self
            .executor
            .execute(Method::POST, endpoints::LOGIN, Some(&body), SessionHeaders::none())
            .await?;

        let envelope: GoPayEnvelope<GoPayLoginData> = decode(GOPAY, endpoints::LOGIN, &response)?;
        let data = envelope.data.unwrap_or_default();
        let session_id = non_empty(data.otp_token);
        let requires_verification = data.otp_required.unwrap_or(true);

        if !requires_verification && let Some(token) = non_empty(data.access_token) {
            self.state.begin(phone_number, session_id);
            self.state.grant(token);
            info!(provider = GOPAY, "Logged in without OTP");
            return Ok(into_map(json!({
                "success": true,
                "requires_verification": false,
                "message": envelope.message.unwrap_or_else(|| "Login successful".to_string()),
            })));
        }

        let Some(session_id) = session_id else {
            return Err(ProviderError::invalid_response(
                GOPAY,
                endpoints::LOGIN,
                "Login response carries no OTP token",
                response,
            ));
        };

        self.state.begin(phone_number, Some(session_id.clone()));
        info!(provider = GOPAY, "OTP requested");

        Ok(into_map(json!({
            "success": true,
            "requires_verification": true,
            "message": envelope.message.unwrap_or_else(|| "OTP sent. Please verify the code.".to_string()),
            "session_id": session_id,
        })))
    }

    async fn verify_code(&mut self, code: &str) -> Result<ResultMap, ProviderError> {
        let Some(otp_token) = self.state.session_id.clone() else {
            return Err(ProviderError::not_logged_in(GOPAY));
        };

        let body = encode(
            GOPAY,
            endpoints::VERIFY,
            &GoPayVerifyRequest {
                otp: code,
                otp_token: &otp_token,
            },
        )?;
        let response = self
            .executor
            .execute(
                Method::POST,
                endpoints::VERIFY,
                Some(&body),
                SessionHeaders::from_state(&self.state),
            )
            .await?;

        let envelope: GoPayEnvelope<GoPayVerifyData> = decode(GOPAY, endpoints::VERIFY, &response)?;
        let Some(token) = envelope.data.and_then(|d| non_empty(d.access_token)) else {
            return Err(ProviderError::invalid_response(
                GOPAY,
                endpoints::VERIFY,
                "Verification response carries no access token",
                response,
            ));
        };

        self.state.grant(token);
        info!(provider = GOPAY, "Verification succeeded");

        Ok(into_map(json!({
            "success": true,
            "message": envelope.message.unwrap_or_else(|| "Verification successful".to_string()),
        })))
    }

    async fn get_balance(&self) -> Result<ResultMap, ProviderError> {
        let session = self.session()?;
        let response = self
            .executor
            .execute(Method::GET, endpoints::BALANCE, None, session)
            .await?;
        let envelope: GoPayEnvelope<GoPayProfileData> =
            decode(GOPAY, endpoints::BALANCE, &response)?;

        let balance = envelope
            .data
            .and_then(|d| d.balance)
            .map_or(json!(0), Value::Number);

        Ok(into_map(json!({
            "success": true,
            "balance": balance,
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
                Method::DELETE,
                endpoints::LOGOUT,
                None,
                SessionHeaders::from_state(&self.state),
            )
            .await;
        if let Err(e) = result {
            warn!(provider = GOPAY, error = %e, "Upstream logout failed, clearing local session");
        }

        self.state.clear();
        info!(provider = GOPAY, "Logged out");
        true
    }
}
