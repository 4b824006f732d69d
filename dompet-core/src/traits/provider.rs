//! Payment provider trait definitions.
//!
//! # Architecture
//!
//! Every wallet adapter implements [`PaymentProvider`]. Authentication is a
//! two-step flow: `login` asks the upstream to send an OTP and returns the
//! session/device identifier that correlates the steps, `verify_code`
//! exchanges the OTP for an auth token. Balance and history queries require
//! the token.
//!
//! ```text
//!            login            verify_code
//!   idle ─────────────▶ pending ─────────────▶ authenticated
//!     ▲                                             │
//!     └──────────────────── logout ─────────────────┘
//! ```
//!
//! State lives in each provider's own [`AuthState`] and is only changed by
//! these calls; the library never expires a token on its own.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ProviderError;

/// Normalized result returned by provider operations.
pub type ResultMap = Map<String, Value>;

/// Number of history entries fetched when the caller does not specify one.
pub const DEFAULT_TRANSACTION_LIMIT: u32 = 10;

/// Wallet provider capability.
///
/// Operations that change authentication state take `&mut self`; sharing a
/// provider across tasks requires external synchronization.
///
/// # Example
///
/// ```ignore
/// use dompet_core::traits::PaymentProvider;
///
/// let started = provider.login("081234567890").await?;
/// assert_eq!(started["requires_verification"], true);
/// provider.verify_code("123456").await?;
/// let balance = provider.get_balance().await?;
/// ```
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Returns the lower-case provider name (`"ovo"`, `"gopay"`).
    fn name(&self) -> &str;

    /// Starts authentication for `phone_number`.
    async fn login(&mut self, phone_number: &str) -> Result<ResultMap, ProviderError>;

    /// Completes authentication with the OTP sent by the upstream.
    ///
    /// Fails with a `NotLoggedIn` error if no login is pending.
    async fn verify_code(&mut self, code: &str) -> Result<ResultMap, ProviderError>;

    /// Returns the wallet balance.
    ///
    /// Fails with a `NotAuthenticated` error, without a request, when
    /// [`is_authenticated`](Self::is_authenticated) is false.
    async fn get_balance(&self) -> Result<ResultMap, ProviderError>;

    /// Returns up to `limit` recent transactions.
    async fn get_transactions(&self, limit: u32) -> Result<ResultMap, ProviderError>;

    /// Returns true if the provider holds a usable auth token.
    fn is_authenticated(&self) -> bool;

    /// Ends the session.
    ///
    /// The upstream logout is best effort; local state is cleared whatever
    /// happens and the call always reports success.
    async fn logout(&mut self) -> bool;
}

/// Per-provider authentication state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthState {
    /// Phone number from the last successful `login`.
    pub phone_number: Option<String>,
    /// Device or session identifier correlating login and verification.
    pub session_id: Option<String>,
    /// Token granted by verification.
    #[serde(skip_serializing)]
    pub auth_token: Option<String>,
    /// Set by a successful verification.
    pub authenticated: bool,
}

impl AuthState {
    /// True iff the flag is set and a non-empty token is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated && self.auth_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Returns the token if authenticated.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        if self.is_authenticated() {
            self.auth_token.as_deref()
        } else {
            None
        }
    }

    /// Records the outcome of a successful `login`.
    pub fn begin(&mut self, phone_number: &str, session_id: Option<String>) {
        self.phone_number = Some(phone_number.to_string());
        self.session_id = session_id;
        self.auth_token = None;
        self.authenticated = false;
    }

    /// Records the token granted by a successful verification.
    pub fn grant(&mut self, token: String) {
        self.authenticated = !token.is_empty();
        self.auth_token = Some(token);
    }

    /// Clears the token and session fields.
    pub fn clear(&mut self) {
        self.session_id = None;
        self.auth_token = None;
        self.authenticated = false;
    }
}
