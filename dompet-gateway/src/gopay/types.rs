//! GoPay request and response payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Provider name.
pub const GOPAY: &str = "gopay";

/// Default `User-Agent`.
pub const GOPAY_USER_AGENT: &str = "Gojek/4.59.1 (Android)";

/// Header carrying the session id.
pub const GOPAY_SESSION_HEADER: &str = "X-Session-ID";

/// Upstream endpoints.
pub mod endpoints {
    /// Password login, triggers the OTP.
    pub const LOGIN: &str = "/v5/customers/login_with_password";
    /// Submits the OTP.
    pub const VERIFY: &str = "/v5/customers/verify_otp";
    /// Wallet profile, carries the balance.
    pub const BALANCE: &str = "/wallet/profile";
    /// Transaction history.
    pub const TRANSACTIONS: &str = "/wallet/history";
    /// Revokes the token.
    pub const LOGOUT: &str = "/v3/auth/token";
}

/// Body of the login request.
#[derive(Debug, Clone, Serialize)]
pub struct GoPayLoginRequest<'a> {
    /// Phone number.
    pub phone: &'a str,
    /// Account password.
    pub password: &'a str,
}

/// Payload of the login response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoPayLoginData {
    /// Token identifying the pending OTP.
    #[serde(default, alias = "session_id")]
    pub otp_token: Option<String>,
    /// Whether an OTP must be submitted. Assumed when absent.
    #[serde(default)]
    pub otp_required: Option<bool>,
    /// Granted immediately when no OTP is required.
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Body of the verification request.
#[derive(Debug, Clone, Serialize)]
pub struct GoPayVerifyRequest<'a> {
    /// OTP code.
    pub otp: &'a str,
    /// Token from `login`.
    pub otp_token: &'a str,
}

/// Payload of the verification response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoPayVerifyData {
    /// Bearer token.
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Payload of the wallet profile response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoPayProfileData {
    /// Balance in rupiah.
    #[serde(default)]
    pub balance: Option<Number>,
}

/// Upstream envelope: `{"data": ..., "message": ...}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoPayEnvelope<T> {
    /// Payload.
    #[serde(default)]
    pub data: Option<T>,
    /// Upstream message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Extracts history entries from a history response.
///
/// Accepts `{"data": [...]}` and `{"data": {"transactions": [...]}}`.
#[must_use]
pub fn history_entries(response: &Value) -> Vec<Value> {
    match response.get("data") {
        Some(Value::Array(list)) => list.clone(),
        Some(Value::Object(data)) => data
            .get("transactions")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}
