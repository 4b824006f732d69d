//! OVO request and response payloads.

#![allow(clippy::doc_markdown)]

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Provider name.
pub const OVO: &str = "ovo";

/// Application id sent in the `app-id` header.
pub const OVO_APP_ID: &str = "C7UMRSMFRZ46D9GW9IK7";

/// Application version sent in the `app-version` header.
pub const OVO_APP_VERSION: &str = "3.43.0";

/// Operating system sent in the `os` header.
pub const OVO_OS: &str = "Android";

/// Default `User-Agent`.
pub const OVO_USER_AGENT: &str = "OVO/3.43.0 (Android)";

/// Wallet id of the cash balance in the front-page payload.
pub const OVO_CASH_WALLET: &str = "000";

/// Wallet id of OVO points in the front-page payload.
pub const OVO_POINTS_WALLET: &str = "600";

/// Upstream endpoints.
pub mod endpoints {
    /// Starts the 2FA login.
    pub const LOGIN: &str = "/v2.0/api/auth/customer/login2FA";
    /// Submits the OTP.
    pub const VERIFY: &str = "/v2.0/api/auth/customer/login2FA/verify";
    /// Front page, carries the balances.
    pub const BALANCE: &str = "/v1.0/api/front/";
    /// Transaction history.
    pub const TRANSACTIONS: &str = "/wallet/v2/transaction";
    /// Ends the session.
    pub const LOGOUT: &str = "/v1.0/api/auth/customer/logout";
}

/// Body of the login request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OvoLoginRequest<'a> {
    /// Phone number.
    pub mobile: &'a str,
    /// Configured device id, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<&'a str>,
}

/// Response to the login request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OvoLoginResponse {
    /// Reference id correlating login and verification.
    #[serde(default)]
    pub ref_id: Option<String>,
    /// Upstream message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of the verification request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OvoVerifyRequest<'a> {
    /// Phone number from `login`.
    pub mobile: &'a str,
    /// Reference id from `login`.
    pub ref_id: &'a str,
    /// OTP code.
    pub verification_code: &'a str,
    /// Configured device id, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<&'a str>,
    /// Client version.
    pub app_version: &'a str,
}

/// Response to the verification request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OvoVerifyResponse {
    /// Auth token.
    #[serde(default)]
    pub token: Option<String>,
    /// Upstream message.
    #[serde(default)]
    pub message: Option<String>,
}

/// One wallet entry of the front-page `balance` object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OvoWallet {
    /// Balance in rupiah.
    #[serde(default)]
    pub card_balance: Option<Number>,
    /// Card number.
    #[serde(default)]
    pub card_no: Option<String>,
}

/// Front-page response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OvoFrontResponse {
    /// Wallets keyed by wallet id.
    #[serde(default)]
    pub balance: serde_json::Map<String, Value>,
}

impl OvoFrontResponse {
    /// Balance of `wallet`, if present and well formed.
    #[must_use]
    pub fn wallet_balance(&self, wallet: &str) -> Option<Number> {
        self.balance
            .get(wallet)
            .cloned()
            .and_then(|v| serde_json::from_value::<OvoWallet>(v).ok())
            .and_then(|w| w.card_balance)
    }
}

/// Extracts history entries from a transaction response.
///
/// Upstream wraps history as `{"data": [{"complete": [...]}]}`; a flat
/// `{"data": [...]}` list is accepted too.
#[must_use]
pub fn history_entries(response: &Value) -> Vec<Value> {
    let Some(data) = response.get("data").and_then(Value::as_array) else {
        return Vec::new();
    };
    match data.first().and_then(|first| first.get("complete")) {
        Some(Value::Array(complete)) => complete.clone(),
        _ => data.clone(),
    }
}
