//! Helpers shared by the provider adapters for shaping results.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use dompet_core::error::ProviderError;
use dompet_core::traits::ResultMap;

/// Currency reported by every supported wallet.
pub const CURRENCY: &str = "IDR";

/// Converts a `json!` object literal into a result map.
///
/// Non-object values are wrapped under `"data"`.
pub(crate) fn into_map(value: Value) -> ResultMap {
    match value {
        Value::Object(map) => map,
        other => {
            let mut map = ResultMap::new();
            map.insert("data".to_string(), other);
            map
        }
    }
}

/// Decodes an upstream payload, reporting failures as `InvalidResponse`.
pub(crate) fn decode<T: DeserializeOwned>(
    provider: &str,
    endpoint: &str,
    value: &Value,
) -> Result<T, ProviderError> {
    serde_json::from_value(value.clone()).map_err(|e| {
        ProviderError::invalid_response(
            provider,
            endpoint,
            format!("Unexpected response from {endpoint}: {e}"),
            value.clone(),
        )
    })
}

/// Encodes a request body, reporting failures as `InvalidRequest`.
pub(crate) fn encode<T: Serialize>(
    provider: &str,
    endpoint: &str,
    body: &T,
) -> Result<Value, ProviderError> {
    serde_json::to_value(body).map_err(|e| {
        ProviderError::invalid_request(provider, endpoint, format!("failed to encode request body: {e}"))
    })
}

/// History endpoint with the first page and `limit` entries.
pub(crate) fn history_endpoint(path: &str, limit: u32) -> String {
    format!("{path}?page=1&limit={limit}")
}

/// Returns a non-empty string or `None`.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
