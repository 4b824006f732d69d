//! Integration tests: WalletGateway dispatch, error wrapping, and logging.

mod common;

use common::{MockTransport, tree};
use dompet_core::error::{GatewayErrorKind, ProviderErrorKind};
use dompet_core::traits::{LogLevel, Logger, MemoryLogger};
use dompet_gateway::WalletGateway;
use dompet_gateway::rest::TransportError;
use serde_json::json;
use std::error::Error as _;
use std::sync::Arc;

fn gateway(transport: &Arc<MockTransport>) -> WalletGateway {
    WalletGateway::with_transport(
        &tree(json!({
            "ovo": {"device_id": "device-1"},
            "gopay": {"password": "secret-pass"}
        })),
        transport.clone(),
        None,
    )
}

#[test]
fn test_reports_providers_in_registration_order() {
    let transport = Arc::new(MockTransport::new());
    let gw = gateway(&transport);
    assert_eq!(gw.available_providers(), vec!["ovo", "gopay"]);

    let reversed = WalletGateway::with_transport(
        &tree(json!({"gopay": {}, "ovo": {}})),
        transport,
        None,
    );
    assert_eq!(reversed.available_providers(), vec!["gopay", "ovo"]);
}

#[tokio::test]
async fn test_authenticated_calls_fail_before_login() {
    let transport = Arc::new(MockTransport::new());
    let gw = gateway(&transport);

    for provider in ["ovo", "gopay"] {
        let err = gw.get_balance(provider).await.unwrap_err();
        assert_eq!(err.kind(), GatewayErrorKind::Provider);
        assert!(err.message().contains("Not authenticated"));
        assert!(err.message().starts_with("Failed to get balance"));
        assert_eq!(err.code(), 401);
        let source = err.provider_error().unwrap();
        assert_eq!(source.kind(), ProviderErrorKind::NotAuthenticated);
        assert!(source.endpoint().is_none());

        let err = gw.get_transactions(provider, None).await.unwrap_err();
        assert!(err.message().starts_with("Failed to get transactions"));
        assert!(err.message().contains("Not authenticated"));

        assert!(!gw.is_authenticated(provider).unwrap());
    }

    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_unknown_provider_lists_available() {
    let transport = Arc::new(MockTransport::new());
    let mut gw = gateway(&transport);

    let err = gw.login("dana", "081234567890").await.unwrap_err();
    assert_eq!(err.kind(), GatewayErrorKind::UnknownProvider);
    assert!(err.message().contains("dana"));
    assert!(err.message().contains("ovo, gopay"));
    assert_eq!(err.context()["available"], json!(["ovo", "gopay"]));

    assert!(gw.logout("dana").await.is_err());
    assert!(gw.is_authenticated("dana").is_err());
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_provider_names_are_case_insensitive() {
    let transport = Arc::new(MockTransport::new());
    let gw = gateway(&transport);

    assert!(!gw.is_authenticated("OVO").unwrap());
    assert!(!gw.is_authenticated("GoPay").unwrap());
    assert_eq!(gw.provider("Ovo").unwrap().name(), "ovo");
}

#[tokio::test]
async fn test_logout_before_login_makes_no_request() {
    let transport = Arc::new(MockTransport::new());
    let mut gw = gateway(&transport);

    assert!(gw.logout("ovo").await.unwrap());
    assert!(gw.logout("gopay").await.unwrap());
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_failed_upstream_logout_still_clears_session() {
    let transport = Arc::new(MockTransport::new());
    transport
        .reply(200, json!({"refId": "ref-1"}))
        .reply(200, json!({"token": "ovo-token"}))
        .fail(TransportError::Connect("connection reset".to_string()));
    let mut gw = gateway(&transport);

    gw.login("ovo", "081234567890").await.unwrap();
    gw.verify_code("ovo", "123456").await.unwrap();
    assert!(gw.is_authenticated("ovo").unwrap());

    assert!(gw.logout("ovo").await.unwrap());
    assert!(!gw.is_authenticated("ovo").unwrap());
    assert_eq!(transport.call_count(), 3);

    let err = gw.get_balance("ovo").await.unwrap_err();
    assert!(err.message().contains("Not authenticated"));
    assert_eq!(transport.call_count(), 3);
}

#[tokio::test]
async fn test_upstream_error_is_wrapped_with_source() {
    let transport = Arc::new(MockTransport::new());
    transport.reply(500, json!({"message": "maintenance"}));
    let mut gw = gateway(&transport);

    let err = gw.login("ovo", "081234567890").await.unwrap_err();
    assert_eq!(err.kind(), GatewayErrorKind::Provider);
    assert_eq!(err.code(), 500);
    assert_eq!(err.provider(), Some("ovo"));
    assert!(err.message().starts_with("Login failed: HTTP 500"));
    assert!(err.message().contains("maintenance"));
    assert_eq!(err.context()["status"], json!(500));
    assert_eq!(err.context()["response"], json!({"message": "maintenance"}));

    let source = err.source().unwrap();
    assert!(source.to_string().contains("[Provider] ovo"));
    assert!(!gw.is_authenticated("ovo").unwrap());
}

#[tokio::test]
async fn test_transport_failure_is_wrapped() {
    let transport = Arc::new(MockTransport::new());
    transport.fail(TransportError::Timeout { timeout_ms: 30_000 });
    let mut gw = gateway(&transport);

    let err = gw.login("gopay", "081234567890").await.unwrap_err();
    let source = err.provider_error().unwrap();
    assert_eq!(source.kind(), ProviderErrorKind::Transport);
    assert_eq!(source.endpoint(), Some("/v5/customers/login_with_password"));
    assert!(
        err.context()["transport_error"]
            .as_str()
            .unwrap()
            .contains("timed out")
    );
}

#[tokio::test]
async fn test_verify_before_login() {
    let transport = Arc::new(MockTransport::new());
    let mut gw = gateway(&transport);

    let err = gw.verify_code("gopay", "123456").await.unwrap_err();
    assert!(err.message().starts_with("Verification failed"));
    assert_eq!(
        err.provider_error().unwrap().kind(),
        ProviderErrorKind::NotLoggedIn
    );
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_logger_receives_masked_phone() {
    let transport = Arc::new(MockTransport::new());
    transport.reply(200, json!({"refId": "ref-1"}));
    let logger = Arc::new(MemoryLogger::new());
    let mut gw = WalletGateway::with_transport(
        &tree(json!({"ovo": {}})),
        transport,
        Some(logger.clone() as Arc<dyn Logger>),
    );

    gw.login("ovo", "08123456789").await.unwrap();

    let entries = logger.entries();
    assert_eq!(entries[0].message, "Login attempt");
    assert_eq!(entries[0].context["phone"], json!("08*******89"));
    assert_eq!(entries[1].message, "Login successful");
    assert!(
        entries
            .iter()
            .all(|e| !e.context.values().any(|v| v == "08123456789"))
    );
}

#[tokio::test]
async fn test_logger_receives_failures() {
    let transport = Arc::new(MockTransport::new());
    let logger = Arc::new(MemoryLogger::new());
    let gw = WalletGateway::with_transport(
        &tree(json!({"gopay": {"password": "p"}})),
        transport,
        Some(logger.clone() as Arc<dyn Logger>),
    );

    gw.get_balance("gopay").await.unwrap_err();

    let errors = logger.entries_at(LogLevel::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Failed to get balance");
    assert_eq!(errors[0].context["provider"], json!("gopay"));
}

#[tokio::test]
async fn test_transactions_default_limit() {
    let transport = Arc::new(MockTransport::new());
    transport
        .reply(200, json!({"refId": "ref-1"}))
        .reply(200, json!({"token": "tok"}))
        .reply(200, json!({"data": [{"complete": [{"id": 1}]}]}));
    let mut gw = gateway(&transport);

    gw.login("ovo", "081234567890").await.unwrap();
    gw.verify_code("ovo", "123456").await.unwrap();
    let result = gw.get_transactions("ovo", None).await.unwrap();

    assert_eq!(result["count"], json!(1));
    assert!(
        transport
            .last_call()
            .url
            .ends_with("/wallet/v2/transaction?page=1&limit=10")
    );
}
