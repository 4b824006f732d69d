//! Integration tests: provider request shapes and response normalization.

mod common;

use common::{MockTransport, body, tree};
use dompet_core::error::ProviderErrorKind;
use dompet_core::traits::{DEFAULT_TRANSACTION_LIMIT, PaymentProvider};
use dompet_gateway::gopay::GoPayProvider;
use dompet_gateway::ovo::OvoProvider;
use dompet_gateway::rest::Method;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_ovo_full_flow() {
    let transport = Arc::new(MockTransport::new());
    transport
        .reply(200, json!({"refId": "ref-42", "message": "OTP sent"}))
        .reply(200, json!({"token": "ovo-token"}))
        .reply(
            200,
            json!({"balance": {"000": {"card_balance": 125000}, "600": {"card_balance": 300}}}),
        );
    let mut ovo = OvoProvider::new(
        &tree(json!({"device_id": "device-1", "timeout": 12})),
        transport.clone(),
    );

    let login = ovo.login("081234567890").await.unwrap();
    assert_eq!(login["success"], json!(true));
    assert_eq!(login["requires_verification"], json!(true));
    assert_eq!(login["ref_id"], json!("ref-42"));
    assert_eq!(login["message"], json!("OTP sent"));
    assert!(!ovo.is_authenticated());

    let verify = ovo.verify_code("123456").await.unwrap();
    assert_eq!(verify["success"], json!(true));
    assert!(ovo.is_authenticated());

    let balance = ovo.get_balance().await.unwrap();
    assert_eq!(balance["balance"], json!(125_000));
    assert_eq!(balance["points"], json!(300));
    assert_eq!(balance["currency"], json!("IDR"));
    assert!(balance["raw"]["balance"].is_object());

    let calls = transport.calls();
    assert_eq!(calls.len(), 3);

    let login_req = &calls[0];
    assert_eq!(login_req.method, Method::POST);
    assert_eq!(login_req.url, "https://api.ovo.id/v2.0/api/auth/customer/login2FA");
    assert_eq!(
        body(login_req),
        json!({"mobile": "081234567890", "deviceId": "device-1"})
    );
    assert_eq!(login_req.header("app-id"), Some("C7UMRSMFRZ46D9GW9IK7"));
    assert_eq!(login_req.header("os"), Some("Android"));
    assert!(login_req.header("app-version").is_some());
    assert!(login_req.header("authorization").is_none());
    assert_eq!(login_req.timeout, Duration::from_secs(12));

    let verify_req = &calls[1];
    assert!(verify_req.url.ends_with("/v2.0/api/auth/customer/login2FA/verify"));
    let verify_body = body(verify_req);
    assert_eq!(verify_body["refId"], json!("ref-42"));
    assert_eq!(verify_body["mobile"], json!("081234567890"));
    assert_eq!(verify_body["verificationCode"], json!("123456"));

    let balance_req = &calls[2];
    assert_eq!(balance_req.method, Method::GET);
    assert!(balance_req.url.ends_with("/v1.0/api/front/"));
    assert_eq!(balance_req.header("authorization"), Some("ovo-token"));
    assert!(balance_req.body.is_none());
}

#[tokio::test]
async fn test_ovo_login_without_ref_id_still_requires_verification() {
    let transport = Arc::new(MockTransport::new());
    transport.reply(200, json!({"message": "ok"}));
    let mut ovo = OvoProvider::new(&tree(json!({})), transport.clone());

    let login = ovo.login("081234567890").await.unwrap();
    assert_eq!(login["requires_verification"], json!(true));
    assert!(login["ref_id"].is_null());
    assert!(ovo.auth_state().session_id.is_none());

    let err = ovo.verify_code("123456").await.unwrap_err();
    assert_eq!(err.kind(), ProviderErrorKind::NotLoggedIn);
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_ovo_logout_keeps_pending_login() {
    let transport = Arc::new(MockTransport::new());
    transport
        .reply(200, json!({"refId": "ref-9"}))
        .reply(200, json!({"token": "ovo-token"}));
    let mut ovo = OvoProvider::new(&tree(json!({})), transport.clone());

    ovo.login("081234567890").await.unwrap();
    assert!(ovo.logout().await);
    assert_eq!(transport.call_count(), 1);
    assert_eq!(ovo.auth_state().session_id.as_deref(), Some("ref-9"));

    ovo.verify_code("123456").await.unwrap();
    assert!(ovo.is_authenticated());
    assert_eq!(body(&transport.last_call())["refId"], json!("ref-9"));
}

#[tokio::test]
async fn test_ovo_logout_calls_upstream_and_clears() {
    let transport = Arc::new(MockTransport::new());
    transport
        .reply(200, json!({"refId": "r"}))
        .reply(200, json!({"token": "t"}))
        .reply(200, json!({}));
    let mut ovo = OvoProvider::new(&tree(json!({})), transport.clone());

    ovo.login("081234567890").await.unwrap();
    ovo.verify_code("111111").await.unwrap();
    assert!(ovo.logout().await);

    let logout = transport.last_call();
    assert_eq!(logout.method, Method::POST);
    assert!(logout.url.ends_with("/v1.0/api/auth/customer/logout"));
    assert_eq!(logout.header("authorization"), Some("t"));
    assert!(!ovo.is_authenticated());
    assert!(ovo.auth_state().session_id.is_none());
}

#[tokio::test]
async fn test_ovo_transactions_limit_in_query() {
    let transport = Arc::new(MockTransport::new());
    transport
        .reply(200, json!({"refId": "r"}))
        .reply(200, json!({"token": "t"}))
        .reply(200, json!({"data": [{"id": 1}, {"id": 2}]}));
    let mut ovo = OvoProvider::new(&tree(json!({})), transport.clone());

    ovo.login("081234567890").await.unwrap();
    ovo.verify_code("111111").await.unwrap();
    let history = ovo.get_transactions(2).await.unwrap();

    assert_eq!(history["count"], json!(2));
    assert_eq!(history["transactions"], json!([{"id": 1}, {"id": 2}]));
    assert!(
        transport
            .last_call()
            .url
            .ends_with("/wallet/v2/transaction?page=1&limit=2")
    );
}

#[tokio::test]
async fn test_gopay_requires_password() {
    let transport = Arc::new(MockTransport::new());
    let mut gopay = GoPayProvider::new(&tree(json!({"password": ""})), transport.clone());

    let err = gopay.login("081234567890").await.unwrap_err();
    assert_eq!(err.kind(), ProviderErrorKind::MissingCredentials);
    assert!(err.endpoint().is_none());
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_gopay_full_flow() {
    let transport = Arc::new(MockTransport::new());
    transport
        .reply(
            200,
            json!({"data": {"otp_token": "otp-7", "otp_required": true}, "message": "OTP sent"}),
        )
        .reply(200, json!({"data": {"access_token": "gp-token"}}))
        .reply(200, json!({"data": {"balance": 98000}}))
        .reply(200, json!({"data": {"transactions": [{"id": "a"}]}}))
        .reply(204, json!({}));
    let mut gopay = GoPayProvider::new(
        &tree(json!({"password": "secret-pass", "base_url": "http://localhost:9000/"})),
        transport.clone(),
    );

    let login = gopay.login("081234567890").await.unwrap();
    assert_eq!(login["requires_verification"], json!(true));
    assert_eq!(login["session_id"], json!("otp-7"));

    gopay.verify_code("654321").await.unwrap();
    assert!(gopay.is_authenticated());

    let balance = gopay.get_balance().await.unwrap();
    assert_eq!(balance["balance"], json!(98000));
    assert_eq!(balance["currency"], json!("IDR"));
    assert!(balance.get("points").is_none());

    let history = gopay.get_transactions(DEFAULT_TRANSACTION_LIMIT).await.unwrap();
    assert_eq!(history["count"], json!(1));

    assert!(gopay.logout().await);
    assert!(!gopay.is_authenticated());

    let calls = transport.calls();
    assert_eq!(calls.len(), 5);

    assert_eq!(calls[0].url, "http://localhost:9000/v5/customers/login_with_password");
    assert_eq!(
        body(&calls[0]),
        json!({"phone": "081234567890", "password": "secret-pass"})
    );
    assert!(calls[0].header("x-session-id").is_none());

    assert!(calls[1].url.ends_with("/v5/customers/verify_otp"));
    assert_eq!(calls[1].header("x-session-id"), Some("otp-7"));
    assert_eq!(body(&calls[1]), json!({"otp": "654321", "otp_token": "otp-7"}));
    assert!(calls[1].header("authorization").is_none());

    assert!(calls[2].url.ends_with("/wallet/profile"));
    assert_eq!(calls[2].header("authorization"), Some("Bearer gp-token"));
    assert_eq!(calls[2].header("x-session-id"), Some("otp-7"));

    assert!(calls[3].url.ends_with("/wallet/history?page=1&limit=10"));

    assert_eq!(calls[4].method, Method::DELETE);
    assert!(calls[4].url.ends_with("/v3/auth/token"));
}

#[tokio::test]
async fn test_gopay_login_without_otp() {
    let transport = Arc::new(MockTransport::new());
    transport.reply(
        200,
        json!({"data": {"otp_required": false, "access_token": "direct"}}),
    );
    let mut gopay = GoPayProvider::new(&tree(json!({"password": "p"})), transport);

    let login = gopay.login("081234567890").await.unwrap();
    assert_eq!(login["requires_verification"], json!(false));
    assert!(gopay.is_authenticated());
}

#[tokio::test]
async fn test_gopay_logout_keeps_pending_login() {
    let transport = Arc::new(MockTransport::new());
    transport
        .reply(200, json!({"data": {"otp_token": "otp-3", "otp_required": true}}))
        .reply(200, json!({"data": {"access_token": "gp-token"}}));
    let mut gopay = GoPayProvider::new(&tree(json!({"password": "p"})), transport.clone());

    gopay.login("081234567890").await.unwrap();
    assert!(gopay.logout().await);
    assert_eq!(transport.call_count(), 1);

    gopay.verify_code("654321").await.unwrap();
    assert!(gopay.is_authenticated());
    assert_eq!(transport.last_call().header("x-session-id"), Some("otp-3"));
}

#[tokio::test]
async fn test_gopay_verify_without_token_is_invalid() {
    let transport = Arc::new(MockTransport::new());
    transport
        .reply(200, json!({"data": {"otp_token": "otp"}}))
        .reply(200, json!({"data": {}}));
    let mut gopay = GoPayProvider::new(&tree(json!({"password": "p"})), transport);

    gopay.login("081234567890").await.unwrap();
    let err = gopay.verify_code("000000").await.unwrap_err();
    assert_eq!(err.kind(), ProviderErrorKind::InvalidResponse);
    assert!(!gopay.is_authenticated());
}

#[tokio::test]
async fn test_non_json_error_body() {
    let transport = Arc::new(MockTransport::new());
    transport.reply_text(502, "<html>Bad Gateway</html>");
    let mut gopay = GoPayProvider::new(&tree(json!({"password": "p"})), transport);

    let err = gopay.login("081234567890").await.unwrap_err();
    assert_eq!(err.kind(), ProviderErrorKind::HttpStatus);
    assert_eq!(err.code(), 502);
    assert_eq!(
        err.raw_response(),
        Some(&json!({"raw": "<html>Bad Gateway</html>"}))
    );
}
