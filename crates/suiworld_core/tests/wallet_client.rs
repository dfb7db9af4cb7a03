//! Wallet client and swap form against a mocked backend.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use suiworld_core::wallet::{
    AssetSymbol, ConfirmOverrides, SwapExecuteRequest, SwapForm, SwapQuoteRequest, WALLET_SAME_SYMBOL,
    WALLET_UNKNOWN, WalletClient,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> WalletClient {
    WalletClient::new(format!("{}/api/wallet", server.uri()))
}

fn quote_body() -> Value {
    json!({
        "paySymbol": "SUI",
        "receiveSymbol": "SWT",
        "payAmount": "1.5",
        "receiveAmount": "5490",
        "feeRateBps": 30,
        "feeAmount": "0.0045",
        "price": "3660",
        "expiresAt": "2025-06-01T00:00:30Z",
    })
}

fn receipt_body() -> Value {
    json!({
        "txDigest": "9xDigest",
        "chain": "sui",
        "executedAt": "2025-06-01T00:00:10Z",
        "paySymbol": "SUI",
        "receiveSymbol": "SWT",
        "payAmount": "1.5",
        "receiveAmount": "5490",
    })
}

#[tokio::test]
async fn test_summary_orders_assets() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/wallet/summary"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "assets": [
                {"symbol": "ETH", "amount": "0.1", "usdValue": "450", "priceUsd": "4500"},
                {"symbol": "SUI", "amount": "10", "usdValue": "36.6", "priceUsd": "3.66"},
                {"symbol": "BTC", "amount": "0", "usdValue": "0", "priceUsd": "155500"},
                {"symbol": "SWT", "logoUrl": "/swt.png", "amount": "1000", "usdValue": "1", "priceUsd": "0.001"},
            ],
            "updatedAt": "2025-06-01T00:00:00Z",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let summary = client_for(&server).summary().await.unwrap();
    let order: Vec<_> = summary.assets.iter().map(|a| a.symbol.as_str()).collect();
    assert_eq!(order, vec!["SWT", "SUI", "BTC", "ETH"]);
    assert_eq!(summary.assets[0].logo_url.as_deref(), Some("/swt.png"));
}

#[tokio::test]
async fn test_quote_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/wallet/swap/quote"))
        .and(body_partial_json(json!({
            "paySymbol": "SUI",
            "receiveSymbol": "SWT",
            "payAmount": "1.5",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(quote_body()))
        .expect(1)
        .mount(&server)
        .await;

    let quote = client_for(&server)
        .quote(&SwapQuoteRequest::new(AssetSymbol::Sui, AssetSymbol::Swt, "1.5"))
        .await
        .unwrap();
    assert_eq!(quote.receive_amount, "5490");
    assert_eq!(quote.fee_rate_bps, 30);
}

#[tokio::test]
async fn test_execute_sends_generated_idempotency_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/wallet/swap/execute"))
        .respond_with(ResponseTemplate::new(200).set_body_json(receipt_body()))
        .mount(&server)
        .await;

    let request = SwapExecuteRequest::from(SwapQuoteRequest::new(
        AssetSymbol::Sui,
        AssetSymbol::Swt,
        "1.5",
    ));
    let receipt = client_for(&server).execute(request).await.unwrap();
    assert_eq!(receipt.tx_digest, "9xDigest");

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let key = body["idempotencyKey"].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(key).is_ok());
}

#[tokio::test]
async fn test_execute_keeps_caller_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/wallet/swap/execute"))
        .and(body_partial_json(json!({"idempotencyKey": "caller-key"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(receipt_body()))
        .expect(1)
        .mount(&server)
        .await;

    let request = SwapExecuteRequest::from(SwapQuoteRequest::new(
        AssetSymbol::Sui,
        AssetSymbol::Swt,
        "1.5",
    ))
    .with_idempotency_key("caller-key");
    client_for(&server).execute(request).await.unwrap();
}

#[tokio::test]
async fn test_address_for_symbol() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/wallet/address/SUI"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "symbol": "SUI",
            "address": "0xdeposit",
            "chain": "sui",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let address = client_for(&server).address(AssetSymbol::Sui).await.unwrap();
    assert_eq!(address.symbol, AssetSymbol::Sui);
    assert_eq!(address.address, "0xdeposit");
}

#[tokio::test]
async fn test_error_body_maps_to_wallet_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/wallet/swap/quote"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "WALLET_SAME_SYMBOL",
            "detail": "pay and receive must differ",
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .quote(&SwapQuoteRequest::new(AssetSymbol::Sui, AssetSymbol::Sui, "1"))
        .await
        .unwrap_err();
    assert_eq!(err.code, WALLET_SAME_SYMBOL);
    assert_eq!(err.status, Some(400));
    assert_eq!(err.message, "pay and receive must differ");
    assert_eq!(err.user_message(), "같은 자산끼리는 스왑할 수 없어요.");
}

#[tokio::test]
async fn test_unknown_code_falls_back_to_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/wallet/summary"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "db offline"})))
        .mount(&server)
        .await;

    let err = client_for(&server).summary().await.unwrap_err();
    assert_eq!(err.code, WALLET_UNKNOWN);
    assert_eq!(err.status, Some(500));
    assert_eq!(err.user_message(), "db offline");
}

#[tokio::test]
async fn test_unreachable_backend_is_unknown_error() {
    let client = WalletClient::new("http://127.0.0.1:9/api/wallet");
    let err = client.summary().await.unwrap_err();
    assert_eq!(err.code, WALLET_UNKNOWN);
    assert_eq!(err.status, None);
    assert!(!err.message.is_empty());
}

// ==================== Swap form ====================

#[tokio::test]
async fn test_form_quote_then_confirm_clears_amount() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/wallet/swap/quote"))
        .respond_with(ResponseTemplate::new(200).set_body_json(quote_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/wallet/swap/execute"))
        .and(body_partial_json(json!({
            "paySymbol": "SUI",
            "receiveSymbol": "SWT",
            "payAmount": "1.5",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(receipt_body()))
        .expect(1)
        .mount(&server)
        .await;

    let mut form = SwapForm::new(client_for(&server));
    form.set_pay_amount("1.5");
    assert!(form.request_quote().await.is_some());
    assert_eq!(form.quote().unwrap().receive_amount, "5490");

    let receipt = form.confirm(ConfirmOverrides::default()).await.unwrap();
    assert_eq!(receipt.tx_digest, "9xDigest");
    assert!(form.quote().is_none());
    assert_eq!(form.pay_amount(), "");
    assert!(form.error().is_none());

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert!(body["idempotencyKey"].is_string());
}

#[tokio::test]
async fn test_form_confirm_failure_keeps_amount() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/wallet/swap/execute"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "code": "WALLET_CHAIN_UNAVAILABLE",
            "detail": "rpc unavailable",
        })))
        .mount(&server)
        .await;

    let mut form = SwapForm::new(client_for(&server));
    form.set_pay_amount("2");
    let overrides = ConfirmOverrides {
        idempotency_key: Some("retry-1".to_string()),
        ..Default::default()
    };
    assert!(form.confirm(overrides).await.is_none());
    assert_eq!(form.pay_amount(), "2");
    assert_eq!(
        form.user_message(),
        Some("현재 체인 조회가 불가합니다. 잠시 후 다시 시도해 주세요.")
    );

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["idempotencyKey"], "retry-1");
}

#[tokio::test]
async fn test_form_quote_failure_clears_quote() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/wallet/swap/quote"))
        .respond_with(ResponseTemplate::new(200).set_body_json(quote_body()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/wallet/swap/quote"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"detail": "amount too small"})))
        .mount(&server)
        .await;

    let mut form = SwapForm::new(client_for(&server));
    form.set_pay_amount("1.5");
    form.request_quote().await;
    assert!(form.quote().is_some());

    form.set_pay_amount("0.0001");
    assert!(form.request_quote().await.is_none());
    assert!(form.quote().is_none());
    assert_eq!(form.user_message(), Some("amount too small"));
}
