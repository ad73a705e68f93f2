use reqwest::{Method, StatusCode};

use serde_json::{json, Value};

use sqlx::PgPool;

use wiremock::matchers::*;
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::TestApp;

async fn create_session(app: &TestApp, body: &Value) -> reqwest::Response {
    app.request(Method::POST, "api/create-checkout-session")
        .header("Origin", "https://shop.example.com")
        .json(body)
        .send()
        .await
        .expect("Failed to execute request")
}

#[sqlx::test]
async fn valid_price_returns_session_id(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    Mock::given(path("/v1/checkout/sessions"))
        .and(method("POST"))
        .and(body_string_contains("price_basic"))
        .and(body_string_contains("shop.example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cs_test_123",
            "url": "https://checkout.example.com/cs_test_123",
        })))
        .expect(1)
        .mount(&app.checkout_server)
        .await;

    let res = create_session(&app, &json!({ "priceId": "price_basic" })).await;

    assert_eq!(StatusCode::OK, res.status());
    let body: Value = res.json().await.unwrap();
    assert_eq!("cs_test_123", body["sessionId"]);

    Ok(())
}

#[sqlx::test]
async fn null_origin_falls_back_to_base_url(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    Mock::given(path("/v1/checkout/sessions"))
        .and(method("POST"))
        .and(body_string_contains("127.0.0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cs_test_456",
        })))
        .expect(1)
        .mount(&app.checkout_server)
        .await;

    let res = app
        .request(Method::POST, "api/create-checkout-session")
        .header("Origin", "null")
        .json(&json!({ "priceId": "price_pro" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());
    let body: Value = res.json().await.unwrap();
    assert_eq!("cs_test_456", body["sessionId"]);

    let requests = app.checkout_server.received_requests().await.unwrap();
    let form = String::from_utf8_lossy(&requests[0].body);
    assert!(!form.contains("null%2Fsuccess"), "{}", form);

    Ok(())
}

#[sqlx::test]
async fn unknown_price_is_rejected(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.checkout_server)
        .await;

    for body in [json!({ "priceId": "price_free" }), json!({})] {
        let res = create_session(&app, &body).await;

        assert_eq!(StatusCode::BAD_REQUEST, res.status());
        let body: Value = res.json().await.unwrap();
        assert_eq!(json!(["price_basic", "price_pro"]), body["availablePrices"]);
    }

    Ok(())
}

#[sqlx::test]
async fn provider_failure_is_a_bad_gateway(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.checkout_server)
        .await;

    let res = create_session(&app, &json!({ "priceId": "price_pro" })).await;

    assert_eq!(StatusCode::BAD_GATEWAY, res.status());

    Ok(())
}
