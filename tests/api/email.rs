use reqwest::{Method, StatusCode};

use serde_json::{json, Value};

use sqlx::PgPool;

use wiremock::matchers::*;
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::TestApp;

async fn send_email(app: &TestApp, body: &Value) -> reqwest::Response {
    app.request(Method::POST, "api/send-email")
        .json(body)
        .send()
        .await
        .expect("Failed to execute request")
}

#[sqlx::test]
async fn send_email_returns_message_id(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    Mock::given(path("/v3/mail/send"))
        .and(method("POST"))
        .and(header("Authorization", "Bearer TestAuthorization"))
        .respond_with(ResponseTemplate::new(202).insert_header("X-Message-Id", "msg-42"))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let res = send_email(&app, &json!({ "email": "jane@example.com" })).await;

    assert_eq!(StatusCode::OK, res.status());
    let body: Value = res.json().await.unwrap();
    assert_eq!("msg-42", body["data"]["messageId"]);

    Ok(())
}

#[sqlx::test]
async fn send_email_requires_an_email(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = send_email(&app, &json!({})).await;

    assert_eq!(StatusCode::BAD_REQUEST, res.status());
    let body: Value = res.json().await.unwrap();
    assert_eq!("Email is required", body["message"]);

    Ok(())
}

#[sqlx::test]
async fn send_email_reports_provider_failure(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let res = send_email(&app, &json!({ "email": "jane@example.com" })).await;

    assert_eq!(StatusCode::BAD_GATEWAY, res.status());

    Ok(())
}
