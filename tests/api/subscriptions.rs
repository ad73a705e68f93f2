use reqwest::StatusCode;

use serde_json::{json, Value};

use sqlx::PgPool;

use uuid::Uuid;

use wiremock::matchers::*;
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::TestApp;

#[sqlx::test]
async fn subscribe_returns_created_for_valid_request(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let campaign_id = app.create_campaign("Rocket Skates", "rocket-skates").await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(202))
        .mount(&app.email_server)
        .await;

    let res = app
        .subscribe(&json!({
            "email": "Jane@Example.com",
            "name": "Jane",
            "campaignId": campaign_id,
        }))
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::CREATED, res.status());
    let body: Value = res.json().await.unwrap();
    assert_eq!(true, body["success"]);
    assert!(body["data"]["id"].is_string());

    let (email, name): (String, Option<String>) =
        sqlx::query_as("select email, name from subscribers")
            .fetch_one(&pool)
            .await?;
    assert_eq!("jane@example.com", email);
    assert_eq!(Some("Jane".to_string()), name);

    Ok(())
}

#[sqlx::test]
async fn subscribe_sends_a_confirmation_email(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let campaign_id = app.create_campaign("Rocket Skates", "rocket-skates").await;

    Mock::given(path("/v3/mail/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&app.email_server)
        .await;

    app.subscribe(&json!({
        "email": "jane@example.com",
        "name": "Jane",
        "campaignId": campaign_id,
    }))
    .await
    .expect("Failed to execute request");

    let requests = app.email_requests(1).await;
    assert_eq!(1, requests.len());

    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        "jane@example.com",
        body["personalizations"][0]["to"][0]["email"]
    );
    assert_eq!(
        "Thank you for your interest in Rocket Skates",
        body["subject"]
    );

    Ok(())
}

#[sqlx::test]
async fn subscribe_succeeds_if_email_send_fails(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let campaign_id = app.create_campaign("Rocket Skates", "rocket-skates").await;

    Mock::given(path("/v3/mail/send"))
        .and(method("POST"))
        // Ensure that send-email fails
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let res = app
        .subscribe(&json!({
            "email": "jane@example.com",
            "campaignId": campaign_id,
        }))
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::CREATED, res.status());
    app.email_requests(1).await;

    let (count,): (i64,) = sqlx::query_as("select count(*) from subscribers")
        .fetch_one(&pool)
        .await?;
    assert_eq!(1, count);

    Ok(())
}

#[sqlx::test]
async fn subscribe_returns_bad_request_for_missing_data(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let campaign_id = app.create_campaign("Rocket Skates", "rocket-skates").await;

    let test_cases = vec![
        ("missing email", json!({ "campaignId": campaign_id })),
        ("missing campaign", json!({ "email": "jane@example.com" })),
        ("missing both", json!({})),
        (
            "malformed email",
            json!({ "email": "bad email address", "campaignId": campaign_id }),
        ),
    ];

    for (desc, body) in test_cases {
        let res = app
            .subscribe(&body)
            .await
            .expect("Failed to execute request");

        assert_eq!(
            StatusCode::BAD_REQUEST,
            res.status(),
            "API did not fail when payload was {}",
            desc
        );
    }

    Ok(())
}

#[sqlx::test]
async fn subscribe_to_unknown_campaign_is_not_found(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    for campaign_id in [Uuid::new_v4().to_string(), "not-an-id".to_string()] {
        let res = app
            .subscribe(&json!({ "email": "jane@example.com", "campaignId": campaign_id }))
            .await
            .expect("Failed to execute request");

        assert_eq!(StatusCode::NOT_FOUND, res.status());
    }

    Ok(())
}

#[sqlx::test]
async fn duplicate_signup_is_rejected(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let campaign_id = app.create_campaign("Rocket Skates", "rocket-skates").await;
    let other_campaign_id = app.create_campaign("Jet Packs", "jet-packs").await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(202))
        .mount(&app.email_server)
        .await;

    let signup = json!({ "email": "jane@example.com", "campaignId": campaign_id });
    let first = app.subscribe(&signup).await.expect("Failed to execute request");
    let second = app.subscribe(&signup).await.expect("Failed to execute request");
    let other = app
        .subscribe(&json!({ "email": "jane@example.com", "campaignId": other_campaign_id }))
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::CREATED, first.status());
    assert_eq!(StatusCode::BAD_REQUEST, second.status());
    assert_eq!(StatusCode::CREATED, other.status());

    let body: Value = second.json().await.unwrap();
    assert_eq!("You have already signed up for this campaign", body["message"]);

    Ok(())
}
