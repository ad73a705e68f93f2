use std::collections::BTreeMap;
use std::net::TcpListener;
use std::time::Duration;

use reqwest::{Client, Method, Response};

use sqlx::PgPool;

use secrecy::Secret;

use serde_json::{json, Value};

use url::Url;

use wiremock::{MockServer, Request};

use demandtest::app;
use demandtest::client::{CheckoutClient, EmailClient};
use demandtest::controller::SiteOptions;

pub struct TestApp {
    pub addr: String,

    pub client: Client,
    pub email_server: MockServer,
    pub checkout_server: MockServer,
}

impl TestApp {
    pub async fn spawn(pool: &PgPool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to listen on random port");
        let port = listener.local_addr().unwrap().port();

        let addr = format!("http://127.0.0.1:{}", port);

        let email_server = MockServer::start().await;
        let checkout_server = MockServer::start().await;

        let email_client = {
            let sender = "test@test.com"
                .parse()
                .expect("Failed to parse sender email address");
            let api_base_url =
                Url::parse(&email_server.uri()).expect("Failed to parse mock server uri");
            let api_auth_token = Secret::new("TestAuthorization".into());
            let api_timeout = Duration::from_secs(2);

            EmailClient::new(
                sender,
                "Test Sender".into(),
                api_timeout,
                api_base_url,
                api_auth_token,
            )
            .expect("Failed to create email client")
        };

        let checkout_client = {
            let api_base_url =
                Url::parse(&checkout_server.uri()).expect("Failed to parse mock server uri");
            let api_secret_key = Secret::new("sk_test_key".into());
            let api_timeout = Duration::from_secs(2);

            CheckoutClient::new(api_timeout, api_base_url, api_secret_key)
                .expect("Failed to create checkout client")
        };

        let site = SiteOptions {
            base_url: addr.clone(),
            prices: BTreeMap::from([
                ("basic".to_string(), "price_basic".to_string()),
                ("pro".to_string(), "price_pro".to_string()),
            ]),
        };

        let server = app::run(
            listener,
            pool.clone(),
            email_client,
            checkout_client,
            site,
        )
        .expect("Failed to spawn app instance");
        let _ = tokio::spawn(server);

        let client = Client::new();

        Self {
            addr,
            client,
            email_server,
            checkout_server,
        }
    }

    pub fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", &self.addr, url);
        self.client.request(method, url)
    }

    pub async fn health_check(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "health_check").send().await
    }

    pub async fn campaign_create(&self, body: &Value) -> reqwest::Result<Response> {
        self.request(Method::POST, "api/campaigns")
            .json(body)
            .send()
            .await
    }

    pub async fn campaign_update(&self, id: &str, body: &Value) -> reqwest::Result<Response> {
        self.request(Method::PUT, &format!("api/campaigns/{}", id))
            .json(body)
            .send()
            .await
    }

    pub async fn subscribe(&self, body: &Value) -> reqwest::Result<Response> {
        self.request(Method::POST, "api/subscribe")
            .json(body)
            .send()
            .await
    }

    pub async fn page(&self, path: &str) -> reqwest::Result<Response> {
        self.request(Method::GET, path).send().await
    }

    /// Create a campaign through the API, returning its id
    pub async fn create_campaign(&self, name: &str, slug: &str) -> String {
        let res = self
            .campaign_create(&campaign_body(name, slug))
            .await
            .expect("Failed to execute request");
        assert_eq!(201, res.status().as_u16(), "Failed to create campaign");

        let body: Value = res.json().await.expect("Failed to parse response");
        body["data"]["id"]
            .as_str()
            .expect("Missing campaign id")
            .to_string()
    }

    /// Wait for the background confirmation emails to reach the mock server
    pub async fn email_requests(&self, expected: usize) -> Vec<Request> {
        for _ in 0..50 {
            let requests = self.email_server.received_requests().await.unwrap();
            if requests.len() >= expected {
                return requests;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        self.email_server.received_requests().await.unwrap()
    }
}

/// Random slug, for tests that do not care which one they get
pub fn random_slug() -> String {
    use rand::{distributions::Alphanumeric, Rng};

    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    format!("campaign-{}", suffix.to_lowercase())
}

pub fn campaign_body(name: &str, slug: &str) -> Value {
    json!({
        "name": name,
        "slug": slug,
        "description": format!("{} landing page", name),
        "config": {
            "title": format!("Introducing {}", name),
            "subtitle": "Be the first to know",
        },
    })
}
