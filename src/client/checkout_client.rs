use std::time::Duration;

use anyhow::Context;

use reqwest::Client;

use serde::Deserialize;

use secrecy::Secret;

use url::Url;

/// Hosted payment-checkout REST client
#[derive(Debug)]
pub struct CheckoutClient {
    client: Client,

    api_sessions_url: Url,
    api_secret_key: Secret<String>,
}

/// Checkout session created by the provider
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    /// Hosted checkout page, if the provider returned one
    #[serde(default)]
    pub url: Option<String>,
}

impl CheckoutClient {
    pub fn new(
        api_timeout: Duration,
        api_base_url: Url,
        api_secret_key: Secret<String>,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(api_timeout)
            .build()
            .context("Failed to build http client")?;

        let api_sessions_url = api_base_url
            .join("v1/checkout/sessions")
            .context("Failed to create checkout session endpoint URL")?;

        Ok(Self {
            client,
            api_sessions_url,
            api_secret_key,
        })
    }

    /// Create a one-off card payment session for a single unit of `price_id`
    #[tracing::instrument(name = "Create checkout session", skip(self))]
    pub async fn create_session(
        &self,
        price_id: &str,
        success_url: &str,
        cancel_url: &str,
    ) -> anyhow::Result<CheckoutSession> {
        use secrecy::ExposeSecret;

        let form = [
            ("mode", "payment"),
            ("payment_method_types[0]", "card"),
            ("line_items[0][price]", price_id),
            ("line_items[0][quantity]", "1"),
            ("success_url", success_url),
            ("cancel_url", cancel_url),
        ];

        let session = self
            .client
            .post(self.api_sessions_url.clone())
            .bearer_auth(self.api_secret_key.expose_secret())
            .form(&form)
            .send()
            .await
            .context("Failed to reach checkout API")?
            .error_for_status()
            .context("Checkout API rejected the request")?
            .json::<CheckoutSession>()
            .await
            .context("Failed to parse checkout session")?;

        tracing::info!("Checkout session created: {}", session.id);

        Ok(session)
    }
}
