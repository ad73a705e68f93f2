use std::fmt;
use std::time::Duration;

use anyhow::Context;

use regex::Regex;

use reqwest::Client;

use serde::Serialize;

use secrecy::Secret;

use url::Url;

use crate::domain::EmailAddress;

const MESSAGE_ID_HEADER: &str = "X-Message-Id";

/// Anything that can deliver a transactional email
#[async_trait::async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &Email) -> anyhow::Result<MessageId>;
}

/// Transactional email REST client
#[derive(Debug)]
pub struct EmailClient {
    client: Client,
    sender: EmailAddress,
    sender_name: String,

    api_send_email_url: Url,
    api_auth_token: Secret<String>,
}

impl EmailClient {
    pub fn new(
        sender: EmailAddress,
        sender_name: String,
        api_timeout: Duration,
        api_base_url: Url,
        api_auth_token: Secret<String>,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(api_timeout)
            .build()
            .context("Failed to build http client")?;

        let api_send_email_url = api_base_url
            .join("v3/mail/send")
            .context("Failed to create send email endpoint URL")?;

        Ok(Self {
            client,
            sender,
            sender_name,
            api_send_email_url,
            api_auth_token,
        })
    }
}

#[async_trait::async_trait]
impl EmailSender for EmailClient {
    #[tracing::instrument(name = "Send an email via API", skip(self, email), fields(recipient = %email.recipient))]
    async fn send(&self, email: &Email) -> anyhow::Result<MessageId> {
        use secrecy::ExposeSecret;

        let text_body = email.text_body_or_stripped();
        let body = SendEmailRequest {
            personalizations: [Personalization {
                to: [Address {
                    email: email.recipient.as_ref(),
                    name: None,
                }],
            }],
            from: Address {
                email: self.sender.as_ref(),
                name: Some(&self.sender_name),
            },
            subject: &email.subject,
            content: [
                Content {
                    kind: "text/plain",
                    value: &text_body,
                },
                Content {
                    kind: "text/html",
                    value: &email.html_body,
                },
            ],
        };

        let res = self
            .client
            .post(self.api_send_email_url.clone())
            .bearer_auth(self.api_auth_token.expose_secret())
            .json(&body)
            .send()
            .await
            .context("Failed to reach email API")?
            .error_for_status()
            .context("Email API rejected the request")?;

        let message_id = res
            .headers()
            .get(MESSAGE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        Ok(MessageId::from(message_id.to_string()))
    }
}

/// Provider-assigned identifier of an accepted email
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageId(String);

impl From<String> for MessageId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for MessageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone)]
pub struct Email {
    pub recipient: EmailAddress,
    pub subject: String,
    pub html_body: String,
    /// Derived from the HTML body when empty
    pub text_body: String,
}

impl Email {
    fn text_body_or_stripped(&self) -> String {
        lazy_static::lazy_static! {
            static ref TAG_REGEX: Regex = Regex::new(r"<[^>]*>?").unwrap();
        }

        if self.text_body.trim().is_empty() {
            TAG_REGEX.replace_all(&self.html_body, "").trim().to_string()
        } else {
            self.text_body.clone()
        }
    }
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    subject: &'a str,
    content: [Content<'a>; 2],
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    value: &'a str,
}
