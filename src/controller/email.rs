use actix_web::{post, web, HttpResponse, Responder};

use serde::Deserialize;
use serde_json::json;

use crate::client::{Email, EmailClient, EmailSender};
use crate::domain::{non_blank, EmailAddress};
use crate::error::{Error, Result};

use super::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct SendEmailBody {
    email: Option<String>,
}

fn welcome_email(recipient: EmailAddress) -> Email {
    Email {
        recipient,
        subject: "Welcome to Demand Testing Platform!".into(),
        html_body: "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
                    <h1>Welcome to Demand Testing Platform!</h1>\
                    <p>Thank you for signing up! We're excited to have you on board.</p>\
                    <p>We'll keep you updated with our latest features and announcements.</p>\
                    </div>"
            .into(),
        text_body: "Thank you for signing up! We're excited to have you on board.".into(),
    }
}

/// Send a fixed welcome email, for checking the email provider setup
#[tracing::instrument(name = "Send test email", skip(body, email_client))]
#[post("/api/send-email")]
pub async fn send_email(
    body: web::Json<SendEmailBody>,
    email_client: web::Data<EmailClient>,
) -> Result<impl Responder> {
    let recipient: EmailAddress = non_blank(body.into_inner().email)
        .ok_or_else(|| Error::validation("Email is required"))?
        .parse()?;

    let message_id = email_client
        .send(&welcome_email(recipient))
        .await
        .map_err(Error::Dependency)?;

    Ok(HttpResponse::Ok().json(
        ApiResponse::data(json!({ "messageId": message_id })).with_message("Email sent successfully"),
    ))
}
