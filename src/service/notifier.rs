use std::sync::Arc;

use tokio::task::JoinHandle;

use tracing::Instrument;

use crate::client::{Email, EmailSender};
use crate::domain::EmailAddress;

/// What a confirmation email needs to know about a signup
#[derive(Debug, Clone)]
pub struct Confirmation {
    pub recipient: EmailAddress,
    pub name: Option<String>,
    pub campaign_name: String,
}

/// Sends signup confirmations outside of the signup request.
/// Delivery is best-effort: failures are logged here and never reported back.
#[derive(Clone)]
pub struct ConfirmationNotifier {
    sender: Arc<dyn EmailSender>,
}

impl ConfirmationNotifier {
    pub fn new(sender: Arc<dyn EmailSender>) -> Self {
        Self { sender }
    }

    /// Spawn the confirmation email as its own task.
    /// The handle may be dropped to detach it.
    pub fn dispatch(&self, confirmation: Confirmation) -> JoinHandle<()> {
        let sender = Arc::clone(&self.sender);
        let span = tracing::info_span!(
            "Send confirmation email",
            recipient = %confirmation.recipient,
            campaign = %confirmation.campaign_name,
        );

        tokio::spawn(
            async move {
                let email = build_confirmation_email(&confirmation);
                match sender.send(&email).await {
                    Ok(message_id) => {
                        tracing::info!(%message_id, "Confirmation email accepted");
                    }
                    Err(error) => {
                        tracing::error!(
                            error.cause_chain = ?error,
                            "Failed to send confirmation email"
                        );
                    }
                }
            }
            .instrument(span),
        )
    }
}

/// Build the "thank you for your interest" email for a new subscriber
pub fn build_confirmation_email(confirmation: &Confirmation) -> Email {
    let campaign = &confirmation.campaign_name;
    let greeting = match &confirmation.name {
        Some(name) => format!("Hello {},", name),
        None => "Hello,".to_string(),
    };

    let subject = format!("Thank you for your interest in {}", campaign);
    let html_body = format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
         <h2>Thank you for your interest!</h2>\
         <p>{}</p>\
         <p>Thank you for signing up to learn more about <strong>{}</strong>.</p>\
         <p>We've received your information and will keep you updated on our progress.</p>\
         <p>Best regards,<br>The Team</p>\
         </div>",
        crate::render::escape(&greeting),
        crate::render::escape(campaign),
    );
    let text_body = format!(
        "{}\n\nThank you for signing up to learn more about {}.\n\
         We've received your information and will keep you updated on our progress.\n\n\
         Best regards,\nThe Team",
        greeting, campaign
    );

    Email {
        recipient: confirmation.recipient.clone(),
        subject,
        html_body,
        text_body,
    }
}
