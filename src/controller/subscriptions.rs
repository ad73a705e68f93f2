use actix_web::{post, web, HttpResponse, Responder};

use crate::error::Result;
use crate::model::SubscriptionInput;
use crate::service::SignupWorkflow;

use super::ApiResponse;

/// Campaign signup endpoint.
/// Responds once the subscriber is stored; the confirmation email is sent in the background.
#[tracing::instrument(name = "Subscribe to a campaign", skip(signup, body))]
#[post("/api/subscribe")]
pub async fn subscribe(
    signup: web::Data<SignupWorkflow>,
    body: web::Json<SubscriptionInput>,
) -> Result<impl Responder> {
    let signup = signup.signup(body.into_inner()).await?;
    // Detach, the notifier logs its own failures
    drop(signup.notification);

    Ok(HttpResponse::Created().json(
        ApiResponse::data(serde_json::json!({ "id": signup.subscriber.id }))
            .with_message("Successfully subscribed"),
    ))
}
