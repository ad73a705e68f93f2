use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{get, HttpResponse, Responder};
use actix_web::{web, App, HttpServer};

use sqlx::PgPool;

use tracing_actix_web::TracingLogger;

use crate::client::{CheckoutClient, EmailClient};
use crate::controller::{campaigns, checkout, email, pages, subscriptions, SiteOptions};
use crate::error::Error;
use crate::repo::{PgCampaignRepo, PgSubscriberRepo};
use crate::service::{CampaignService, ConfirmationNotifier, SignupWorkflow};

/// Simple health-check endpoint
#[tracing::instrument(name = "Health check")]
#[get("/health_check")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().finish()
}

/// Malformed JSON bodies are reported like any other invalid input
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        tracing::warn!(error = %err, "Rejected request body");
        Error::validation(format!("Invalid request body: {}", err)).into()
    })
}

/// Run the application on a specified TCP listener
pub fn run(
    listener: TcpListener,
    pool: PgPool,
    email_client: EmailClient,
    checkout_client: CheckoutClient,
    site: SiteOptions,
) -> anyhow::Result<Server> {
    let campaign_repo = Arc::new(PgCampaignRepo::new(pool.clone()));
    let subscriber_repo = Arc::new(PgSubscriberRepo::new(pool));

    // Wrap application data
    let email_client = web::Data::new(email_client);
    let notifier = ConfirmationNotifier::new(email_client.clone().into_inner());
    let campaign_service = web::Data::new(CampaignService::new(
        campaign_repo.clone(),
        subscriber_repo.clone(),
    ));
    let signup = web::Data::new(SignupWorkflow::new(
        campaign_repo,
        subscriber_repo,
        notifier,
    ));
    let checkout_client = web::Data::new(checkout_client);
    let site = web::Data::new(site);

    // Start the server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(json_config())
            .app_data(campaign_service.clone())
            .app_data(signup.clone())
            .app_data(email_client.clone())
            .app_data(checkout_client.clone())
            .app_data(site.clone())
            .service(health_check)
            .service(campaigns::scope())
            .service(campaigns::seed)
            .service(subscriptions::subscribe)
            .service(checkout::create_session)
            .service(email::send_email)
            .service(pages::scope())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
