use actix_web::dev::HttpServiceFactory;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::model::CampaignInput;
use crate::service::CampaignService;

use super::ApiResponse;

/// Unparseable ids cannot name a campaign, so they are reported as missing
pub(super) fn parse_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| Error::not_found("Campaign not found"))
}

#[tracing::instrument(name = "List campaigns", skip(campaigns))]
#[get("")]
async fn list(campaigns: web::Data<CampaignService>) -> Result<impl Responder> {
    let campaigns = campaigns.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(campaigns)))
}

#[tracing::instrument(name = "Create campaign", skip(campaigns, body))]
#[post("")]
async fn create(
    campaigns: web::Data<CampaignService>,
    body: web::Json<CampaignInput>,
) -> Result<impl Responder> {
    let campaign = campaigns.create(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::data(campaign)))
}

#[tracing::instrument(name = "Get campaign", skip(campaigns))]
#[get("/{id}")]
async fn get_one(
    campaigns: web::Data<CampaignService>,
    path: web::Path<(String,)>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();
    let campaign = campaigns.find_by_id(parse_id(&id)?).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(campaign)))
}

#[tracing::instrument(name = "Update campaign", skip(campaigns, body))]
#[put("/{id}")]
async fn update(
    campaigns: web::Data<CampaignService>,
    path: web::Path<(String,)>,
    body: web::Json<CampaignInput>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();
    let campaign = campaigns
        .update(parse_id(&id)?, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(campaign)))
}

#[tracing::instrument(name = "Delete campaign", skip(campaigns))]
#[delete("/{id}")]
async fn remove(
    campaigns: web::Data<CampaignService>,
    path: web::Path<(String,)>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();
    campaigns.delete(parse_id(&id)?).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Campaign deleted")))
}

/// Subscribers of one campaign, newest first
#[tracing::instrument(name = "List campaign subscribers", skip(campaigns))]
#[get("/{id}/subscribers")]
async fn subscribers(
    campaigns: web::Data<CampaignService>,
    path: web::Path<(String,)>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();
    let (_, subscribers) = campaigns.subscribers(parse_id(&id)?).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(subscribers)))
}

/// Create the sample campaign if it does not exist yet
#[tracing::instrument(name = "Seed sample campaign", skip(campaigns))]
#[post("/api/seed")]
pub async fn seed(campaigns: web::Data<CampaignService>) -> Result<impl Responder> {
    let (campaign, created) = campaigns.seed().await?;

    let response = if created {
        HttpResponse::Created().json(ApiResponse::data(campaign).with_message("Sample campaign created"))
    } else {
        HttpResponse::Ok().json(ApiResponse::data(campaign).with_message("Sample campaign already exists"))
    };
    Ok(response)
}

/// Campaign API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/api/campaigns")
        .service(list)
        .service(create)
        .service(get_one)
        .service(subscribers)
        .service(update)
        .service(remove)
}
