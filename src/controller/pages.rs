use actix_web::dev::HttpServiceFactory;
use actix_web::http::header::ContentType;
use actix_web::{get, web, HttpResponse, Responder};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::render;
use crate::service::CampaignService;

use super::campaigns::parse_id;
use super::SiteOptions;

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type(ContentType::html())
        .body(render::not_found_page())
}

#[get("/")]
async fn home() -> impl Responder {
    html(render::home_page())
}

/// Public landing page, only for active campaigns
#[tracing::instrument(name = "Show landing page", skip(campaigns))]
#[get("/c/{slug}")]
async fn landing(
    campaigns: web::Data<CampaignService>,
    path: web::Path<(String,)>,
) -> Result<impl Responder> {
    let (slug,) = path.into_inner();

    match campaigns.find_by_slug(&slug, true).await {
        Ok(campaign) => Ok(html(render::landing_page(&campaign))),
        Err(Error::NotFound(_)) => Ok(not_found()),
        Err(e) => Err(e),
    }
}

#[tracing::instrument(name = "Show dashboard", skip(campaigns, site))]
#[get("/dashboard")]
async fn dashboard(
    campaigns: web::Data<CampaignService>,
    site: web::Data<SiteOptions>,
) -> Result<impl Responder> {
    let summaries = campaigns.summaries().await?;
    Ok(html(render::dashboard_page(&summaries, &site.base_url)))
}

#[get("/dashboard/campaigns/new")]
async fn new_campaign() -> impl Responder {
    html(render::new_campaign_page())
}

/// Operator view of one campaign's signups
#[tracing::instrument(name = "Show campaign subscribers", skip(campaigns))]
#[get("/dashboard/campaigns/{id}/subscribers")]
async fn campaign_subscribers(
    campaigns: web::Data<CampaignService>,
    path: web::Path<(String,)>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();

    let found = match parse_id(&id) {
        Ok(id) => campaigns.subscribers(id).await,
        Err(e) => Err(e),
    };
    match found {
        Ok((campaign, subscribers)) => Ok(html(render::subscribers_page(&campaign, &subscribers))),
        Err(Error::NotFound(_)) => Ok(not_found()),
        Err(e) => Err(e),
    }
}

#[get("/test-features")]
async fn test_features(site: web::Data<SiteOptions>) -> impl Responder {
    html(render::pricing_page(&site.prices))
}

#[derive(Debug, Deserialize)]
pub struct SuccessQuery {
    session_id: Option<String>,
}

#[get("/success")]
async fn success(query: web::Query<SuccessQuery>) -> impl Responder {
    html(render::success_page(query.session_id.as_deref()))
}

/// HTML pages
pub fn scope() -> impl HttpServiceFactory {
    (
        home,
        landing,
        dashboard,
        new_campaign,
        campaign_subscribers,
        test_features,
        success,
    )
}
