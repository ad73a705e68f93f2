use actix_web::http::header::ORIGIN;
use actix_web::{post, web, HttpRequest, HttpResponse, Responder};

use serde::Deserialize;
use serde_json::json;

use crate::client::CheckoutClient;
use crate::domain::non_blank;
use crate::error::{Error, Result};

use super::SiteOptions;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutBody {
    price_id: Option<String>,
}

/// Start a hosted checkout for one of the configured prices
#[tracing::instrument(name = "Create checkout session", skip(req, body, site, checkout))]
#[post("/api/create-checkout-session")]
pub async fn create_session(
    req: HttpRequest,
    body: web::Json<CheckoutBody>,
    site: web::Data<SiteOptions>,
    checkout: web::Data<CheckoutClient>,
) -> Result<impl Responder> {
    let price_id = non_blank(body.into_inner().price_id);
    let price_id = match price_id {
        Some(id) if site.prices.values().any(|p| *p == id) => id,
        received => {
            tracing::warn!(?received, "Rejected unknown price id");
            return Ok(HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": "Invalid price ID",
                "availablePrices": site.prices.values().collect::<Vec<_>>(),
                "receivedPrice": received,
            })));
        }
    };

    // Opaque origins are sent as the literal "null"
    let origin = req
        .headers()
        .get(ORIGIN)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty() && *value != "null")
        .unwrap_or(site.base_url.as_str())
        .trim_end_matches('/');
    let success_url = format!("{}/success?session_id={{CHECKOUT_SESSION_ID}}", origin);
    let cancel_url = format!("{}/", origin);

    let session = checkout
        .create_session(&price_id, &success_url, &cancel_url)
        .await
        .map_err(Error::Dependency)?;

    Ok(HttpResponse::Ok().json(json!({
        "sessionId": session.id,
        "url": session.url,
    })))
}
