use uuid::Uuid;

use crate::domain::{EmailAddress, Slug};
use crate::error::{Error, Result};
use crate::model::{Campaign, CampaignSummary, NewCampaign, NewSubscriber, Subscriber};

mod campaigns;
mod subscribers;

#[cfg(test)]
pub(crate) mod mock;

pub use campaigns::PgCampaignRepo;
pub use subscribers::PgSubscriberRepo;

/// Campaign repository, implemented once per backing store.
/// NOTE: Object safe so that services can be tested against in-memory stores
#[async_trait::async_trait]
pub trait CampaignRepo: Send + Sync {
    /// Insert a new campaign, failing with `Error::Conflict` if the slug is taken
    async fn insert(&self, new_campaign: &NewCampaign) -> Result<Campaign>;

    /// Replace the editable fields of a campaign, `None` if it does not exist
    async fn update(&self, id: Uuid, campaign: &NewCampaign) -> Result<Option<Campaign>>;

    /// Delete a campaign, `false` if it did not exist
    async fn delete(&self, id: Uuid) -> Result<bool>;

    async fn fetch_by_id(&self, id: Uuid) -> Result<Option<Campaign>>;

    /// Fetch by slug, skipping inactive campaigns if `active_only` is set
    async fn fetch_by_slug(&self, slug: &str, active_only: bool) -> Result<Option<Campaign>>;

    /// Fetch all campaigns, newest first
    async fn fetch_all(&self) -> Result<Vec<Campaign>>;

    /// Fetch all campaigns with their subscriber counts, newest first
    async fn fetch_summaries(&self) -> Result<Vec<CampaignSummary>>;

    /// Check whether a slug is used by any campaign other than `excluding`
    async fn slug_taken(&self, slug: &Slug, excluding: Option<Uuid>) -> Result<bool>;
}

/// Subscriber repository, implemented once per backing store.
#[async_trait::async_trait]
pub trait SubscriberRepo: Send + Sync {
    /// Insert a new subscriber, failing with `Error::Conflict` if the email already signed up
    async fn insert(&self, new_subscriber: &NewSubscriber) -> Result<Subscriber>;

    async fn exists(&self, email: &EmailAddress, campaign_id: Uuid) -> Result<bool>;

    async fn fetch_by_campaign(&self, campaign_id: Uuid) -> Result<Vec<Subscriber>>;
}

pub(crate) const SLUG_CONFLICT: &str = "A campaign with this slug already exists";
pub(crate) const SUBSCRIBER_CONFLICT: &str = "You have already signed up for this campaign";

/// Translate unique-constraint violations into conflicts.
/// The store's constraint is the actual guard against concurrent duplicate inserts.
fn conflict_on_unique(message: &'static str) -> impl FnOnce(sqlx::Error) -> Error {
    move |e| match &e {
        sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
            tracing::warn!("Unique constraint {:?} rejected write", db_error.constraint());
            Error::conflict(message)
        }
        _ => Error::Database(e),
    }
}
