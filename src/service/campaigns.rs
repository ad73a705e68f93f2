use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{CampaignConfig, Colors};
use crate::error::{Error, Result};
use crate::model::{Campaign, CampaignInput, CampaignSummary, NewCampaign, Subscriber};
use crate::repo::{CampaignRepo, SubscriberRepo, SLUG_CONFLICT};

pub const SAMPLE_CAMPAIGN_SLUG: &str = "sample-product";

const CAMPAIGN_NOT_FOUND: &str = "Campaign not found";

/// Validation and uniqueness rules for campaign writes, on top of a [`CampaignRepo`]
#[derive(Clone)]
pub struct CampaignService {
    campaigns: Arc<dyn CampaignRepo>,
    subscribers: Arc<dyn SubscriberRepo>,
}

impl CampaignService {
    pub fn new(campaigns: Arc<dyn CampaignRepo>, subscribers: Arc<dyn SubscriberRepo>) -> Self {
        Self {
            campaigns,
            subscribers,
        }
    }

    #[tracing::instrument(name = "Create a new campaign", skip(self, input))]
    pub async fn create(&self, input: CampaignInput) -> Result<Campaign> {
        let new_campaign = NewCampaign::try_from(input)?;

        // Early, friendlier answer; the unique index still decides races
        if self.campaigns.slug_taken(&new_campaign.slug, None).await? {
            return Err(Error::conflict(SLUG_CONFLICT));
        }

        let campaign = self.campaigns.insert(&new_campaign).await?;
        tracing::info!(campaign.id = %campaign.id, campaign.slug = %campaign.slug, "Campaign created");
        Ok(campaign)
    }

    #[tracing::instrument(name = "Update a campaign", skip(self, input))]
    pub async fn update(&self, id: Uuid, input: CampaignInput) -> Result<Campaign> {
        let update = NewCampaign::try_from(input)?;

        if self.campaigns.slug_taken(&update.slug, Some(id)).await? {
            return Err(Error::conflict(SLUG_CONFLICT));
        }

        self.campaigns
            .update(id, &update)
            .await?
            .ok_or_else(|| Error::not_found(CAMPAIGN_NOT_FOUND))
    }

    /// Delete a campaign. Its subscribers are left in place.
    #[tracing::instrument(name = "Delete a campaign", skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if self.campaigns.delete(id).await? {
            Ok(())
        } else {
            Err(Error::not_found(CAMPAIGN_NOT_FOUND))
        }
    }

    #[tracing::instrument(name = "Find a campaign by id", skip(self))]
    pub async fn find_by_id(&self, id: Uuid) -> Result<Campaign> {
        self.campaigns
            .fetch_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(CAMPAIGN_NOT_FOUND))
    }

    /// Find a campaign by slug. With `active_only`, inactive campaigns are not found.
    #[tracing::instrument(name = "Find a campaign by slug", skip(self))]
    pub async fn find_by_slug(&self, slug: &str, active_only: bool) -> Result<Campaign> {
        let slug = slug.trim().to_lowercase();
        self.campaigns
            .fetch_by_slug(&slug, active_only)
            .await?
            .ok_or_else(|| Error::not_found(CAMPAIGN_NOT_FOUND))
    }

    /// All campaigns, newest first
    #[tracing::instrument(name = "List campaigns", skip(self))]
    pub async fn list(&self) -> Result<Vec<Campaign>> {
        self.campaigns.fetch_all().await
    }

    /// All campaigns with subscriber counts, newest first
    #[tracing::instrument(name = "List campaign summaries", skip(self))]
    pub async fn summaries(&self) -> Result<Vec<CampaignSummary>> {
        self.campaigns.fetch_summaries().await
    }

    /// A campaign together with its subscribers, newest first
    #[tracing::instrument(name = "List campaign subscribers", skip(self))]
    pub async fn subscribers(&self, id: Uuid) -> Result<(Campaign, Vec<Subscriber>)> {
        let campaign = self.find_by_id(id).await?;
        let subscribers = self.subscribers.fetch_by_campaign(campaign.id).await?;
        Ok((campaign, subscribers))
    }

    /// Create the sample campaign unless it already exists.
    /// Returns the campaign and whether it was created by this call.
    #[tracing::instrument(name = "Seed sample campaign", skip(self))]
    pub async fn seed(&self) -> Result<(Campaign, bool)> {
        if let Some(existing) = self
            .campaigns
            .fetch_by_slug(SAMPLE_CAMPAIGN_SLUG, false)
            .await?
        {
            return Ok((existing, false));
        }

        match self.create(sample_campaign()).await {
            Ok(campaign) => Ok((campaign, true)),
            // Seeded concurrently
            Err(Error::Conflict(_)) => {
                let campaign = self.find_by_slug(SAMPLE_CAMPAIGN_SLUG, false).await?;
                Ok((campaign, false))
            }
            Err(e) => Err(e),
        }
    }
}

fn sample_campaign() -> CampaignInput {
    CampaignInput {
        name: Some("Sample Product".into()),
        slug: Some(SAMPLE_CAMPAIGN_SLUG.into()),
        description: Some("A sample product to demonstrate the landing page".into()),
        active: Some(true),
        template: Some("modern".into()),
        config: Some(CampaignConfig {
            title: "Introducing Our Amazing Product".into(),
            subtitle: Some(
                "The revolutionary solution that will transform how you work. \
                 Sign up now to get early access and exclusive updates."
                    .into(),
            ),
            cta_text: Some("Join the Waitlist".into()),
            thank_you_message: Some(
                "Thank you for your interest! We'll keep you updated on our progress \
                 and let you know when we launch."
                    .into(),
            ),
            colors: Colors {
                primary: Some("#0ea5e9".into()),
                secondary: Some("#0284c7".into()),
                background: Some("#f0f9ff".into()),
                text: Some("#0c4a6e".into()),
            },
            logo_url: None,
            hero_image_url: Some(
                "https://images.unsplash.com/photo-1551434678-e076c223a692?auto=format&fit=crop&w=2850&q=80"
                    .into(),
            ),
        }),
        metadata: None,
    }
}
