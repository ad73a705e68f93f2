//! In-memory repositories for service tests.
//! Uniqueness is enforced on insert the same way the database constraints do.

use std::sync::Mutex;

use chrono::Utc;

use uuid::Uuid;

use crate::domain::{EmailAddress, Slug};
use crate::error::{Error, Result};
use crate::model::{Campaign, CampaignSummary, NewCampaign, NewSubscriber, Subscriber};

use super::{CampaignRepo, SubscriberRepo, SLUG_CONFLICT, SUBSCRIBER_CONFLICT};

#[derive(Debug, Default)]
pub struct MemoryCampaignRepo {
    pub campaigns: Mutex<Vec<Campaign>>,
}

impl MemoryCampaignRepo {
    fn slug_used(campaigns: &[Campaign], slug: &str, excluding: Option<Uuid>) -> bool {
        campaigns
            .iter()
            .any(|c| c.slug == slug && Some(c.id) != excluding)
    }
}

#[async_trait::async_trait]
impl CampaignRepo for MemoryCampaignRepo {
    async fn insert(&self, new_campaign: &NewCampaign) -> Result<Campaign> {
        let mut campaigns = self.campaigns.lock().unwrap();
        if Self::slug_used(&campaigns, new_campaign.slug.as_ref(), None) {
            return Err(Error::conflict(SLUG_CONFLICT));
        }

        let now = Utc::now();
        let campaign = Campaign {
            id: Uuid::new_v4(),
            name: new_campaign.name.as_ref().to_string(),
            slug: new_campaign.slug.as_ref().to_string(),
            description: new_campaign.description.clone(),
            active: new_campaign.active,
            template: new_campaign.template.clone(),
            config: new_campaign.config.clone(),
            metadata: new_campaign.metadata.clone(),
            created_at: now,
            updated_at: now,
        };
        campaigns.push(campaign.clone());
        Ok(campaign)
    }

    async fn update(&self, id: Uuid, update: &NewCampaign) -> Result<Option<Campaign>> {
        let mut campaigns = self.campaigns.lock().unwrap();
        if Self::slug_used(&campaigns, update.slug.as_ref(), Some(id)) {
            return Err(Error::conflict(SLUG_CONFLICT));
        }

        let Some(campaign) = campaigns.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        campaign.name = update.name.as_ref().to_string();
        campaign.slug = update.slug.as_ref().to_string();
        campaign.description = update.description.clone();
        campaign.active = update.active;
        campaign.template = update.template.clone();
        campaign.config = update.config.clone();
        campaign.metadata = update.metadata.clone();
        campaign.updated_at = Utc::now();
        Ok(Some(campaign.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut campaigns = self.campaigns.lock().unwrap();
        let before = campaigns.len();
        campaigns.retain(|c| c.id != id);
        Ok(campaigns.len() != before)
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<Option<Campaign>> {
        let campaigns = self.campaigns.lock().unwrap();
        Ok(campaigns.iter().find(|c| c.id == id).cloned())
    }

    async fn fetch_by_slug(&self, slug: &str, active_only: bool) -> Result<Option<Campaign>> {
        let campaigns = self.campaigns.lock().unwrap();
        Ok(campaigns
            .iter()
            .find(|c| c.slug == slug && (c.active || !active_only))
            .cloned())
    }

    async fn fetch_all(&self) -> Result<Vec<Campaign>> {
        let campaigns = self.campaigns.lock().unwrap();
        Ok(campaigns.iter().rev().cloned().collect())
    }

    async fn fetch_summaries(&self) -> Result<Vec<CampaignSummary>> {
        let campaigns = self.campaigns.lock().unwrap();
        Ok(campaigns
            .iter()
            .rev()
            .map(|c| CampaignSummary {
                id: c.id,
                name: c.name.clone(),
                slug: c.slug.clone(),
                description: c.description.clone(),
                active: c.active,
                subscriber_count: 0,
                created_at: c.created_at,
            })
            .collect())
    }

    async fn slug_taken(&self, slug: &Slug, excluding: Option<Uuid>) -> Result<bool> {
        let campaigns = self.campaigns.lock().unwrap();
        Ok(Self::slug_used(&campaigns, slug.as_ref(), excluding))
    }
}

#[derive(Debug, Default)]
pub struct MemorySubscriberRepo {
    pub subscribers: Mutex<Vec<Subscriber>>,
    /// Skip the existence check, as if a concurrent request inserted first
    pub hide_existing: bool,
}

#[async_trait::async_trait]
impl SubscriberRepo for MemorySubscriberRepo {
    async fn insert(&self, new_subscriber: &NewSubscriber) -> Result<Subscriber> {
        let mut subscribers = self.subscribers.lock().unwrap();
        if subscribers.iter().any(|s| {
            s.email == new_subscriber.email.as_ref() && s.campaign_id == new_subscriber.campaign_id
        }) {
            return Err(Error::conflict(SUBSCRIBER_CONFLICT));
        }

        let now = Utc::now();
        let subscriber = Subscriber {
            id: Uuid::new_v4(),
            email: new_subscriber.email.as_ref().to_string(),
            name: new_subscriber.name.clone(),
            campaign_id: new_subscriber.campaign_id,
            created_at: now,
            updated_at: now,
        };
        subscribers.push(subscriber.clone());
        Ok(subscriber)
    }

    async fn exists(&self, email: &EmailAddress, campaign_id: Uuid) -> Result<bool> {
        if self.hide_existing {
            return Ok(false);
        }
        let subscribers = self.subscribers.lock().unwrap();
        Ok(subscribers
            .iter()
            .any(|s| s.email == email.as_ref() && s.campaign_id == campaign_id))
    }

    async fn fetch_by_campaign(&self, campaign_id: Uuid) -> Result<Vec<Subscriber>> {
        let subscribers = self.subscribers.lock().unwrap();
        Ok(subscribers
            .iter()
            .rev()
            .filter(|s| s.campaign_id == campaign_id)
            .cloned()
            .collect())
    }
}
