use std::sync::Arc;

use tokio::task::JoinHandle;

use uuid::Uuid;

use crate::domain::{non_blank, EmailAddress};
use crate::error::{Error, Result};
use crate::model::{NewSubscriber, Subscriber, SubscriptionInput};
use crate::repo::{CampaignRepo, SubscriberRepo, SUBSCRIBER_CONFLICT};

use super::{Confirmation, ConfirmationNotifier};

/// Result of a successful signup
#[derive(Debug)]
pub struct Signup {
    pub subscriber: Subscriber,
    /// Confirmation email task; its outcome does not affect the signup
    pub notification: JoinHandle<()>,
}

/// Email signup for a campaign: resolve the campaign, reject duplicates,
/// persist the subscriber, then hand the confirmation email to the notifier.
#[derive(Clone)]
pub struct SignupWorkflow {
    campaigns: Arc<dyn CampaignRepo>,
    subscribers: Arc<dyn SubscriberRepo>,
    notifier: ConfirmationNotifier,
}

impl SignupWorkflow {
    pub fn new(
        campaigns: Arc<dyn CampaignRepo>,
        subscribers: Arc<dyn SubscriberRepo>,
        notifier: ConfirmationNotifier,
    ) -> Self {
        Self {
            campaigns,
            subscribers,
            notifier,
        }
    }

    #[tracing::instrument(name = "Sign up a subscriber", skip(self, input))]
    pub async fn signup(&self, input: SubscriptionInput) -> Result<Signup> {
        let email = non_blank(input.email).ok_or_else(|| Error::validation("Email is required"))?;
        let campaign_id = non_blank(input.campaign_id)
            .ok_or_else(|| Error::validation("Campaign ID is required"))?;
        let email: EmailAddress = email.parse()?;

        // Inactive campaigns still accept signups
        let campaign = match Uuid::parse_str(&campaign_id) {
            Ok(id) => self.campaigns.fetch_by_id(id).await?,
            Err(_) => None,
        }
        .ok_or_else(|| Error::not_found("Campaign not found"))?;

        if self.subscribers.exists(&email, campaign.id).await? {
            return Err(Error::conflict(SUBSCRIBER_CONFLICT));
        }

        let new_subscriber = NewSubscriber {
            email,
            name: non_blank(input.name),
            campaign_id: campaign.id,
        };
        let subscriber = self.subscribers.insert(&new_subscriber).await?;
        tracing::info!(subscriber.id = %subscriber.id, campaign.id = %campaign.id, "Subscriber stored");

        let notification = self.notifier.dispatch(Confirmation {
            recipient: new_subscriber.email,
            name: new_subscriber.name,
            campaign_name: campaign.name,
        });

        Ok(Signup {
            subscriber,
            notification,
        })
    }
}
