mod campaigns;
mod subscribers;

pub use campaigns::{Campaign, CampaignInput, CampaignSummary, NewCampaign};
pub use subscribers::{NewSubscriber, SubscriptionInput, Subscriber};
