mod campaigns;
mod notifier;
mod signup;

pub use campaigns::{CampaignService, SAMPLE_CAMPAIGN_SLUG};
pub use notifier::{build_confirmation_email, Confirmation, ConfirmationNotifier};
pub use signup::{Signup, SignupWorkflow};
