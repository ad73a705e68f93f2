mod campaign_config;
mod campaign_name;
mod email_address;
mod slug;

pub use campaign_config::{CampaignConfig, Colors, ResolvedColors, ResolvedConfig};
pub use campaign_name::CampaignName;
pub use email_address::EmailAddress;
pub use slug::Slug;

/// Trim an optional string, treating blank values as absent
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
