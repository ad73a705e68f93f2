use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::non_blank;

pub const DEFAULT_CTA_TEXT: &str = "Join the Waitlist";
pub const DEFAULT_THANK_YOU_MESSAGE: &str = "Thank you for your interest! We'll keep you updated.";

pub const DEFAULT_PRIMARY_COLOR: &str = "#0ea5e9";
pub const DEFAULT_SECONDARY_COLOR: &str = "#0284c7";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
pub const DEFAULT_TEXT_COLOR: &str = "#111827";

/// Landing-page copy and presentation for a campaign, stored as the operator supplied it.
///
/// Display defaults are not written into the stored document; use [`CampaignConfig::resolved`]
/// to read the config with every default applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignConfig {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thank_you_message: Option<String>,
    pub colors: Colors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Colors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CampaignConfig {
    /// Check the required fields and normalize blank optional fields to `None`
    pub fn validated(self) -> Result<Self> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(Error::validation("Title is required"));
        }

        Ok(Self {
            title,
            subtitle: non_blank(self.subtitle),
            cta_text: non_blank(self.cta_text),
            thank_you_message: non_blank(self.thank_you_message),
            colors: Colors {
                primary: non_blank(self.colors.primary),
                secondary: non_blank(self.colors.secondary),
                background: non_blank(self.colors.background),
                text: non_blank(self.colors.text),
            },
            logo_url: non_blank(self.logo_url),
            hero_image_url: non_blank(self.hero_image_url),
        })
    }

    /// View of the config with every display default applied
    pub fn resolved(&self) -> ResolvedConfig<'_> {
        let colors = &self.colors;
        ResolvedConfig {
            title: &self.title,
            subtitle: self.subtitle.as_deref(),
            cta_text: self.cta_text.as_deref().unwrap_or(DEFAULT_CTA_TEXT),
            thank_you_message: self
                .thank_you_message
                .as_deref()
                .unwrap_or(DEFAULT_THANK_YOU_MESSAGE),
            colors: ResolvedColors {
                primary: colors.primary.as_deref().unwrap_or(DEFAULT_PRIMARY_COLOR),
                secondary: colors
                    .secondary
                    .as_deref()
                    .unwrap_or(DEFAULT_SECONDARY_COLOR),
                background: colors
                    .background
                    .as_deref()
                    .unwrap_or(DEFAULT_BACKGROUND_COLOR),
                text: colors.text.as_deref().unwrap_or(DEFAULT_TEXT_COLOR),
            },
            logo_url: self.logo_url.as_deref(),
            hero_image_url: self.hero_image_url.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedConfig<'a> {
    pub title: &'a str,
    pub subtitle: Option<&'a str>,
    pub cta_text: &'a str,
    pub thank_you_message: &'a str,
    pub colors: ResolvedColors<'a>,
    pub logo_url: Option<&'a str>,
    pub hero_image_url: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColors<'a> {
    pub primary: &'a str,
    pub secondary: &'a str,
    pub background: &'a str,
    pub text: &'a str,
}
