use uuid::Uuid;

use chrono::{DateTime, Utc};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{non_blank, CampaignConfig, CampaignName, Slug};
use crate::error::{Error, Result};

pub const DEFAULT_TEMPLATE: &str = "default";

/// Campaign write request, as submitted by an operator
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignInput {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
    pub template: Option<String>,
    pub config: Option<CampaignConfig>,
    /// Free-form operator data, stored as given
    pub metadata: Option<Map<String, Value>>,
}

/// Validated campaign, ready to be inserted or to replace a stored record
#[derive(Debug, Clone)]
pub struct NewCampaign {
    pub name: CampaignName,
    pub slug: Slug,
    pub description: Option<String>,
    pub active: bool,
    pub template: String,
    pub config: CampaignConfig,
    pub metadata: Map<String, Value>,
}

impl TryFrom<CampaignInput> for NewCampaign {
    type Error = Error;

    fn try_from(input: CampaignInput) -> Result<Self> {
        let name = input.name.unwrap_or_default().parse()?;
        let slug = input.slug.unwrap_or_default().parse()?;
        let config = input
            .config
            .ok_or_else(|| Error::validation("Title is required"))?
            .validated()?;

        Ok(Self {
            name,
            slug,
            description: non_blank(input.description),
            active: input.active.unwrap_or(true),
            template: non_blank(input.template).unwrap_or_else(|| DEFAULT_TEMPLATE.into()),
            config,
            metadata: input.metadata.unwrap_or_default(),
        })
    }
}

/// Stored campaign record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    /// Gates whether the public landing page resolves
    pub active: bool,
    pub template: String,
    pub config: CampaignConfig,
    pub metadata: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Campaign row for the operator dashboard
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub active: bool,
    pub subscriber_count: i64,
    pub created_at: DateTime<Utc>,
}
