use uuid::Uuid;

use chrono::{DateTime, Utc};

use serde_json::{Map, Value};

use sqlx::types::Json;
use sqlx::PgPool;

use crate::domain::{CampaignConfig, Slug};
use crate::error::Result;
use crate::model::{Campaign, CampaignSummary, NewCampaign};

use super::{conflict_on_unique, CampaignRepo, SLUG_CONFLICT};

const CAMPAIGN_COLUMNS: &str =
    "id, name, slug, description, active, template, config, metadata, created_at, updated_at";

/// Postgres Campaign Repository
#[derive(Debug, Clone)]
pub struct PgCampaignRepo {
    pool: PgPool,
}

impl PgCampaignRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CampaignRow {
    id: Uuid,
    name: String,
    slug: String,
    description: Option<String>,
    active: bool,
    template: String,
    config: Json<CampaignConfig>,
    metadata: Json<Map<String, Value>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CampaignRow> for Campaign {
    fn from(row: CampaignRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
            description: row.description,
            active: row.active,
            template: row.template,
            config: row.config.0,
            metadata: row.metadata.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait::async_trait]
impl CampaignRepo for PgCampaignRepo {
    #[tracing::instrument(name = "Insert campaign", skip(self, new_campaign), fields(slug = %new_campaign.slug))]
    async fn insert(&self, new_campaign: &NewCampaign) -> Result<Campaign> {
        let query = format!(
            "insert into campaigns(id, name, slug, description, active, template, config, metadata) \
             values ($1, $2, $3, $4, $5, $6, $7, $8) returning {}",
            CAMPAIGN_COLUMNS
        );
        let row = sqlx::query_as::<_, CampaignRow>(&query)
            .bind(Uuid::new_v4())
            .bind(new_campaign.name.as_ref())
            .bind(new_campaign.slug.as_ref())
            .bind(&new_campaign.description)
            .bind(new_campaign.active)
            .bind(&new_campaign.template)
            .bind(Json(&new_campaign.config))
            .bind(Json(&new_campaign.metadata))
            .fetch_one(&self.pool)
            .await
            .map_err(conflict_on_unique(SLUG_CONFLICT))?;

        Ok(row.into())
    }

    #[tracing::instrument(name = "Update campaign", skip(self, campaign), fields(slug = %campaign.slug))]
    async fn update(&self, id: Uuid, campaign: &NewCampaign) -> Result<Option<Campaign>> {
        let query = format!(
            "update campaigns set name=$2, slug=$3, description=$4, active=$5, template=$6, \
             config=$7, metadata=$8, updated_at=now() where id=$1 returning {}",
            CAMPAIGN_COLUMNS
        );
        let row = sqlx::query_as::<_, CampaignRow>(&query)
            .bind(id)
            .bind(campaign.name.as_ref())
            .bind(campaign.slug.as_ref())
            .bind(&campaign.description)
            .bind(campaign.active)
            .bind(&campaign.template)
            .bind(Json(&campaign.config))
            .bind(Json(&campaign.metadata))
            .fetch_optional(&self.pool)
            .await
            .map_err(conflict_on_unique(SLUG_CONFLICT))?;

        Ok(row.map(Campaign::from))
    }

    #[tracing::instrument(name = "Delete campaign", skip(self))]
    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("delete from campaigns where id=$1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(name = "Fetch campaign by id", skip(self))]
    async fn fetch_by_id(&self, id: Uuid) -> Result<Option<Campaign>> {
        let query = format!("select {} from campaigns where id=$1", CAMPAIGN_COLUMNS);
        let row = sqlx::query_as::<_, CampaignRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Campaign::from))
    }

    #[tracing::instrument(name = "Fetch campaign by slug", skip(self))]
    async fn fetch_by_slug(&self, slug: &str, active_only: bool) -> Result<Option<Campaign>> {
        let query = format!(
            "select {} from campaigns where slug=$1 and (active or not $2)",
            CAMPAIGN_COLUMNS
        );
        let row = sqlx::query_as::<_, CampaignRow>(&query)
            .bind(slug)
            .bind(active_only)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Campaign::from))
    }

    #[tracing::instrument(name = "Fetch all campaigns", skip(self))]
    async fn fetch_all(&self) -> Result<Vec<Campaign>> {
        let query = format!(
            "select {} from campaigns order by created_at desc",
            CAMPAIGN_COLUMNS
        );
        let rows = sqlx::query_as::<_, CampaignRow>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Campaign::from).collect())
    }

    #[tracing::instrument(name = "Fetch campaign summaries", skip(self))]
    async fn fetch_summaries(&self) -> Result<Vec<CampaignSummary>> {
        let summaries = sqlx::query_as::<_, CampaignSummary>(
            "select c.id, c.name, c.slug, c.description, c.active, c.created_at, \
                    count(s.id) as subscriber_count \
             from campaigns c \
             left join subscribers s on s.campaign_id = c.id \
             group by c.id \
             order by c.created_at desc",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    #[tracing::instrument(name = "Check campaign slug", skip(self))]
    async fn slug_taken(&self, slug: &Slug, excluding: Option<Uuid>) -> Result<bool> {
        let taken: bool = sqlx::query_scalar(
            "select exists(select 1 from campaigns where slug=$1 and ($2::uuid is null or id <> $2))",
        )
        .bind(slug.as_ref())
        .bind(excluding)
        .fetch_one(&self.pool)
        .await?;

        Ok(taken)
    }
}
