use uuid::Uuid;

use sqlx::PgPool;

use crate::domain::EmailAddress;
use crate::error::Result;
use crate::model::{NewSubscriber, Subscriber};

use super::{conflict_on_unique, SubscriberRepo, SUBSCRIBER_CONFLICT};

/// Postgres Subscriber Repository
#[derive(Debug, Clone)]
pub struct PgSubscriberRepo {
    pool: PgPool,
}

impl PgSubscriberRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl SubscriberRepo for PgSubscriberRepo {
    #[tracing::instrument(name = "Insert subscriber", skip(self))]
    async fn insert(&self, new_subscriber: &NewSubscriber) -> Result<Subscriber> {
        let subscriber = sqlx::query_as::<_, Subscriber>(
            "insert into subscribers(id, email, name, campaign_id) values ($1, $2, $3, $4) \
             returning id, email, name, campaign_id, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(new_subscriber.email.as_ref())
        .bind(&new_subscriber.name)
        .bind(new_subscriber.campaign_id)
        .fetch_one(&self.pool)
        .await
        .map_err(conflict_on_unique(SUBSCRIBER_CONFLICT))?;

        Ok(subscriber)
    }

    #[tracing::instrument(name = "Check for existing subscriber", skip(self))]
    async fn exists(&self, email: &EmailAddress, campaign_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "select exists(select 1 from subscribers where email=$1 and campaign_id=$2)",
        )
        .bind(email.as_ref())
        .bind(campaign_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    #[tracing::instrument(name = "Fetch subscribers by campaign", skip(self))]
    async fn fetch_by_campaign(&self, campaign_id: Uuid) -> Result<Vec<Subscriber>> {
        let subscribers = sqlx::query_as::<_, Subscriber>(
            "select id, email, name, campaign_id, created_at, updated_at \
             from subscribers where campaign_id=$1 order by created_at desc",
        )
        .bind(campaign_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(subscribers)
    }
}
