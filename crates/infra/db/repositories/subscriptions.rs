use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::subscriptions},
};
use domain::{
    entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
    repositories::subscriptions::SubscriptionRepository,
    value_objects::subscriptions::{InsertSubscriptionOutcome, SubscriptionSnapshot},
};

pub struct SubscriptionPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl SubscriptionPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionPostgres {
    async fn find_by_account(&self, account_id: Uuid) -> Result<Option<SubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = subscriptions::table
            .filter(subscriptions::account_id.eq(account_id))
            .select(SubscriptionEntity::as_select())
            .first::<SubscriptionEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn insert(
        &self,
        subscription: InsertSubscriptionEntity,
    ) -> Result<InsertSubscriptionOutcome> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let inserted = insert_into(subscriptions::table)
            .values(&subscription)
            .on_conflict_do_nothing()
            .execute(&mut conn)?;

        if inserted == 0 {
            return Ok(InsertSubscriptionOutcome::AlreadyExists);
        }
        Ok(InsertSubscriptionOutcome::Inserted)
    }

    async fn apply_snapshot(&self, snapshot: SubscriptionSnapshot) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = project_snapshot(&mut conn, &snapshot, Utc::now())?;

        Ok(rows)
    }
}

/// Shared by the cancel path and event application so both write the same
/// columns the same way.
pub(crate) fn project_snapshot(
    conn: &mut PgConnection,
    snapshot: &SubscriptionSnapshot,
    now: DateTime<Utc>,
) -> QueryResult<usize> {
    update(
        subscriptions::table
            .filter(subscriptions::provider_subscription_id.eq(&snapshot.provider_subscription_id)),
    )
    .set(&snapshot.to_projection(now))
    .execute(conn)
}
