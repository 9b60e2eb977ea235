use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{RunQueryDsl, insert_into, prelude::*};
use std::sync::Arc;

use crate::{
    domain::{
        entities::applied_billing_events::InsertAppliedBillingEventEntity,
        repositories::billing_events::BillingEventRepository,
        value_objects::billing_events::{BillingEffect, BillingEvent, EventApplication},
    },
    infra::db::{
        postgres::{postgres_connection::PgPoolSquad, schema::applied_billing_events},
        repositories::subscriptions::project_snapshot,
    },
};

pub struct BillingEventPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl BillingEventPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl BillingEventRepository for BillingEventPostgres {
    async fn apply_event(&self, event: BillingEvent) -> Result<EventApplication> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let application = apply_in_transaction(&mut conn, &event, Utc::now())?;

        Ok(application)
    }
}

fn apply_in_transaction(
    conn: &mut PgConnection,
    event: &BillingEvent,
    now: DateTime<Utc>,
) -> QueryResult<EventApplication> {
    conn.transaction(|conn| {
        if !record_if_absent(conn, &event.ledger_record(now))? {
            return Ok(EventApplication::Duplicate);
        }

        let subscription_rows = match &event.effect {
            BillingEffect::ProjectSubscription(snapshot) => project_snapshot(conn, snapshot, now)?,
            BillingEffect::AuditOnly | BillingEffect::Ignore => 0,
        };

        Ok(EventApplication::Applied { subscription_rows })
    })
}

/// `true` when the id was not yet recorded. Must run on the connection that
/// carries the state change.
fn record_if_absent(
    conn: &mut PgConnection,
    record: &InsertAppliedBillingEventEntity,
) -> QueryResult<bool> {
    let inserted = insert_into(applied_billing_events::table)
        .values(record)
        .on_conflict(applied_billing_events::event_id)
        .do_nothing()
        .execute(conn)?;

    Ok(inserted == 1)
}
