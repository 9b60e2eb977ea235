use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::infra::db::postgres::schema::applied_billing_events;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, PartialEq)]
#[diesel(table_name = applied_billing_events)]
#[diesel(primary_key(event_id))]
pub struct AppliedBillingEventEntity {
    pub event_id: String,
    pub event_type: String,
    pub provider_object_id: Option<String>,
    pub provider_created_at: Option<DateTime<Utc>>,
    pub applied_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = applied_billing_events)]
pub struct InsertAppliedBillingEventEntity {
    pub event_id: String,
    pub event_type: String,
    pub provider_object_id: Option<String>,
    pub provider_created_at: Option<DateTime<Utc>>,
    pub applied_at: DateTime<Utc>,
}
