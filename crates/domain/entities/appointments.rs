use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::appointments;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, PartialEq)]
#[diesel(table_name = appointments)]
pub struct AppointmentEntity {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub vehicle_id: Option<Uuid>,
    pub garage_name: String,
    pub garage_id: Option<String>,
    pub scheduled_on: NaiveDate,
    pub time_slot: String,
    pub service: String,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = appointments)]
pub struct InsertAppointmentEntity {
    pub owner_id: Uuid,
    pub vehicle_id: Option<Uuid>,
    pub garage_name: String,
    pub garage_id: Option<String>,
    pub scheduled_on: NaiveDate,
    pub time_slot: String,
    pub service: String,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, AsChangeset)]
#[diesel(table_name = appointments)]
pub struct UpdateAppointmentEntity {
    pub scheduled_on: Option<NaiveDate>,
    pub time_slot: Option<String>,
    pub service: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}
