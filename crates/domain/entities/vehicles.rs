use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::vehicles;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, PartialEq)]
#[diesel(table_name = vehicles)]
pub struct VehicleEntity {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub plate: String,
    pub brand: String,
    pub model: String,
    pub year: Option<i32>,
    pub mileage: Option<i32>,
    pub technical_control_date: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub brand_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = vehicles)]
pub struct InsertVehicleEntity {
    pub owner_id: Uuid,
    pub plate: String,
    pub brand: String,
    pub model: String,
    pub year: Option<i32>,
    pub mileage: Option<i32>,
    pub technical_control_date: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub brand_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update rendered by diesel: `None` leaves the column untouched,
/// `Some(None)` on a nullable column writes NULL.
#[derive(Debug, Clone, Default, PartialEq, AsChangeset)]
#[diesel(table_name = vehicles)]
pub struct UpdateVehicleEntity {
    pub plate: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<Option<i32>>,
    pub mileage: Option<Option<i32>>,
    pub technical_control_date: Option<Option<DateTime<Utc>>>,
    pub image_url: Option<Option<String>>,
    pub brand_image_url: Option<Option<String>>,
    pub updated_at: Option<DateTime<Utc>>,
}
