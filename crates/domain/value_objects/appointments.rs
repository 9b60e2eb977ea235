use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::appointments::AppointmentEntity;
use crate::domain::value_objects::patch::double_option;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CreateAppointmentModel {
    pub vehicle_id: Option<Uuid>,
    pub garage_name: String,
    pub garage_id: Option<String>,
    pub date: String,
    pub time: String,
    pub service: String,
    pub description: Option<String>,
}

/// Raw appointment edit as sent by the client. Date and status are still
/// strings here; they are validated before becoming a changeset.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AppointmentPatch {
    pub date: Option<String>,
    pub time: Option<String>,
    pub service: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub status: Option<String>,
}

impl AppointmentPatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.time.is_none()
            && self.service.is_none()
            && self.description.is_none()
            && self.status.is_none()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AppointmentDto {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<Uuid>,
    pub garage_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub garage_id: Option<String>,
    pub date: NaiveDate,
    pub time: String,
    pub service: String,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<AppointmentEntity> for AppointmentDto {
    fn from(entity: AppointmentEntity) -> Self {
        Self {
            id: entity.id,
            vehicle_id: entity.vehicle_id,
            garage_name: entity.garage_name,
            garage_id: entity.garage_id,
            date: entity.scheduled_on,
            time: entity.time_slot,
            service: entity.service,
            description: entity.description,
            status: entity.status,
            created_at: entity.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppointmentCreation {
    Created(AppointmentEntity),
    VehicleNotOwned,
}
