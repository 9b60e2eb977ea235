use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::vehicles::{InsertVehicleEntity, UpdateVehicleEntity, VehicleEntity};
use crate::domain::value_objects::patch::double_option;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CreateVehicleModel {
    pub plate: String,
    pub brand: String,
    pub model: String,
    pub year: Option<i32>,
    pub mileage: Option<i32>,
    #[serde(alias = "technicalControlDate")]
    pub technical_control_date: Option<DateTime<Utc>>,
    #[serde(alias = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(alias = "brandImageUrl")]
    pub brand_image_url: Option<String>,
}

impl CreateVehicleModel {
    pub fn into_entity(self, owner_id: Uuid, now: DateTime<Utc>) -> InsertVehicleEntity {
        InsertVehicleEntity {
            owner_id,
            plate: self.plate.trim().to_string(),
            brand: self.brand.trim().to_string(),
            model: self.model.trim().to_string(),
            year: self.year,
            mileage: self.mileage,
            technical_control_date: self.technical_control_date,
            image_url: self.image_url,
            brand_image_url: self.brand_image_url,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial vehicle edit. Fields left out of the request body are untouched;
/// nullable fields accept an explicit `null` to clear the column.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct VehiclePatch {
    pub plate: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub mileage: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option", alias = "technicalControlDate")]
    pub technical_control_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option", alias = "imageUrl")]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", alias = "brandImageUrl")]
    pub brand_image_url: Option<Option<String>>,
}

impl VehiclePatch {
    pub fn is_empty(&self) -> bool {
        self.plate.is_none()
            && self.brand.is_none()
            && self.model.is_none()
            && self.year.is_none()
            && self.mileage.is_none()
            && self.technical_control_date.is_none()
            && self.image_url.is_none()
            && self.brand_image_url.is_none()
    }

    pub fn into_changeset(self, now: DateTime<Utc>) -> UpdateVehicleEntity {
        UpdateVehicleEntity {
            plate: self.plate,
            brand: self.brand,
            model: self.model,
            year: self.year,
            mileage: self.mileage,
            technical_control_date: self.technical_control_date,
            image_url: self.image_url,
            brand_image_url: self.brand_image_url,
            updated_at: Some(now),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDto {
    pub id: Uuid,
    pub plate: String,
    pub brand: String,
    pub model: String,
    pub year: Option<i32>,
    pub mileage: Option<i32>,
    pub technical_control_date: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub brand_image_url: Option<String>,
}

impl From<VehicleEntity> for VehicleDto {
    fn from(entity: VehicleEntity) -> Self {
        Self {
            id: entity.id,
            plate: entity.plate,
            brand: entity.brand,
            model: entity.model,
            year: entity.year,
            mileage: entity.mileage,
            technical_control_date: entity.technical_control_date,
            image_url: entity.image_url,
            brand_image_url: entity.brand_image_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VehicleListDto {
    pub vehicles: Vec<VehicleDto>,
}

impl From<Vec<VehicleEntity>> for VehicleListDto {
    fn from(entities: Vec<VehicleEntity>) -> Self {
        Self {
            vehicles: entities.into_iter().map(VehicleDto::from).collect(),
        }
    }
}
