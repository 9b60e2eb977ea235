use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::appointments::{
    AppointmentEntity, InsertAppointmentEntity, UpdateAppointmentEntity,
};
use crate::domain::value_objects::appointments::AppointmentCreation;

#[async_trait]
#[automock]
pub trait AppointmentRepository {
    /// When `vehicle_id` is set the vehicle row is read `FOR SHARE` and must
    /// belong to the appointment's owner.
    async fn create(&self, appointment: InsertAppointmentEntity) -> Result<AppointmentCreation>;

    async fn update_owned(
        &self,
        appointment_id: Uuid,
        owner_id: Uuid,
        changeset: UpdateAppointmentEntity,
    ) -> Result<Option<AppointmentEntity>>;

    async fn delete_owned(&self, appointment_id: Uuid, owner_id: Uuid) -> Result<bool>;
}
