use anyhow::Result;
use async_trait::async_trait;
use diesel::{delete, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::appointments::{
            AppointmentEntity, InsertAppointmentEntity, UpdateAppointmentEntity,
        },
        repositories::appointments::AppointmentRepository,
        value_objects::appointments::AppointmentCreation,
    },
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{appointments, vehicles},
    },
};

pub struct AppointmentPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl AppointmentPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl AppointmentRepository for AppointmentPostgres {
    async fn create(&self, appointment: InsertAppointmentEntity) -> Result<AppointmentCreation> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = conn.transaction::<AppointmentCreation, diesel::result::Error, _>(|conn| {
            if let Some(vehicle_id) = appointment.vehicle_id {
                let owned = vehicles::table
                    .filter(vehicles::id.eq(vehicle_id))
                    .filter(vehicles::owner_id.eq(appointment.owner_id))
                    .select(vehicles::id)
                    .for_share()
                    .first::<Uuid>(conn)
                    .optional()?;

                if owned.is_none() {
                    return Ok(AppointmentCreation::VehicleNotOwned);
                }
            }

            let created = insert_into(appointments::table)
                .values(&appointment)
                .returning(AppointmentEntity::as_select())
                .get_result::<AppointmentEntity>(conn)?;

            Ok(AppointmentCreation::Created(created))
        })?;

        Ok(result)
    }

    async fn update_owned(
        &self,
        appointment_id: Uuid,
        owner_id: Uuid,
        changeset: UpdateAppointmentEntity,
    ) -> Result<Option<AppointmentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(
            appointments::table
                .filter(appointments::id.eq(appointment_id))
                .filter(appointments::owner_id.eq(owner_id)),
        )
        .set(&changeset)
        .returning(AppointmentEntity::as_select())
        .get_result::<AppointmentEntity>(&mut conn)
        .optional()?;

        Ok(result)
    }

    async fn delete_owned(&self, appointment_id: Uuid, owner_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(
            appointments::table
                .filter(appointments::id.eq(appointment_id))
                .filter(appointments::owner_id.eq(owner_id)),
        )
        .execute(&mut conn)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::db::postgres::test_support::{
        appointment_for, seed_account, seed_vehicle, test_pool,
    };
    use chrono::Utc;

    #[tokio::test]
    async fn appointment_on_foreign_vehicle_is_rejected() {
        let Some(pool) = test_pool() else { return };
        let mut conn = pool.get().unwrap();
        let owner = seed_account(&mut conn, "owner");
        let stranger = seed_account(&mut conn, "stranger");
        let vehicle = seed_vehicle(&mut conn, owner.id);
        let repository = AppointmentPostgres::new(Arc::clone(&pool));

        let creation = repository
            .create(appointment_for(stranger.id, Some(vehicle.id)))
            .await
            .unwrap();

        assert_eq!(creation, AppointmentCreation::VehicleNotOwned);
    }

    #[tokio::test]
    async fn owner_can_create_update_and_delete() {
        let Some(pool) = test_pool() else { return };
        let mut conn = pool.get().unwrap();
        let owner = seed_account(&mut conn, "owner");
        let vehicle = seed_vehicle(&mut conn, owner.id);
        let repository = AppointmentPostgres::new(Arc::clone(&pool));

        let AppointmentCreation::Created(created) = repository
            .create(appointment_for(owner.id, Some(vehicle.id)))
            .await
            .unwrap()
        else {
            panic!("appointment should be created");
        };

        let updated = repository
            .update_owned(
                created.id,
                owner.id,
                UpdateAppointmentEntity {
                    status: Some("confirmed".to_string()),
                    description: Some(Some("pneus hiver".to_string())),
                    updated_at: Some(Utc::now()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.status, "confirmed");
        assert_eq!(updated.description.as_deref(), Some("pneus hiver"));
        assert_eq!(updated.service, created.service);
        assert!(repository.delete_owned(created.id, owner.id).await.unwrap());
    }
}
