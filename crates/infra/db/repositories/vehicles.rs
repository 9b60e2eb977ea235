use anyhow::Result;
use async_trait::async_trait;
use diesel::{delete, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::vehicles::{InsertVehicleEntity, UpdateVehicleEntity, VehicleEntity},
        repositories::vehicles::VehicleRepository,
    },
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::vehicles},
};

pub struct VehiclePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl VehiclePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl VehicleRepository for VehiclePostgres {
    async fn create(&self, insert_vehicle_entity: InsertVehicleEntity) -> Result<VehicleEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(vehicles::table)
            .values(&insert_vehicle_entity)
            .returning(VehicleEntity::as_select())
            .get_result::<VehicleEntity>(&mut conn)?;

        Ok(result)
    }

    async fn list_owned(&self, owner_id: Uuid) -> Result<Vec<VehicleEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = vehicles::table
            .filter(vehicles::owner_id.eq(owner_id))
            .order((vehicles::created_at.asc(), vehicles::id.asc()))
            .select(VehicleEntity::as_select())
            .load::<VehicleEntity>(&mut conn)?;

        Ok(results)
    }

    async fn update_owned(
        &self,
        vehicle_id: Uuid,
        owner_id: Uuid,
        changeset: UpdateVehicleEntity,
    ) -> Result<Option<VehicleEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(
            vehicles::table
                .filter(vehicles::id.eq(vehicle_id))
                .filter(vehicles::owner_id.eq(owner_id)),
        )
        .set(&changeset)
        .returning(VehicleEntity::as_select())
        .get_result::<VehicleEntity>(&mut conn)
        .optional()?;

        Ok(result)
    }

    async fn delete_owned(&self, vehicle_id: Uuid, owner_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(
            vehicles::table
                .filter(vehicles::id.eq(vehicle_id))
                .filter(vehicles::owner_id.eq(owner_id)),
        )
        .execute(&mut conn)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::db::postgres::schema::{appointments, documents};
    use crate::infra::db::postgres::test_support::{
        seed_account, seed_appointment, seed_document, seed_vehicle, test_pool,
    };
    use chrono::Utc;

    #[tokio::test]
    async fn created_vehicle_is_listed_for_its_owner_only() {
        let Some(pool) = test_pool() else { return };
        let mut conn = pool.get().unwrap();
        let owner = seed_account(&mut conn, "owner");
        let stranger = seed_account(&mut conn, "stranger");
        let existing = seed_vehicle(&mut conn, owner.id);
        let repository = VehiclePostgres::new(Arc::clone(&pool));

        let now = Utc::now();
        let created = repository
            .create(InsertVehicleEntity {
                owner_id: owner.id,
                plate: "EF-456-GH".to_string(),
                brand: "Renault".to_string(),
                model: "Clio".to_string(),
                year: None,
                mileage: Some(12_000),
                technical_control_date: None,
                image_url: None,
                brand_image_url: None,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();

        let listed: Vec<Uuid> = repository
            .list_owned(owner.id)
            .await
            .unwrap()
            .into_iter()
            .map(|vehicle| vehicle.id)
            .collect();

        assert_eq!(created.owner_id, owner.id);
        assert_eq!(listed, vec![existing.id, created.id]);
        assert!(repository.list_owned(stranger.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn patch_touches_only_provided_columns() {
        let Some(pool) = test_pool() else { return };
        let mut conn = pool.get().unwrap();
        let owner = seed_account(&mut conn, "owner");
        let vehicle = seed_vehicle(&mut conn, owner.id);
        let repository = VehiclePostgres::new(Arc::clone(&pool));

        let updated = repository
            .update_owned(
                vehicle.id,
                owner.id,
                UpdateVehicleEntity {
                    mileage: Some(None),
                    plate: Some("ZZ-999-ZZ".to_string()),
                    updated_at: Some(Utc::now()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.plate, "ZZ-999-ZZ");
        assert_eq!(updated.mileage, None);
        assert_eq!(updated.year, vehicle.year);
        assert_eq!(updated.brand, vehicle.brand);
    }

    #[tokio::test]
    async fn foreign_vehicle_is_neither_updated_nor_deleted() {
        let Some(pool) = test_pool() else { return };
        let mut conn = pool.get().unwrap();
        let owner = seed_account(&mut conn, "owner");
        let stranger = seed_account(&mut conn, "stranger");
        let vehicle = seed_vehicle(&mut conn, owner.id);
        let repository = VehiclePostgres::new(Arc::clone(&pool));

        let updated = repository
            .update_owned(
                vehicle.id,
                stranger.id,
                UpdateVehicleEntity {
                    plate: Some("XX".to_string()),
                    updated_at: Some(Utc::now()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let deleted = repository.delete_owned(vehicle.id, stranger.id).await.unwrap();

        assert!(updated.is_none());
        assert!(!deleted);
    }

    #[tokio::test]
    async fn delete_cascades_documents_and_detaches_appointments() {
        let Some(pool) = test_pool() else { return };
        let mut conn = pool.get().unwrap();
        let owner = seed_account(&mut conn, "owner");
        let vehicle = seed_vehicle(&mut conn, owner.id);
        let document = seed_document(&mut conn, vehicle.id, owner.id);
        let appointment = seed_appointment(&mut conn, owner.id, Some(vehicle.id));
        let repository = VehiclePostgres::new(Arc::clone(&pool));

        assert!(repository.delete_owned(vehicle.id, owner.id).await.unwrap());

        let remaining_documents = documents::table
            .find(document.id)
            .count()
            .get_result::<i64>(&mut conn)
            .unwrap();
        let appointment_vehicle = appointments::table
            .find(appointment.id)
            .select(appointments::vehicle_id)
            .first::<Option<Uuid>>(&mut conn)
            .unwrap();
        assert_eq!(remaining_documents, 0);
        assert_eq!(appointment_vehicle, None);
    }
}
