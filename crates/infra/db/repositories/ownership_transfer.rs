use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::vehicles::VehicleEntity,
        repositories::ownership_transfer::OwnershipTransferRepository,
        value_objects::ownership_transfer::{TransferCounts, TransferOutcome},
    },
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{appointments, documents, vehicles},
    },
};

pub struct OwnershipTransferPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl OwnershipTransferPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl OwnershipTransferRepository for OwnershipTransferPostgres {
    async fn find_owned_vehicle(
        &self,
        vehicle_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<VehicleEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = vehicles::table
            .filter(vehicles::id.eq(vehicle_id))
            .filter(vehicles::owner_id.eq(owner_id))
            .select(VehicleEntity::as_select())
            .first::<VehicleEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn transfer_vehicle(
        &self,
        vehicle_id: Uuid,
        from_owner: Uuid,
        to_owner: Uuid,
    ) -> Result<TransferOutcome> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let outcome = transfer_in_transaction(
            &mut conn,
            vehicle_id,
            from_owner,
            to_owner,
            Utc::now(),
            |_| Ok(()),
        )?;

        Ok(outcome)
    }
}

/// READ COMMITTED plus a row lock on the vehicle. Every statement after the
/// lock is granted sees rows committed while it waited, so a document or
/// appointment inserted under `FOR SHARE` is moved too. The lock query filters
/// on the expected owner, so a transfer that lost a race finds no row.
///
/// `between_writes` runs after each reassignment; an error from it rolls the
/// whole transfer back.
fn transfer_in_transaction<F>(
    conn: &mut PgConnection,
    vehicle_id: Uuid,
    from_owner: Uuid,
    to_owner: Uuid,
    now: DateTime<Utc>,
    between_writes: F,
) -> QueryResult<TransferOutcome>
where
    F: Fn(&mut PgConnection) -> QueryResult<()>,
{
    conn.build_transaction().read_committed().run(|conn| {
        if lock_owned_vehicle(conn, vehicle_id, from_owner)?.is_none() {
            return Ok(TransferOutcome::VehicleNotOwned);
        }

        move_vehicle(conn, vehicle_id, to_owner, now)?;
        between_writes(conn)?;
        let documents_transferred = move_documents(conn, vehicle_id, to_owner, now)?;
        between_writes(conn)?;
        let appointments_transferred = move_appointments(conn, vehicle_id, to_owner, now)?;

        Ok(TransferOutcome::Transferred(TransferCounts {
            documents_transferred,
            appointments_transferred,
        }))
    })
}

fn lock_owned_vehicle(
    conn: &mut PgConnection,
    vehicle_id: Uuid,
    owner_id: Uuid,
) -> QueryResult<Option<Uuid>> {
    vehicles::table
        .filter(vehicles::id.eq(vehicle_id))
        .filter(vehicles::owner_id.eq(owner_id))
        .select(vehicles::id)
        .for_update()
        .first::<Uuid>(conn)
        .optional()
}

fn move_vehicle(
    conn: &mut PgConnection,
    vehicle_id: Uuid,
    to_owner: Uuid,
    now: DateTime<Utc>,
) -> QueryResult<usize> {
    update(vehicles::table.find(vehicle_id))
        .set((vehicles::owner_id.eq(to_owner), vehicles::updated_at.eq(now)))
        .execute(conn)
}

fn move_documents(
    conn: &mut PgConnection,
    vehicle_id: Uuid,
    to_owner: Uuid,
    now: DateTime<Utc>,
) -> QueryResult<usize> {
    update(documents::table.filter(documents::vehicle_id.eq(vehicle_id)))
        .set((documents::owner_id.eq(to_owner), documents::updated_at.eq(now)))
        .execute(conn)
}

fn move_appointments(
    conn: &mut PgConnection,
    vehicle_id: Uuid,
    to_owner: Uuid,
    now: DateTime<Utc>,
) -> QueryResult<usize> {
    update(appointments::table.filter(appointments::vehicle_id.eq(vehicle_id)))
        .set((
            appointments::owner_id.eq(to_owner),
            appointments::updated_at.eq(now),
        ))
        .execute(conn)
}
