//! Fixtures for repository tests that need a live Postgres.
//!
//! Tests call [`test_pool`] and return early when `TEST_DATABASE_URL` is not
//! set. Each fixture inserts rows under fresh ids, so tests can share one
//! database and run in parallel.

use std::sync::{Arc, Once};

use chrono::{Duration, NaiveDate, Utc};
use diesel::{connection::SimpleConnection, insert_into, prelude::*};
use uuid::Uuid;

use crate::domain::entities::{
    accounts::{AccountEntity, InsertAccountEntity},
    appointments::{AppointmentEntity, InsertAppointmentEntity},
    documents::{DocumentEntity, InsertDocumentEntity},
    subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
    vehicles::{InsertVehicleEntity, VehicleEntity},
};
use crate::infra::db::postgres::{
    postgres_connection::{PgPoolSquad, establish_connection},
    schema::{accounts, appointments, documents, subscriptions, vehicles},
};

static APPLY_SCHEMA: Once = Once::new();

pub fn test_pool() -> Option<Arc<PgPoolSquad>> {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = establish_connection(&database_url).expect("test database pool");

    APPLY_SCHEMA.call_once(|| {
        let mut conn = pool.get().expect("test database connection");
        conn.batch_execute(include_str!(
            "../../../migrations/2025-01-10-000001_create_ledger/up.sql"
        ))
        .expect("apply ledger schema");
    });

    Some(Arc::new(pool))
}

pub fn seed_account(conn: &mut PgConnection, label: &str) -> AccountEntity {
    let now = Utc::now();
    insert_into(accounts::table)
        .values(&InsertAccountEntity {
            email: format!("{label}-{}@example.test", Uuid::new_v4()),
            password_hash: "not-a-real-hash".to_string(),
            full_name: label.to_string(),
            created_at: now,
            updated_at: now,
        })
        .returning(AccountEntity::as_select())
        .get_result(conn)
        .expect("seed account")
}

pub fn seed_vehicle(conn: &mut PgConnection, owner_id: Uuid) -> VehicleEntity {
    let now = Utc::now();
    insert_into(vehicles::table)
        .values(&InsertVehicleEntity {
            owner_id,
            plate: "AB-123-CD".to_string(),
            brand: "Peugeot".to_string(),
            model: "208".to_string(),
            year: Some(2019),
            mileage: Some(42_000),
            technical_control_date: None,
            image_url: None,
            brand_image_url: None,
            created_at: now,
            updated_at: now,
        })
        .returning(VehicleEntity::as_select())
        .get_result(conn)
        .expect("seed vehicle")
}

pub fn seed_document(conn: &mut PgConnection, vehicle_id: Uuid, owner_id: Uuid) -> DocumentEntity {
    let now = Utc::now();
    insert_into(documents::table)
        .values(&InsertDocumentEntity {
            vehicle_id,
            owner_id,
            name: "Carte grise".to_string(),
            type_: "carte_grise".to_string(),
            description: None,
            storage_handle: format!("documents/{}", Uuid::new_v4()),
            file_name: "carte-grise.pdf".to_string(),
            file_size: 2048,
            mime_type: "application/pdf".to_string(),
            created_at: now,
            updated_at: now,
        })
        .returning(DocumentEntity::as_select())
        .get_result(conn)
        .expect("seed document")
}

pub fn seed_appointment(
    conn: &mut PgConnection,
    owner_id: Uuid,
    vehicle_id: Option<Uuid>,
) -> AppointmentEntity {
    insert_into(appointments::table)
        .values(&appointment_for(owner_id, vehicle_id))
        .returning(AppointmentEntity::as_select())
        .get_result(conn)
        .expect("seed appointment")
}

pub fn appointment_for(owner_id: Uuid, vehicle_id: Option<Uuid>) -> InsertAppointmentEntity {
    let now = Utc::now();
    InsertAppointmentEntity {
        owner_id,
        vehicle_id,
        garage_name: "Garage du Centre".to_string(),
        garage_id: None,
        scheduled_on: tomorrow(),
        time_slot: "09:30".to_string(),
        service: "vidange".to_string(),
        description: None,
        status: "pending".to_string(),
        created_at: now,
        updated_at: now,
    }
}

pub fn subscription_for(account_id: Uuid) -> InsertSubscriptionEntity {
    let now = Utc::now();
    InsertSubscriptionEntity {
        account_id,
        provider_customer_id: format!("cus_{}", Uuid::new_v4().simple()),
        provider_subscription_id: format!("sub_{}", Uuid::new_v4().simple()),
        provider_price_id: "price_monthly".to_string(),
        status: "incomplete".to_string(),
        current_period_start: now,
        current_period_end: now + Duration::days(30),
        trial_start: None,
        trial_end: None,
        cancel_at_period_end: false,
        created_at: now,
        updated_at: now,
    }
}

pub fn load_subscription(conn: &mut PgConnection, account_id: Uuid) -> SubscriptionEntity {
    subscriptions::table
        .filter(subscriptions::account_id.eq(account_id))
        .select(SubscriptionEntity::as_select())
        .first(conn)
        .expect("load subscription")
}

fn tomorrow() -> NaiveDate {
    Utc::now().date_naive() + Duration::days(1)
}
