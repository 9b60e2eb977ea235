use std::sync::Arc;

use carnet::domain::{
    entities::appointments::{InsertAppointmentEntity, UpdateAppointmentEntity},
    repositories::appointments::AppointmentRepository,
    value_objects::{
        appointments::{
            AppointmentCreation, AppointmentDto, AppointmentPatch, CreateAppointmentModel,
            DATE_FORMAT,
        },
        enums::appointment_statuses::AppointmentStatus,
    },
};
use chrono::{NaiveDate, Utc};
use tracing::{error, info};
use uuid::Uuid;

use crate::usecases::errors::{UseCaseError, UseCaseResult, require_text};

pub struct AppointmentUseCase<R>
where
    R: AppointmentRepository + Send + Sync + 'static,
{
    appointment_repo: Arc<R>,
}

impl<R> AppointmentUseCase<R>
where
    R: AppointmentRepository + Send + Sync + 'static,
{
    pub fn new(appointment_repo: Arc<R>) -> Self {
        Self { appointment_repo }
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        model: CreateAppointmentModel,
    ) -> UseCaseResult<AppointmentDto> {
        require_text("garage_name", &model.garage_name)?;
        require_text("time", &model.time)?;
        require_text("service", &model.service)?;
        let scheduled_on = parse_upcoming_date(&model.date, Utc::now().date_naive())?;

        let now = Utc::now();
        let row = InsertAppointmentEntity {
            owner_id,
            vehicle_id: model.vehicle_id,
            garage_name: model.garage_name,
            garage_id: model.garage_id,
            scheduled_on,
            time_slot: model.time,
            service: model.service,
            description: model.description,
            status: AppointmentStatus::default().to_string(),
            created_at: now,
            updated_at: now,
        };

        let creation = self.appointment_repo.create(row).await.map_err(|err| {
            error!(%owner_id, db_error = ?err, "appointments: failed to create appointment");
            UseCaseError::StoreFailure
        })?;

        match creation {
            AppointmentCreation::Created(appointment) => {
                info!(appointment_id = %appointment.id, %owner_id, "appointments: appointment created");
                Ok(appointment.into())
            }
            AppointmentCreation::VehicleNotOwned => {
                Err(UseCaseError::NotFound("vehicle not found".to_string()))
            }
        }
    }

    pub async fn update(
        &self,
        appointment_id: Uuid,
        owner_id: Uuid,
        patch: AppointmentPatch,
    ) -> UseCaseResult<AppointmentDto> {
        let changeset = Self::changeset(patch, Utc::now().date_naive())?;

        let updated = self
            .appointment_repo
            .update_owned(appointment_id, owner_id, changeset)
            .await
            .map_err(|err| {
                error!(%appointment_id, %owner_id, db_error = ?err, "appointments: failed to update appointment");
                UseCaseError::StoreFailure
            })?
            .ok_or_else(|| UseCaseError::NotFound("appointment not found".to_string()))?;

        info!(%appointment_id, %owner_id, "appointments: appointment updated");
        Ok(updated.into())
    }

    pub async fn delete(&self, appointment_id: Uuid, owner_id: Uuid) -> UseCaseResult<()> {
        let deleted = self
            .appointment_repo
            .delete_owned(appointment_id, owner_id)
            .await
            .map_err(|err| {
                error!(%appointment_id, %owner_id, db_error = ?err, "appointments: failed to delete appointment");
                UseCaseError::StoreFailure
            })?;

        if !deleted {
            return Err(UseCaseError::NotFound("appointment not found".to_string()));
        }

        info!(%appointment_id, %owner_id, "appointments: appointment deleted");
        Ok(())
    }

    fn changeset(patch: AppointmentPatch, today: NaiveDate) -> UseCaseResult<UpdateAppointmentEntity> {
        if patch.is_empty() {
            return Err(UseCaseError::Validation("no fields to update".to_string()));
        }

        let scheduled_on = patch
            .date
            .as_deref()
            .map(|date| parse_upcoming_date(date, today))
            .transpose()?;

        let status = patch
            .status
            .as_deref()
            .map(|status| {
                AppointmentStatus::parse(status)
                    .map(|status| status.to_string())
                    .ok_or_else(|| UseCaseError::Validation(format!("unknown status: {status}")))
            })
            .transpose()?;

        if let Some(time) = &patch.time {
            require_text("time", time)?;
        }
        if let Some(service) = &patch.service {
            require_text("service", service)?;
        }

        Ok(UpdateAppointmentEntity {
            scheduled_on,
            time_slot: patch.time,
            service: patch.service,
            description: patch.description,
            status,
            updated_at: Some(Utc::now()),
        })
    }
}

/// `YYYY-MM-DD`, today or later.
fn parse_upcoming_date(value: &str, today: NaiveDate) -> UseCaseResult<NaiveDate> {
    let date = NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        UseCaseError::Validation(format!("date must use the YYYY-MM-DD format: {value}"))
    })?;

    if date < today {
        return Err(UseCaseError::Validation(
            "date must not be in the past".to_string(),
        ));
    }

    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use carnet::domain::{
        entities::appointments::AppointmentEntity,
        repositories::appointments::MockAppointmentRepository,
    };
    use chrono::Duration;

    fn tomorrow() -> NaiveDate {
        Utc::now().date_naive() + Duration::days(1)
    }

    fn create_model(date: String, vehicle_id: Option<Uuid>) -> CreateAppointmentModel {
        CreateAppointmentModel {
            vehicle_id,
            garage_name: "Garage du Centre".to_string(),
            garage_id: None,
            date,
            time: "09:30".to_string(),
            service: "Vidange".to_string(),
            description: None,
        }
    }

    fn stored(row: InsertAppointmentEntity) -> AppointmentEntity {
        AppointmentEntity {
            id: Uuid::new_v4(),
            owner_id: row.owner_id,
            vehicle_id: row.vehicle_id,
            garage_name: row.garage_name,
            garage_id: row.garage_id,
            scheduled_on: row.scheduled_on,
            time_slot: row.time_slot,
            service: row.service,
            description: row.description,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    #[test]
    fn date_must_be_well_formed_and_upcoming() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        assert_eq!(parse_upcoming_date("2025-03-10", today), Ok(today));
        assert!(matches!(
            parse_upcoming_date("2025-03-09", today),
            Err(UseCaseError::Validation(_))
        ));
        assert!(matches!(
            parse_upcoming_date("10/03/2025", today),
            Err(UseCaseError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn create_defaults_to_pending() {
        let owner_id = Uuid::new_v4();
        let vehicle_id = Uuid::new_v4();
        let date = tomorrow();

        let mut appointment_repo = MockAppointmentRepository::new();
        appointment_repo
            .expect_create()
            .withf(move |row| {
                row.owner_id == owner_id
                    && row.vehicle_id == Some(vehicle_id)
                    && row.scheduled_on == date
                    && row.status == "pending"
            })
            .times(1)
            .returning(|row| Box::pin(async move { Ok(AppointmentCreation::Created(stored(row))) }));

        let usecase = AppointmentUseCase::new(Arc::new(appointment_repo));
        let created = usecase
            .create(
                owner_id,
                create_model(date.format(DATE_FORMAT).to_string(), Some(vehicle_id)),
            )
            .await
            .unwrap();

        assert_eq!(created.date, date);
        assert_eq!(created.status, "pending");
    }

    #[tokio::test]
    async fn create_against_foreign_vehicle_is_not_found() {
        let mut appointment_repo = MockAppointmentRepository::new();
        appointment_repo
            .expect_create()
            .returning(|_| Box::pin(async { Ok(AppointmentCreation::VehicleNotOwned) }));

        let usecase = AppointmentUseCase::new(Arc::new(appointment_repo));
        let result = usecase
            .create(
                Uuid::new_v4(),
                create_model(tomorrow().format(DATE_FORMAT).to_string(), Some(Uuid::new_v4())),
            )
            .await;

        assert!(matches!(result, Err(UseCaseError::NotFound(_))));
    }

    #[tokio::test]
    async fn past_date_is_rejected_on_create() {
        let mut appointment_repo = MockAppointmentRepository::new();
        appointment_repo.expect_create().times(0);

        let usecase = AppointmentUseCase::new(Arc::new(appointment_repo));
        let yesterday = Utc::now().date_naive() - Duration::days(1);
        let result = usecase
            .create(
                Uuid::new_v4(),
                create_model(yesterday.format(DATE_FORMAT).to_string(), None),
            )
            .await;

        assert!(matches!(result, Err(UseCaseError::Validation(_))));
    }

    #[test]
    fn patch_becomes_changeset_with_only_provided_fields() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let patch = AppointmentPatch {
            date: Some("2025-04-01".to_string()),
            status: Some("confirmed".to_string()),
            description: Some(None),
            ..AppointmentPatch::default()
        };

        let changeset = AppointmentUseCase::<MockAppointmentRepository>::changeset(patch, today)
            .unwrap();

        assert_eq!(changeset.scheduled_on, NaiveDate::from_ymd_opt(2025, 4, 1));
        assert_eq!(changeset.status.as_deref(), Some("confirmed"));
        assert_eq!(changeset.description, Some(None));
        assert_eq!(changeset.time_slot, None);
        assert_eq!(changeset.service, None);
    }

    #[test]
    fn invalid_patches_are_rejected() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let cases = [
            AppointmentPatch::default(),
            AppointmentPatch {
                status: Some("archived".to_string()),
                ..AppointmentPatch::default()
            },
            AppointmentPatch {
                date: Some("2025-02-01".to_string()),
                ..AppointmentPatch::default()
            },
            AppointmentPatch {
                service: Some(String::new()),
                ..AppointmentPatch::default()
            },
        ];

        for patch in cases {
            let result = AppointmentUseCase::<MockAppointmentRepository>::changeset(patch, today);
            assert!(matches!(result, Err(UseCaseError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn update_and_delete_of_foreign_row_are_not_found() {
        let mut appointment_repo = MockAppointmentRepository::new();
        appointment_repo
            .expect_update_owned()
            .returning(|_, _, _| Box::pin(async { Ok(None) }));
        appointment_repo
            .expect_delete_owned()
            .returning(|_, _| Box::pin(async { Ok(false) }));

        let usecase = AppointmentUseCase::new(Arc::new(appointment_repo));
        let patch = AppointmentPatch {
            time: Some("14:00".to_string()),
            ..AppointmentPatch::default()
        };

        assert!(matches!(
            usecase.update(Uuid::new_v4(), Uuid::new_v4(), patch).await,
            Err(UseCaseError::NotFound(_))
        ));
        assert!(matches!(
            usecase.delete(Uuid::new_v4(), Uuid::new_v4()).await,
            Err(UseCaseError::NotFound(_))
        ));
    }
}
