pub mod appointment_statuses;
pub mod subscription_statuses;
