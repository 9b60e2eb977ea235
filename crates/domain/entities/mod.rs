pub mod accounts;
pub mod applied_billing_events;
pub mod appointments;
pub mod documents;
pub mod subscriptions;
pub mod vehicles;
