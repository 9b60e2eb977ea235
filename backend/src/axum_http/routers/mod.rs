pub mod appointments;
pub mod billing_webhook;
pub mod documents;
pub mod subscriptions;
pub mod vehicles;
