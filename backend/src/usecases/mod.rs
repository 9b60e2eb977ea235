pub mod appointments;
pub mod billing_webhook;
pub mod documents;
pub mod errors;
pub mod ownership_transfer;
pub mod subscriptions;
pub mod vehicles;
