pub mod accounts;
pub mod appointments;
pub mod billing_events;
pub mod documents;
pub mod ownership_transfer;
pub mod subscriptions;
pub mod vehicles;
