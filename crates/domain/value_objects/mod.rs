pub mod appointments;
pub mod billing_events;
pub mod documents;
pub mod enums;
pub mod ownership_transfer;
pub mod patch;
pub mod subscriptions;
pub mod vehicles;
