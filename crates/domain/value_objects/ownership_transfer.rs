use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferVehicleModel {
    #[serde(alias = "newOwnerEmail")]
    pub new_owner_email: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransferCounts {
    pub documents_transferred: usize,
    pub appointments_transferred: usize,
}

/// Result of the transactional step. `VehicleNotOwned` covers a vehicle that
/// was moved away by a concurrent transfer between the pre-check and the lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    Transferred(TransferCounts),
    VehicleNotOwned,
}
