//! Request types for user operations.

use serde::{Deserialize, Serialize};

/// Request to register an external user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddUserRequest {
    pub external_id: String,
    pub path: String,
}

/// Request to move a user to a new path. The external id is immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub external_id: String,
    pub new_path: String,
}
