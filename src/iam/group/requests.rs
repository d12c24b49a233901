//! Request types for group operations.

use serde::{Deserialize, Serialize};

/// Request to create a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddGroupRequest {
    pub org: String,
    pub name: String,
    pub path: String,
}

/// Request to rename or move a group. Unset fields keep their current value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateGroupRequest {
    pub org: String,
    pub name: String,
    pub new_name: Option<String>,
    pub new_path: Option<String>,
}
