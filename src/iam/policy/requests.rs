//! Request types for policy operations.

use serde::{Deserialize, Serialize};

use super::model::Statement;

/// Request to create a policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddPolicyRequest {
    pub org: String,
    pub name: String,
    pub path: String,
    pub statements: Vec<Statement>,
}

/// Request to update a policy. Unset fields keep their current value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePolicyRequest {
    pub org: String,
    pub name: String,
    pub new_name: Option<String>,
    pub new_path: Option<String>,
    pub new_statements: Option<Vec<Statement>>,
}
