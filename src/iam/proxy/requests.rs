//! Request types for proxy resource operations.

use serde::{Deserialize, Serialize};

/// Request to create a proxy resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddProxyResourceRequest {
    pub org: String,
    pub name: String,
    pub path: String,
    pub host: String,
    pub url: String,
    pub method: String,
    pub urn_template: String,
    pub action: String,
}

/// Request to update a proxy resource. Unset fields keep their current value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProxyResourceRequest {
    pub org: String,
    pub name: String,
    pub new_name: Option<String>,
    pub new_path: Option<String>,
    pub new_host: Option<String>,
    pub new_url: Option<String>,
    pub new_method: Option<String>,
    pub new_urn_template: Option<String>,
    pub new_action: Option<String>,
}
