//! Request Context - caller identity for every administrative operation
//!
//! The `RequestContext` carries the identity established by the authentication
//! collaborator. It tells the operation layer who is calling and whether the
//! caller holds the admin flag that bypasses policy evaluation.
//!
//! Contexts should only be created by the authentication layer; building one
//! by hand hands out the admin bypass without any credential check.

use serde::{Deserialize, Serialize};

/// Identity envelope accompanying every operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// External identifier of the authenticated caller
    identifier: String,

    /// Whether the caller bypasses the authorization gate
    is_admin: bool,
}

impl RequestContext {
    pub fn new(identifier: impl Into<String>, is_admin: bool) -> Self {
        Self {
            identifier: identifier.into(),
            is_admin,
        }
    }

    /// The caller's external identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Whether the caller bypasses policy evaluation.
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }
}
