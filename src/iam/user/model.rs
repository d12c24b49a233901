//! User Domain Model
//!
//! Represents an external principal. Authentication happens outside the
//! core and hands over the external identifier; warden only stores it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An external user.
///
/// User URNs carry an empty org: `urn:iws:iam::user{path}{external_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Repository-assigned stable identifier
    pub id: String,
    /// Caller-supplied identifier, unique across the process
    pub external_id: String,
    /// The path to the user
    pub path: String,
    /// Canonical URN, rewritten whenever the path changes
    pub urn: String,
    /// The date and time when the user was created
    pub create_at: DateTime<Utc>,
    /// The date and time when the user was last updated
    pub update_at: DateTime<Utc>,
}
