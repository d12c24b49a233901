//! Group Domain Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An org-scoped group. `(org, name)` is unique; membership and policy
/// attachment are many-to-many relations kept by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Repository-assigned stable identifier
    pub id: String,
    /// The friendly name, unique within the org
    pub name: String,
    /// Organization that owns the group
    pub org: String,
    /// The path to the group
    pub path: String,
    /// Canonical URN, rewritten on rename or move
    pub urn: String,
    /// The date and time when the group was created
    pub create_at: DateTime<Utc>,
    /// The date and time when the group was last updated
    pub update_at: DateTime<Utc>,
}
