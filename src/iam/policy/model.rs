//! Policy Domain Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Statement effect granting the matched actions/resources.
pub const EFFECT_ALLOW: &str = "allow";

/// Statement effect refusing the matched actions/resources; deny is final.
pub const EFFECT_DENY: &str = "deny";

/// Atomic unit of authorization: one effect over a set of action patterns
/// and a set of resource patterns.
///
/// The effect stays a plain validated string so that a malformed value is
/// rejected by the validator with its canonical message instead of failing
/// at deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// `allow` or `deny`
    pub effect: String,
    /// Non-empty action patterns, e.g. `iam:getUser` or `iam:*`
    pub actions: Vec<String>,
    /// Non-empty URN patterns, e.g. `urn:iws:iam:123:policy/path/*`
    pub resources: Vec<String>,
}

impl Statement {
    pub fn new(
        effect: impl Into<String>,
        actions: Vec<String>,
        resources: Vec<String>,
    ) -> Self {
        Self {
            effect: effect.into(),
            actions,
            resources,
        }
    }

    /// True when the effect is `deny`.
    pub fn is_deny(&self) -> bool {
        self.effect == EFFECT_DENY
    }
}

/// A named, org-scoped collection of statements attachable to groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Repository-assigned stable identifier
    pub id: String,
    /// The friendly name, unique within the org
    pub name: String,
    /// Organization that owns the policy
    pub org: String,
    /// The path to the policy
    pub path: String,
    /// Canonical URN, always derivable from org, path and name
    pub urn: String,
    /// The date and time when the policy was created
    pub create_at: DateTime<Utc>,
    /// The date and time when the policy was last updated
    pub update_at: DateTime<Utc>,
    /// Ordered, non-empty statement list
    pub statements: Vec<Statement>,
}
