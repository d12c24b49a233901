//! Proxy Resource Domain Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A routing record mapping an incoming request shape onto an action and a
/// URN template. The proxy transport matches `(host, method, url)` and the
/// authorization gate then evaluates `action` against the template with its
/// path variables substituted.
///
/// Proxy resources are IAM objects themselves: `(org, name)` is unique and
/// every administrative operation on them is policy-gated like any other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyResource {
    /// Repository-assigned stable identifier
    pub id: String,
    /// The friendly name, unique within the org
    pub name: String,
    /// Organization that owns the record
    pub org: String,
    /// The path to the record itself (not the routed URL)
    pub path: String,
    /// Canonical URN of the record
    pub urn: String,
    /// Upstream host the rule applies to
    pub host: String,
    /// URL pattern, `{var}` segments become template variables
    pub url: String,
    /// HTTP method the rule applies to
    pub method: String,
    /// URN template the gate evaluates after variable substitution
    pub urn_template: String,
    /// Action evaluated for matched requests
    pub action: String,
    /// The date and time when the record was created
    pub create_at: DateTime<Utc>,
    /// The date and time when the record was last updated
    pub update_at: DateTime<Utc>,
}
